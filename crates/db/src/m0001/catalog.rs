//! Reference catalogs targeted by recipe foreign keys. Their rows are managed through the
//! GraphQL engine.

use sea_query::{ColumnDef, SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement};

use crate::table::{Category, Ingredient, Tag};

pub struct CreateCategoryTable;

fn create_category_table() -> TableCreateStatement {
    Table::create()
        .table(Category::Table)
        .col(
            ColumnDef::new(Category::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Category::Name)
                .string()
                .not_null()
                .string_len(100)
                .unique_key(),
        )
        .col(ColumnDef::new(Category::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_category_table() -> TableDropStatement {
    Table::drop().table(Category::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateCategoryTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(
            connection,
            create_category_table().to_string(SqliteQueryBuilder),
        )
        .await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, drop_category_table().to_string(SqliteQueryBuilder)).await
    }
}

pub struct CreateIngredientTable;

fn create_ingredient_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(100)
                .unique_key(),
        )
        .col(ColumnDef::new(Ingredient::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_ingredient_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIngredientTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(
            connection,
            create_ingredient_table().to_string(SqliteQueryBuilder),
        )
        .await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(
            connection,
            drop_ingredient_table().to_string(SqliteQueryBuilder),
        )
        .await
    }
}

pub struct CreateTagTable;

fn create_tag_table() -> TableCreateStatement {
    Table::create()
        .table(Tag::Table)
        .col(
            ColumnDef::new(Tag::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Tag::Name)
                .string()
                .not_null()
                .string_len(50)
                .unique_key(),
        )
        .col(ColumnDef::new(Tag::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_tag_table() -> TableDropStatement {
    Table::drop().table(Tag::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTagTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, create_tag_table().to_string(SqliteQueryBuilder)).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, drop_tag_table().to_string(SqliteQueryBuilder)).await
    }
}
