use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Category, Recipe, User};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Recipe::Title)
                .string()
                .not_null()
                .string_len(255),
        )
        .col(
            ColumnDef::new(Recipe::CategoryId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(Recipe::CreatorId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(Recipe::PreparationTime)
                .big_integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Recipe::AverageRating)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Recipe::RatingCount)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Recipe::Status)
                .string()
                .not_null()
                .string_len(15)
                .default("active"),
        )
        .col(
            ColumnDef::new(Recipe::SearchText)
                .text()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Recipe::UpdatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_category")
                .from(Recipe::Table, Recipe::CategoryId)
                .to(Category::Table, Category::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_creator")
                .from(Recipe::Table, Recipe::CreatorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, create_table().to_string(SqliteQueryBuilder)).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, drop_table().to_string(SqliteQueryBuilder)).await
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_creator_status")
        .table(Recipe::Table)
        .col(Recipe::CreatorId)
        .col(Recipe::Status)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_creator_status")
        .table(Recipe::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, create_idx_1().to_string(SqliteQueryBuilder)).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, drop_idx_1().to_string(SqliteQueryBuilder)).await
    }
}

pub struct CreateIdx2;

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_category_status")
        .table(Recipe::Table)
        .col(Recipe::CategoryId)
        .col(Recipe::Status)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_category_status")
        .table(Recipe::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx2 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, create_idx_2().to_string(SqliteQueryBuilder)).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, drop_idx_2().to_string(SqliteQueryBuilder)).await
    }
}
