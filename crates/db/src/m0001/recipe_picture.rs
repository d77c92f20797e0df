use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, RecipePicture};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipePicture::Table)
        .col(
            ColumnDef::new(RecipePicture::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipePicture::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(RecipePicture::Path)
                .string()
                .not_null()
                .string_len(225)
                .unique_key(),
        )
        .col(ColumnDef::new(RecipePicture::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(RecipePicture::UpdatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_picture_recipe")
                .from(RecipePicture::Table, RecipePicture::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipePicture::Table).to_owned()
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
        .name("idx_recipe_picture_recipe")
        .table(RecipePicture::Table)
        .col(RecipePicture::RecipeId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_picture_recipe")
        .table(RecipePicture::Table)
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
