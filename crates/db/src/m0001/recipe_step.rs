use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, RecipeStep};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeStep::Table)
        .col(
            ColumnDef::new(RecipeStep::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipeStep::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(ColumnDef::new(RecipeStep::Idx).integer().not_null())
        .col(
            ColumnDef::new(RecipeStep::Description)
                .string()
                .not_null()
                .string_len(2000),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_step_recipe")
                .from(RecipeStep::Table, RecipeStep::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeStep::Table).to_owned()
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

pub struct CreateUk1;

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_recipe_step_recipe_idx")
        .table(RecipeStep::Table)
        .unique()
        .col(RecipeStep::RecipeId)
        .col(RecipeStep::Idx)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_recipe_step_recipe_idx")
        .table(RecipeStep::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateUk1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, create_uk_1().to_string(SqliteQueryBuilder)).await
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        super::execute(connection, drop_uk_1().to_string(SqliteQueryBuilder)).await
    }
}
