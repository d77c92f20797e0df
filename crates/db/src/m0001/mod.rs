mod catalog;
mod recipe;
mod recipe_ingredient;
mod recipe_picture;
mod recipe_step;
mod recipe_tag;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "larder",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateUk1,
        catalog::CreateCategoryTable,
        catalog::CreateIngredientTable,
        catalog::CreateTagTable,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        recipe_ingredient::CreateTable,
        recipe_step::CreateTable,
        recipe_step::CreateUk1,
        recipe_tag::CreateTable,
        recipe_picture::CreateTable,
        recipe_picture::CreateIdx1
    ]
);

async fn execute(
    connection: &mut sqlx::SqliteConnection,
    statement: String,
) -> Result<(), sqlx_migrator::Error> {
    sqlx::query(&statement).execute(connection).await?;

    Ok(())
}
