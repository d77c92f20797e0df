use larder_db::table::{Recipe, RecipeIngredient, RecipePicture, RecipeStep, RecipeTag};
use larder_shared::Status;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};

use crate::input::RecipeInput;

#[derive(FromRow, Debug, Clone)]
pub struct RecipeRow {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub creator_id: String,
    pub preparation_time: i64,
    pub average_rating: f64,
    pub rating_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(FromRow, Debug, Clone)]
pub struct IngredientRow {
    pub ingredient_id: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(FromRow, Debug, Clone)]
pub struct StepRow {
    pub idx: i64,
    pub description: String,
}

#[derive(FromRow, Debug, Clone)]
pub struct PictureRow {
    pub id: String,
    pub recipe_id: String,
    pub path: String,
    pub created_at: i64,
}

pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    id: &str,
    creator_id: &str,
    input: &RecipeInput,
) -> larder_shared::Result<()> {
    let now = larder_shared::now();
    let statement = Query::insert()
        .into_table(Recipe::Table)
        .columns([
            Recipe::Id,
            Recipe::Title,
            Recipe::CategoryId,
            Recipe::CreatorId,
            Recipe::PreparationTime,
            Recipe::Status,
            Recipe::SearchText,
            Recipe::CreatedAt,
            Recipe::UpdatedAt,
        ])
        .values_panic([
            id.into(),
            input.title.trim().into(),
            input.category_id.as_str().into(),
            creator_id.into(),
            input.preparation_time.into(),
            Status::Active.as_ref().into(),
            input.search_text().into(),
            now.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn update_header(
    conn: &mut SqliteConnection,
    id: &str,
    input: &RecipeInput,
) -> larder_shared::Result<()> {
    let statement = Query::update()
        .table(Recipe::Table)
        .value(Recipe::Title, input.title.trim())
        .value(Recipe::CategoryId, input.category_id.as_str())
        .value(Recipe::PreparationTime, input.preparation_time)
        .value(Recipe::SearchText, input.search_text())
        .value(Recipe::UpdatedAt, larder_shared::now())
        .and_where(Expr::col(Recipe::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn mark_deleted(conn: &mut SqliteConnection, id: &str) -> larder_shared::Result<()> {
    let statement = Query::update()
        .table(Recipe::Table)
        .value(Recipe::Status, Status::Deleted.as_ref())
        .value(Recipe::UpdatedAt, larder_shared::now())
        .and_where(Expr::col(Recipe::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Inserts ingredients, steps and tags in input order.
pub(crate) async fn insert_children(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    input: &RecipeInput,
) -> larder_shared::Result<()> {
    for ingredient in &input.ingredients {
        let statement = Query::insert()
            .into_table(RecipeIngredient::Table)
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::IngredientId,
                RecipeIngredient::Quantity,
                RecipeIngredient::Unit,
            ])
            .values_panic([
                recipe_id.into(),
                ingredient.ingredient_id.as_str().into(),
                ingredient.quantity.into(),
                ingredient.unit.trim().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    for step in &input.steps {
        let statement = Query::insert()
            .into_table(RecipeStep::Table)
            .columns([
                RecipeStep::Id,
                RecipeStep::RecipeId,
                RecipeStep::Idx,
                RecipeStep::Description,
            ])
            .values_panic([
                uuid::Uuid::new_v4().to_string().into(),
                recipe_id.into(),
                step.index.into(),
                step.description.trim().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    for tag in &input.tags {
        let statement = Query::insert()
            .into_table(RecipeTag::Table)
            .columns([RecipeTag::RecipeId, RecipeTag::TagId])
            .values_panic([recipe_id.into(), tag.tag_id.as_str().into()])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    Ok(())
}

pub(crate) async fn delete_children(
    conn: &mut SqliteConnection,
    recipe_id: &str,
) -> larder_shared::Result<()> {
    let statements = [
        Query::delete()
            .from_table(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
            .to_owned(),
        Query::delete()
            .from_table(RecipeStep::Table)
            .and_where(Expr::col(RecipeStep::RecipeId).eq(recipe_id))
            .to_owned(),
        Query::delete()
            .from_table(RecipeTag::Table)
            .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
            .to_owned(),
    ];

    for statement in statements {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;
    }

    Ok(())
}

/// Creator of an active recipe, if any.
pub(crate) async fn find_creator(
    conn: &mut SqliteConnection,
    id: &str,
) -> larder_shared::Result<Option<String>> {
    let statement = Query::select()
        .column(Recipe::CreatorId)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .and_where(Expr::col(Recipe::Status).eq(Status::Active.as_ref()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(|(creator_id,)| creator_id))
}

pub(crate) async fn find(
    conn: &mut SqliteConnection,
    id: &str,
) -> larder_shared::Result<Option<RecipeRow>> {
    let statement = Query::select()
        .columns([
            Recipe::Id,
            Recipe::Title,
            Recipe::CategoryId,
            Recipe::CreatorId,
            Recipe::PreparationTime,
            Recipe::AverageRating,
            Recipe::RatingCount,
            Recipe::CreatedAt,
            Recipe::UpdatedAt,
        ])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .and_where(Expr::col(Recipe::Status).eq(Status::Active.as_ref()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?)
}

pub(crate) async fn find_ingredients(
    pool: &SqlitePool,
    recipe_id: &str,
) -> larder_shared::Result<Vec<IngredientRow>> {
    let statement = Query::select()
        .columns([
            RecipeIngredient::IngredientId,
            RecipeIngredient::Quantity,
            RecipeIngredient::Unit,
        ])
        .from(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .order_by(RecipeIngredient::IngredientId, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn find_steps(
    pool: &SqlitePool,
    recipe_id: &str,
) -> larder_shared::Result<Vec<StepRow>> {
    let statement = Query::select()
        .columns([RecipeStep::Idx, RecipeStep::Description])
        .from(RecipeStep::Table)
        .and_where(Expr::col(RecipeStep::RecipeId).eq(recipe_id))
        .order_by(RecipeStep::Idx, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, StepRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn find_tags(pool: &SqlitePool, recipe_id: &str) -> larder_shared::Result<Vec<String>> {
    let statement = Query::select()
        .column(RecipeTag::TagId)
        .from(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .order_by(RecipeTag::TagId, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(tag_id,)| tag_id).collect())
}

pub(crate) async fn insert_picture(
    pool: &SqlitePool,
    picture: &PictureRow,
) -> larder_shared::Result<()> {
    let statement = Query::insert()
        .into_table(RecipePicture::Table)
        .columns([
            RecipePicture::Id,
            RecipePicture::RecipeId,
            RecipePicture::Path,
            RecipePicture::CreatedAt,
            RecipePicture::UpdatedAt,
        ])
        .values_panic([
            picture.id.as_str().into(),
            picture.recipe_id.as_str().into(),
            picture.path.as_str().into(),
            picture.created_at.into(),
            picture.created_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Picture by id, hidden once its recipe is deleted.
pub(crate) async fn find_picture(
    pool: &SqlitePool,
    id: &str,
) -> larder_shared::Result<Option<PictureRow>> {
    let statement = Query::select()
        .columns([
            (RecipePicture::Table, RecipePicture::Id),
            (RecipePicture::Table, RecipePicture::RecipeId),
            (RecipePicture::Table, RecipePicture::Path),
            (RecipePicture::Table, RecipePicture::CreatedAt),
        ])
        .from(RecipePicture::Table)
        .inner_join(
            Recipe::Table,
            Expr::col((Recipe::Table, Recipe::Id))
                .equals((RecipePicture::Table, RecipePicture::RecipeId)),
        )
        .and_where(Expr::col((RecipePicture::Table, RecipePicture::Id)).eq(id))
        .and_where(Expr::col((Recipe::Table, Recipe::Status)).eq(Status::Active.as_ref()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PictureRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}
