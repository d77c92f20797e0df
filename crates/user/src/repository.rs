use larder_db::table::User;
use larder_shared::Status;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub password: String,
}

pub enum FindType {
    Id(String),
    Username(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> larder_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Username,
            User::DisplayName,
            User::Bio,
            User::Password,
        ])
        .from(User::Table)
        .and_where(Expr::col(User::Status).eq(Status::Active.as_ref()))
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) struct CreateInput {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub password: String,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> larder_shared::Result<()> {
    let now = larder_shared::now();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Username,
            User::DisplayName,
            User::Bio,
            User::Password,
            User::Status,
            User::CreatedAt,
            User::UpdatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.username.into(),
            input.display_name.into(),
            input.bio.into(),
            input.password.into(),
            Status::Active.as_ref().into(),
            now.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
