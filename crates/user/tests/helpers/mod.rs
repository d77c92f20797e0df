use std::{path::PathBuf, str::FromStr};

use larder_db::{Migrate, Plan};
use larder_shared::State;
use larder_user::token::Keys;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub const SECRET: &str = "test-secret-test-secret-test-secret";

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

pub fn command(state: State) -> larder_user::Command {
    larder_user::Command::new(state, Keys::new(SECRET, time::Duration::hours(24)))
}
