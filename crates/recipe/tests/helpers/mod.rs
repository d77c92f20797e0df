use std::{path::PathBuf, str::FromStr, sync::Arc};

use larder_db::{Migrate, Plan};
use larder_recipe::{IngredientInput, RecipeInput, StepInput, TagInput};
use larder_shared::State;
use larder_user::{SignUpInput, token::Keys};
use object_store::memory::InMemory;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub const CATEGORY: &str = "0b1a8f3c-2d4e-4f60-8a7b-9c0d1e2f3a4b";
pub const FLOUR: &str = "1c2b9a4d-3e5f-4071-9b8c-0d1e2f3a4b5c";
pub const MILK: &str = "2d3c0b5e-4f60-4182-8c9d-1e2f3a4b5c6d";
pub const EGG: &str = "3e4d1c6f-5071-4293-9dae-2f3a4b5c6d7e";
pub const BREAKFAST: &str = "4f5e2d70-6182-43a4-8ebf-3a4b5c6d7e8f";
pub const QUICK: &str = "506f3e81-7293-44b5-9fc0-4b5c6d7e8f90";

pub struct TestState {
    pub state: State,
    pub store: Arc<InMemory>,
    pub command: larder_recipe::Command,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    for (table, id, name) in [
        ("category", CATEGORY, "breakfast"),
        ("ingredient", FLOUR, "flour"),
        ("ingredient", MILK, "milk"),
        ("ingredient", EGG, "egg"),
        ("tag", BREAKFAST, "morning"),
        ("tag", QUICK, "quick"),
    ] {
        sqlx::query(&format!(
            "INSERT INTO {table} (id, name, created_at) VALUES (?, ?, 0)"
        ))
        .bind(id)
        .bind(name)
        .execute(&pool)
        .await?;
    }

    let state = State::single(pool);
    let store = Arc::new(InMemory::new());
    let command = larder_recipe::Command::new(state.clone(), store.clone());

    Ok(TestState {
        state,
        store,
        command,
    })
}

pub async fn create_user(state: &TestState, username: &str) -> anyhow::Result<String> {
    let keys = Keys::new("test-secret-test-secret-test-secret", time::Duration::hours(1));
    let user = larder_user::Command::new(state.state.clone(), keys)
        .sign_up(SignUpInput {
            username: username.to_owned(),
            password: "my_password".to_owned(),
            ..Default::default()
        })
        .await?;

    Ok(user.id)
}

pub fn pancakes() -> RecipeInput {
    RecipeInput {
        title: "Pancakes".to_owned(),
        category_id: CATEGORY.to_owned(),
        preparation_time: 20,
        ingredients: vec![
            IngredientInput {
                ingredient_id: FLOUR.to_owned(),
                quantity: 250.0,
                unit: "g".to_owned(),
            },
            IngredientInput {
                ingredient_id: MILK.to_owned(),
                quantity: 0.5,
                unit: "l".to_owned(),
            },
        ],
        steps: vec![
            StepInput {
                index: 1,
                description: "Whisk everything".to_owned(),
            },
            StepInput {
                index: 2,
                description: "Fry in butter".to_owned(),
            },
        ],
        tags: vec![TagInput {
            tag_id: BREAKFAST.to_owned(),
        }],
        creator_id: None,
    }
}

#[allow(dead_code)]
pub async fn count(state: &TestState, table: &str) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.state.read_db)
        .await?;

    Ok(count)
}
