#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr, sync::Arc};

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use larder::{
    AppState,
    config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig, StorageConfig},
};
use larder_db::{Migrate, Plan};
use larder_recipe::{IngredientInput, RecipeInput, StepInput, TagInput};
use larder_shared::State;
use larder_user::{SignInInput, SignUpInput};
use object_store::memory::InMemory;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use tower::ServiceExt;

pub const CATEGORY: &str = "0b1a8f3c-2d4e-4f60-8a7b-9c0d1e2f3a4b";
pub const FLOUR: &str = "1c2b9a4d-3e5f-4071-9b8c-0d1e2f3a4b5c";
pub const BREAKFAST: &str = "4f5e2d70-6182-43a4-8ebf-3a4b5c6d7e8f";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemory>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }

    pub fn code(&self) -> String {
        self.json()["extensions"]["code"]
            .as_str()
            .unwrap_or_default()
            .to_owned()
    }
}

fn config(url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        },
        database: DatabaseConfig {
            url: url.to_owned(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_hours: 1,
        },
        storage: StorageConfig {
            endpoint: "http://localhost:9000".to_owned(),
            access_key: "minioadmin".to_owned(),
            secret_key: "minioadmin".to_owned(),
            bucket: "recipe-images".to_owned(),
            region: "us-east-1".to_owned(),
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app(path: PathBuf) -> anyhow::Result<TestApp> {
    let url = format!("sqlite:{}", path.display());
    let opts = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    for (table, id, name) in [
        ("category", CATEGORY, "breakfast"),
        ("ingredient", FLOUR, "flour"),
        ("tag", BREAKFAST, "morning"),
    ] {
        sqlx::query(&format!(
            "INSERT INTO {table} (id, name, created_at) VALUES (?, ?, 0)"
        ))
        .bind(id)
        .bind(name)
        .execute(&pool)
        .await?;
    }

    let store = Arc::new(InMemory::new());
    let state = AppState::new(&config(&url), State::single(pool), store.clone());
    let router = larder::router(state.clone());

    Ok(TestApp {
        router,
        state,
        store,
    })
}

/// Signs a user up and returns its id and a bearer token.
pub async fn create_user(app: &TestApp, username: &str) -> anyhow::Result<(String, String)> {
    let user = app
        .state
        .user_command
        .sign_up(SignUpInput {
            username: username.to_owned(),
            password: "my_password".to_owned(),
            ..Default::default()
        })
        .await?;

    let signed_in = app
        .state
        .user_command
        .sign_in(SignInInput {
            username: username.to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok((user.id, signed_in.token))
}

pub fn pancakes() -> RecipeInput {
    RecipeInput {
        title: "Pancakes".to_owned(),
        category_id: CATEGORY.to_owned(),
        preparation_time: 20,
        ingredients: vec![IngredientInput {
            ingredient_id: FLOUR.to_owned(),
            quantity: 250.0,
            unit: "g".to_owned(),
        }],
        steps: vec![StepInput {
            index: 1,
            description: "Whisk and fry".to_owned(),
        }],
        tags: vec![TagInput {
            tag_id: BREAKFAST.to_owned(),
        }],
        creator_id: None,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> anyhow::Result<TestResponse> {
    let response = app.router.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await?.to_bytes();

    Ok(TestResponse {
        status,
        headers,
        body,
    })
}

pub async fn post_json(
    app: &TestApp,
    uri: &str,
    body: serde_json::Value,
) -> anyhow::Result<TestResponse> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    send(app, request).await
}

pub async fn action(
    app: &TestApp,
    name: &str,
    arg1: serde_json::Value,
    user_id: Option<&str>,
) -> anyhow::Result<TestResponse> {
    let session = match user_id {
        Some(id) => serde_json::json!({ "x-hasura-role": "user", "X-Hasura-User-Id": id }),
        None => serde_json::json!({ "x-hasura-role": "user" }),
    };

    post_json(
        app,
        "/actions",
        serde_json::json!({
            "action": { "name": name },
            "input": { "arg1": arg1 },
            "session_variables": session,
        }),
    )
    .await
}

pub const BOUNDARY: &str = "larder-test-boundary";

/// Multipart body with an optional `recipe_id` text field and an optional file field.
pub fn multipart(recipe_id: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(recipe_id) = recipe_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"recipe_id\"\r\n\r\n{recipe_id}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn upload(
    app: &TestApp,
    token: Option<&str>,
    body: Vec<u8>,
) -> anyhow::Result<TestResponse> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/api/recipe/upload_picture")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );

    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    send(app, request.body(Body::from(body))?).await
}

pub async fn get(app: &TestApp, uri: &str) -> anyhow::Result<TestResponse> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}
