use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderName, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use larder_shared::State;
use object_store::ObjectStore;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};

use crate::{action::ActionRegistry, config::Config};

mod actions;
mod events;
mod health;
mod picture;

/// Multipart bodies may exceed the picture limit so the size check can answer with a
/// domain error.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_command: larder_user::Command,
    pub recipe_command: larder_recipe::Command,
    pub actions: Arc<ActionRegistry>,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: &Config, state: State, store: Arc<dyn ObjectStore>) -> Self {
        let keys = larder_user::token::Keys::new(
            &config.jwt.secret,
            time::Duration::hours(config.jwt.expiration_hours),
        );
        let user_command = larder_user::Command::new(state.clone(), keys);
        let recipe_command = larder_recipe::Command::new(state.clone(), store);
        let actions = Arc::new(ActionRegistry::with_commands(
            user_command.clone(),
            recipe_command.clone(),
        ));

        Self {
            user_command,
            recipe_command,
            actions,
            pool: state.read_db,
        }
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .max_age(Duration::from_secs(300))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/actions", post(actions::dispatch))
        .route("/events", post(events::receive))
        .route(
            "/api/recipe/upload_picture",
            post(picture::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/recipe/picture/{id}", get(picture::show))
        .layer(cors())
        .with_state(app_state)
}
