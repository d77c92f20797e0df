//! Dispatch of named actions posted by the GraphQL engine.
//!
//! The registry maps lower-cased action names to handlers. It is assembled once at
//! startup and is read-only afterwards; names it does not know resolve to the
//! "unknown action" handler instead of failing.

mod recipe;
mod user;

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use larder_shared::{Error, Invalid};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::AppError;

pub use recipe::{CreateRecipe, DeleteRecipe, UpdateRecipe};
pub use user::{SignIn, SignUp};

pub const SESSION_USER_ID: &str = "x-hasura-user-id";

#[derive(Deserialize, Debug, Clone)]
pub struct ActionName {
    pub name: String,
}

/// Body of a `POST /actions` request.
#[derive(Deserialize, Debug, Clone)]
pub struct Action {
    pub action: ActionName,
    #[serde(default)]
    pub input: serde_json::Value,
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

impl Action {
    /// Decodes `input.arg1`.
    pub fn arg1<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let arg1 = self
            .input
            .get("arg1")
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        serde_json::from_value(arg1)
            .map_err(|e| AppError::invalid(Invalid::InvalidInput, format!("Invalid input: {e}")))
    }

    /// Caller id from the session variables. Header names are matched ignoring case.
    pub fn session_user_id(&self) -> Result<&str, AppError> {
        self.session_variables
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(SESSION_USER_ID))
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError(Error::Unauthorized(
                    "Unauthorized: Missing user ID in session".to_owned(),
                ))
            })
    }
}

#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, action: Action) -> Response;
}

pub(crate) fn respond<T: Serialize>(result: Result<T, AppError>) -> Response {
    match result {
        Ok(output) => Json(output).into_response(),
        Err(err) => err.into_response(),
    }
}

struct UnknownAction;

#[async_trait]
impl ActionHandler for UnknownAction {
    async fn handle(&self, action: Action) -> Response {
        tracing::warn!(name = %action.action.name, "unknown action");

        AppError::invalid(
            Invalid::UnknownAction,
            format!("Unknown action: {}", action.action.name),
        )
        .into_response()
    }
}

#[derive(Default)]
pub struct ActionRegistryBuilder {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
}

impl ActionRegistryBuilder {
    pub fn register(mut self, name: &str, handler: impl ActionHandler + 'static) -> Self {
        self.handlers.insert(name.to_lowercase(), Box::new(handler));
        self
    }

    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            handlers: self.handlers,
            unknown: Box::new(UnknownAction),
        }
    }
}

pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
    unknown: Box<dyn ActionHandler>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// Registry with every action this server answers.
    pub fn with_commands(
        user_command: larder_user::Command,
        recipe_command: larder_recipe::Command,
    ) -> Self {
        Self::builder()
            .register("signUp", SignUp(user_command.clone()))
            .register("signIn", SignIn(user_command))
            .register("createRecipe", CreateRecipe(recipe_command.clone()))
            .register("updateRecipe", UpdateRecipe(recipe_command.clone()))
            .register("deleteRecipe", DeleteRecipe(recipe_command))
            .build()
    }

    pub fn get(&self, name: &str) -> &dyn ActionHandler {
        self.handlers
            .get(&name.to_lowercase())
            .unwrap_or(&self.unknown)
            .as_ref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_lowercase())
    }

    #[tracing::instrument(skip_all, fields(action = %action.action.name))]
    pub async fn dispatch(&self, action: Action) -> Response {
        self.get(&action.action.name).handle(action).await
    }
}
