use async_trait::async_trait;
use axum::response::Response;
use larder_recipe::{DeleteRecipeInput, RecipeInput, UpdateRecipeInput};
use serde::Serialize;

use super::{Action, ActionHandler, respond};
use crate::error::AppError;

pub struct CreateRecipe(pub larder_recipe::Command);

#[async_trait]
impl ActionHandler for CreateRecipe {
    async fn handle(&self, action: Action) -> Response {
        let result = async {
            let user_id = action.session_user_id()?;
            let input = action.arg1::<RecipeInput>()?;
            Ok::<_, AppError>(self.0.create(user_id, input).await?)
        };

        respond(result.await)
    }
}

pub struct UpdateRecipe(pub larder_recipe::Command);

#[async_trait]
impl ActionHandler for UpdateRecipe {
    async fn handle(&self, action: Action) -> Response {
        let result = async {
            let user_id = action.session_user_id()?;
            let input = action.arg1::<UpdateRecipeInput>()?;
            Ok::<_, AppError>(self.0.update(user_id, input).await?)
        };

        respond(result.await)
    }
}

#[derive(Serialize)]
struct Deleted {
    id: String,
    deleted: bool,
}

pub struct DeleteRecipe(pub larder_recipe::Command);

#[async_trait]
impl ActionHandler for DeleteRecipe {
    async fn handle(&self, action: Action) -> Response {
        let result = async {
            let user_id = action.session_user_id()?;
            let input = action.arg1::<DeleteRecipeInput>()?;
            let id = input.id.to_owned();
            self.0.delete(user_id, input).await?;

            Ok::<_, AppError>(Deleted { id, deleted: true })
        };

        respond(result.await)
    }
}
