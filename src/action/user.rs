use async_trait::async_trait;
use axum::response::Response;
use larder_user::{SignInInput, SignUpInput};

use super::{Action, ActionHandler, respond};
use crate::error::AppError;

pub struct SignUp(pub larder_user::Command);

#[async_trait]
impl ActionHandler for SignUp {
    async fn handle(&self, action: Action) -> Response {
        let result = async {
            let input = action.arg1::<SignUpInput>()?;
            Ok::<_, AppError>(self.0.sign_up(input).await?)
        };

        respond(result.await)
    }
}

pub struct SignIn(pub larder_user::Command);

#[async_trait]
impl ActionHandler for SignIn {
    async fn handle(&self, action: Action) -> Response {
        let result = async {
            let input = action.arg1::<SignInInput>()?;
            Ok::<_, AppError>(self.0.sign_in(input).await?)
        };

        respond(result.await)
    }
}
