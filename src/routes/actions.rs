use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use larder_shared::Invalid;

use crate::{action::Action, error::AppError, routes::AppState};

/// POST /actions
pub async fn dispatch(
    State(state): State<AppState>,
    payload: Result<Json<Action>, JsonRejection>,
) -> Response {
    let action = match payload {
        Ok(Json(action)) => action,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "undecodable action request");

            return AppError::invalid(Invalid::InvalidRequest, "Invalid request body")
                .into_response();
        }
    };

    state.actions.dispatch(action).await
}
