use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use larder_shared::Error;

use crate::{error::AppError, routes::AppState};

/// Active account resolved from the `Authorization` header.
///
/// Accepts `Bearer <token>` as well as a bare token.
pub struct AuthUser(pub larder_user::User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Unauthorized("Unauthorized: Missing token".to_owned()))?;

        let user = state.user_command.authenticate(token).await?;

        Ok(AuthUser(user))
    }
}
