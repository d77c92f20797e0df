use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use larder_shared::{Error, Invalid};
use serde::Serialize;

/// Handler error rendered as a Hasura action error.
#[derive(Debug)]
pub struct AppError(pub Error);

impl<E: Into<Error>> From<E> for AppError {
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl AppError {
    pub fn invalid(reason: Invalid, message: impl Into<String>) -> Self {
        Self(Error::Invalid(reason, message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Invalid(..) | Error::Reference(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) | Error::ForbiddenCreator => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Server(_) | Error::Internal(..) | Error::Unknown(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct Extensions<'a> {
    code: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: String,
    extensions: Extensions<'a>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            Error::Server(_) | Error::Unknown(_) => {
                tracing::error!(error = %self.0, "internal error");
                "Internal server error".to_owned()
            }
            Error::Internal(code, message) => {
                tracing::error!(code, "{message}");
                message.to_owned()
            }
            err => err.to_string(),
        };

        let body = ErrorBody {
            message,
            extensions: Extensions {
                code: self.0.code(),
            },
        };

        (status, Json(body)).into_response()
    }
}
