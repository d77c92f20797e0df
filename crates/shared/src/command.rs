use sqlx::error::ErrorKind;
use strum::{AsRefStr, Display};

/// Machine-readable reason attached to a validation failure.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Invalid {
    MissingRequiredFields,
    InvalidUuid,
    InvalidIngredient,
    InvalidStep,
    DuplicateStepIndex,
    InvalidInput,
    InvalidRequest,
    UnknownAction,
    InvalidForm,
    MissingRecipeId,
    InvalidRecipeId,
    InvalidFile,
    FileTooLarge,
    InvalidFileType,
    InvalidId,
    InvalidRecipe,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{1}")]
    Invalid(Invalid, String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Creator ID does not match authenticated user")]
    ForbiddenCreator,

    #[error("{0}")]
    Reference(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Server(String),

    /// Internal failure reported with a specific code, such as a storage outage.
    #[error("{1}")]
    Internal(&'static str, String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &str {
        match self {
            Error::Invalid(reason, _) => reason.as_ref(),
            Error::Unauthorized(_) => "UNAUTHORIZED",
            Error::Forbidden(_) => "FORBIDDEN",
            Error::ForbiddenCreator => "FORBIDDEN_CREATOR",
            Error::Reference(_) => "INVALID_REFERENCE",
            Error::Conflict(_) => "CONFLICT",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Internal(code, _) => code,
            Error::Server(_) | Error::Unknown(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// True for errors that must not leak their detail to the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::Server(_) | Error::Internal(..) | Error::Unknown(_)
        )
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(value: validator::ValidationErrors) -> Self {
        Self::Invalid(Invalid::InvalidInput, value.to_string())
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = value {
            return Self::NotFound("Row not found".to_owned());
        }

        if let Some(db) = value.as_database_error() {
            match db.kind() {
                ErrorKind::ForeignKeyViolation => {
                    return Self::Reference(format!("Invalid reference: {}", db.message()));
                }
                ErrorKind::UniqueViolation => {
                    return Self::Conflict(format!("Duplicate entry: {}", db.message()));
                }
                _ => {}
            }
        }

        Self::Unknown(value.into())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Server(value.to_string())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

/// Returns early with a validation error carrying the given reason.
#[macro_export]
macro_rules! invalid {
    ($reason:ident, $msg:literal $(,)?) => {
        return Err($crate::Error::Invalid($crate::Invalid::$reason, format!($msg)))
    };
    ($reason:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Invalid($crate::Invalid::$reason, format!($fmt, $($arg)*)))
    };
}
