use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::services::{AuthError, CatalogError, UserError};

/// Body returned for every 500. Details only go to the log.
const SERVER_ERROR_MESSAGE: &str = "Something went wrong on the server!";

/// One failed field check in a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            location: "body",
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationBody<'a> {
    errors: &'a [FieldError],
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    BadRequest(String),

    ValidationError(Vec<FieldError>),

    Unauthorized(String),

    Conflict(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::ValidationError(errors) => {
                write!(f, "Validation error: {} field(s) rejected", errors.len())
            }
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody { errors: &errors }),
            )
                .into_response(),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MovieNotFound
            | CatalogError::GenreNotFound
            | CatalogError::DirectorNotFound => Self::NotFound(err.to_string()),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UserNotFound | UserError::MovieNotFound => Self::NotFound(err.to_string()),
            UserError::UsernameTaken | UserError::EmailTaken => Self::Conflict(err.to_string()),
            UserError::NoChanges => Self::BadRequest(err.to_string()),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::unauthorized(),
            AuthError::InvalidToken(reason) => {
                tracing::debug!(%reason, "Rejected bearer token");
                Self::unauthorized()
            }
            AuthError::UserNotFound => Self::unauthorized(),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(CatalogError::GenreNotFound), StatusCode::NOT_FOUND),
            (ApiError::from(UserError::EmailTaken), StatusCode::CONFLICT),
            (ApiError::from(UserError::NoChanges), StatusCode::BAD_REQUEST),
            (
                ApiError::from(AuthError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::ValidationError(vec![FieldError::body("email", "Email must be valid")]),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(UserError::Database("locked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
