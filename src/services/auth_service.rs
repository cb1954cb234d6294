//! Domain service for authentication.
//!
//! Handles password login and bearer token issue/verification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::user::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken(err.to_string())
    }
}

/// Bearer token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Login result containing the user and a freshly signed token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user or a wrong password.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Verifies a bearer token and loads the user it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for bad signatures or expired tokens and
    /// [`AuthError::UserNotFound`] if the user has since been deleted.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}
