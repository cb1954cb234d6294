//! Domain service for user accounts and their favorites list.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::user::{NewUser, User, UserChanges};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Movie not found")]
    MovieNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("No valid update fields provided")]
    NoChanges,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(conflict) = unique_violation(&err) {
            return conflict;
        }
        if err.downcast_ref::<DbErr>().is_some() {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(format!("{err:#}"))
        }
    }
}

/// Maps a unique-index failure on the users table to the matching conflict.
/// Covers the window between the availability check and the write.
fn unique_violation(err: &anyhow::Error) -> Option<UserError> {
    match err.downcast_ref::<DbErr>().and_then(DbErr::sql_err) {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            if message.contains("email") {
                Some(UserError::EmailTaken)
            } else {
                Some(UserError::UsernameTaken)
            }
        }
        _ => None,
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates an account from validated input.
    async fn register(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Applies a validated partial update to the account named `username`.
    async fn update(&self, username: &str, changes: UserChanges) -> Result<User, UserError>;

    /// Links `movie_id` to the user's favorites. Adding an existing favorite is a no-op.
    async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<(), UserError>;

    /// Unlinks `movie_id`. Removing a movie that is not a favorite is a no-op.
    async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<(), UserError>;

    /// Deletes the account and its favorites.
    async fn deregister(&self, username: &str) -> Result<(), UserError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityConfig;
    use crate::db::Store;

    fn fast_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "Sup3r-secret".to_string(),
            birthday: None,
        }
    }

    #[tokio::test]
    async fn test_unique_index_conflicts_name_the_column() {
        let path =
            std::env::temp_dir().join(format!("yusmov-user-conflict-{}.db", uuid::Uuid::new_v4()));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        let security = fast_params();

        store
            .create_user(&new_user("gomez", "gomez@example.com"), &security)
            .await
            .unwrap();

        let err = store
            .create_user(&new_user("gomez", "other@example.com"), &security)
            .await
            .unwrap_err();
        assert!(matches!(UserError::from(err), UserError::UsernameTaken));

        let err = store
            .create_user(&new_user("morticia", "gomez@example.com"), &security)
            .await
            .unwrap_err();
        assert!(matches!(UserError::from(err), UserError::EmailTaken));

        drop(store);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_other_database_error_is_not_a_conflict() {
        let err = anyhow::Error::new(DbErr::Custom("boom".into()));
        assert!(unique_violation(&err).is_none());
        assert!(matches!(UserError::from(err), UserError::Database(_)));
    }

    #[test]
    fn test_non_database_error_is_internal() {
        let err = anyhow::anyhow!("hashing failed");
        assert!(matches!(UserError::from(err), UserError::Internal(_)));
    }
}
