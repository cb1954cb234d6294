//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::user::{NewUser, User, UserChanges};
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    async fn require_user(&self, username: &str) -> Result<User, UserError> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    async fn ensure_available(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        except_id: Option<&str>,
    ) -> Result<(), UserError> {
        if let Some(username) = username
            && self.store.username_taken(username, except_id).await?
        {
            return Err(UserError::UsernameTaken);
        }
        if let Some(email) = email
            && self.store.email_taken(email, except_id).await?
        {
            return Err(UserError::EmailTaken);
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, new_user: NewUser) -> Result<User, UserError> {
        self.ensure_available(Some(&new_user.username), Some(&new_user.email), None)
            .await?;

        let user = self.store.create_user(&new_user, &self.security).await?;
        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn update(&self, username: &str, changes: UserChanges) -> Result<User, UserError> {
        if changes.is_empty() {
            return Err(UserError::NoChanges);
        }

        let existing = self.require_user(username).await?;
        self.ensure_available(
            changes.username.as_deref(),
            changes.email.as_deref(),
            Some(&existing.id),
        )
        .await?;

        self.store
            .update_user(username, &changes, &self.security)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<(), UserError> {
        if !self.store.movie_exists(movie_id).await? {
            return Err(UserError::MovieNotFound);
        }
        let user = self.require_user(username).await?;

        if self.store.add_favorite(&user.id, movie_id).await? {
            info!(user_id = %user.id, movie_id, "Favorite added");
        }
        Ok(())
    }

    async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<(), UserError> {
        let user = self.require_user(username).await?;

        if self.store.remove_favorite(&user.id, movie_id).await? {
            info!(user_id = %user.id, movie_id, "Favorite removed");
        }
        Ok(())
    }

    async fn deregister(&self, username: &str) -> Result<(), UserError> {
        if !self.store.delete_user(username).await? {
            return Err(UserError::UserNotFound);
        }
        info!(username, "User deregistered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::movie::NewMovie;

    async fn temp_service() -> (Arc<SeaOrmUserService>, Store, std::path::PathBuf) {
        let path =
            std::env::temp_dir().join(format!("yusmov-user-service-{}.db", uuid::Uuid::new_v4()));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        };
        let service = Arc::new(SeaOrmUserService::new(store.clone(), security));
        (service, store, path)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_favorite_adds_keep_each_movie_once() {
        let (service, store, path) = temp_service().await;

        let catalog: Vec<NewMovie> = (0..10)
            .map(|i| NewMovie {
                title: format!("Movie {i}"),
                ..NewMovie::default()
            })
            .collect();
        store.replace_movies(&catalog).await.unwrap();
        service
            .register(NewUser {
                username: "gomez".to_string(),
                email: "gomez@example.com".to_string(),
                password: "Sup3r-secret".to_string(),
                birthday: None,
            })
            .await
            .unwrap();

        let ids: Vec<String> = store
            .list_movies()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        let mut requests = ids.clone();
        requests.extend(std::iter::repeat_n(ids[0].clone(), 10));

        let handles: Vec<_> = requests
            .into_iter()
            .map(|movie_id| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.add_favorite("gomez", &movie_id).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut favorites = store
            .get_user_by_username("gomez")
            .await
            .unwrap()
            .unwrap()
            .favorites;
        favorites.sort();
        let mut expected = ids;
        expected.sort();
        assert_eq!(favorites, expected);

        drop(service);
        drop(store);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_add_favorite_checks_movie_before_user() {
        let (service, _store, path) = temp_service().await;

        let err = service.add_favorite("nobody", "missing").await.unwrap_err();
        assert!(matches!(err, UserError::MovieNotFound));

        std::fs::remove_file(path).ok();
    }
}
