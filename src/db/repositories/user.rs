use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use tokio::task;

use super::favorite::FavoriteRepository;
use crate::config::SecurityConfig;
use crate::entities::{user_favorites, users};
use crate::models::user::{NewUser, User, UserChanges};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn hydrate(&self, model: users::Model) -> Result<User> {
        let favorites = FavoriteRepository::new(self.conn.clone())
            .list_for_user(&model.id)
            .await?;

        Ok(User {
            id: model.id,
            username: model.username,
            email: model.email,
            birthday: model.birthday,
            favorites,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn find_model_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")
    }

    /// Insert a new user, hashing the password with the configured Argon2 params
    pub async fn create(&self, new_user: &NewUser, security: &SecurityConfig) -> Result<User> {
        let password = new_user.password.clone();
        let security = security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        let now = chrono::Utc::now().to_rfc3339();

        let active = users::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(new_user.username.clone()),
            email: Set(new_user.email.clone()),
            password_hash: Set(password_hash),
            birthday: Set(new_user.birthday.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        self.hydrate(model).await
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        match user {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        match self.find_model_by_username(username).await? {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    /// Whether `column` already holds `value` for a user other than `except_id`
    pub async fn is_taken(
        &self,
        column: users::Column,
        value: &str,
        except_id: Option<&str>,
    ) -> Result<bool> {
        let mut query = users::Entity::find().filter(column.eq(value));
        if let Some(id) = except_id {
            query = query.filter(users::Column::Id.ne(id));
        }

        let count = query
            .count(&self.conn)
            .await
            .context("Failed to check user uniqueness")?;

        Ok(count > 0)
    }

    /// Verify a password and return the user when it matches.
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(model) = self.find_model_by_username(username).await? else {
            return Ok(None);
        };

        let password_hash = model.password_hash.clone();
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        if is_valid {
            Ok(Some(self.hydrate(model).await?))
        } else {
            Ok(None)
        }
    }

    /// Apply `changes` to the user named `username`; `None` if there is no such user
    pub async fn update(
        &self,
        username: &str,
        changes: &UserChanges,
        security: &SecurityConfig,
    ) -> Result<Option<User>> {
        let Some(model) = self.find_model_by_username(username).await? else {
            return Ok(None);
        };

        let new_hash = match &changes.password {
            Some(password) => {
                let password = password.clone();
                let security = security.clone();
                Some(
                    task::spawn_blocking(move || hash_password(&password, &security))
                        .await
                        .context("Password hashing task panicked")??,
                )
            }
            None => None,
        };

        let mut active: users::ActiveModel = model.into();
        if let Some(username) = &changes.username {
            active.username = Set(username.clone());
        }
        if let Some(email) = &changes.email {
            active.email = Set(email.clone());
        }
        if let Some(hash) = new_hash {
            active.password_hash = Set(hash);
        }
        if let Some(birthday) = &changes.birthday {
            active.birthday = Set(Some(birthday.clone()));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update user")?;

        Ok(Some(self.hydrate(updated).await?))
    }

    /// Delete the user and their favorites. Returns false if nothing matched.
    pub async fn delete_by_username(&self, username: &str) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(model) = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&txn)
            .await
            .context("Failed to query user for deletion")?
        else {
            return Ok(false);
        };

        user_favorites::Entity::delete_many()
            .filter(user_favorites::Column::UserId.eq(model.id.as_str()))
            .exec(&txn)
            .await
            .context("Failed to delete user favorites")?;

        users::Entity::delete_by_id(model.id)
            .exec(&txn)
            .await
            .context("Failed to delete user")?;

        txn.commit().await?;
        Ok(true)
    }
}

/// Hash a password using Argon2id with the configured params.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None, // output length (use default)
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check `password` against a PHC-formatted hash. Params are read from the hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
