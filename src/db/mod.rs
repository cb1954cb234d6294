use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::users;
use crate::models::movie::{Director, Genre, Movie, NewMovie};
use crate::models::user::{NewUser, User, UserChanges};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    // ========== Movies ==========

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list_all().await
    }

    pub async fn movie_exists(&self, id: &str) -> Result<bool> {
        self.movie_repo().exists(id).await
    }

    pub async fn find_movie_by_title(&self, title: &str) -> Result<Option<Movie>> {
        self.movie_repo().find_by_title(title).await
    }

    pub async fn find_genre(&self, name: &str) -> Result<Option<Genre>> {
        self.movie_repo().find_genre(name).await
    }

    pub async fn find_director(&self, name: &str) -> Result<Option<Director>> {
        self.movie_repo().find_director(name).await
    }

    pub async fn movie_count(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    pub async fn replace_movies(&self, movies: &[NewMovie]) -> Result<usize> {
        self.movie_repo().replace_all(movies).await
    }

    // ========== Users ==========

    pub async fn create_user(&self, new_user: &NewUser, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new_user, security).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn username_taken(&self, username: &str, except_id: Option<&str>) -> Result<bool> {
        self.user_repo()
            .is_taken(users::Column::Username, username, except_id)
            .await
    }

    pub async fn email_taken(&self, email: &str, except_id: Option<&str>) -> Result<bool> {
        self.user_repo()
            .is_taken(users::Column::Email, email, except_id)
            .await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user(
        &self,
        username: &str,
        changes: &UserChanges,
        security: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo().update(username, changes, security).await
    }

    pub async fn delete_user(&self, username: &str) -> Result<bool> {
        self.user_repo().delete_by_username(username).await
    }

    // ========== Favorites ==========

    pub async fn add_favorite(&self, user_id: &str, movie_id: &str) -> Result<bool> {
        self.favorite_repo().add(user_id, movie_id).await
    }

    pub async fn remove_favorite(&self, user_id: &str, movie_id: &str) -> Result<bool> {
        self.favorite_repo().remove(user_id, movie_id).await
    }
}
