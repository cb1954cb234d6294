//! `SeaORM` implementation of the `CatalogService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::models::movie::{Director, Genre, Movie};
use crate::services::catalog_service::{CatalogError, CatalogService};

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_movies(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(self.store.list_movies().await?)
    }

    async fn movie_by_title(&self, title: &str) -> Result<Movie, CatalogError> {
        self.store
            .find_movie_by_title(title)
            .await?
            .ok_or(CatalogError::MovieNotFound)
    }

    async fn genre_by_name(&self, name: &str) -> Result<Genre, CatalogError> {
        self.store
            .find_genre(name)
            .await?
            .ok_or(CatalogError::GenreNotFound)
    }

    async fn director_by_name(&self, name: &str) -> Result<Director, CatalogError> {
        self.store
            .find_director(name)
            .await?
            .ok_or(CatalogError::DirectorNotFound)
    }
}
