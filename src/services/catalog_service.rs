//! Domain service for read-only catalog lookups.

use thiserror::Error;

use crate::models::movie::{Director, Genre, Movie};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Movie not found")]
    MovieNotFound,

    #[error("Genre not found")]
    GenreNotFound,

    #[error("Director not found")]
    DirectorNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// All movies in insertion order.
    async fn list_movies(&self) -> Result<Vec<Movie>, CatalogError>;

    /// Case-insensitive exact title match.
    async fn movie_by_title(&self, title: &str) -> Result<Movie, CatalogError>;

    /// The genre embedded in the first movie whose genre name matches.
    async fn genre_by_name(&self, name: &str) -> Result<Genre, CatalogError>;

    /// The director embedded in the first movie whose director name matches.
    async fn director_by_name(&self, name: &str) -> Result<Director, CatalogError>;
}
