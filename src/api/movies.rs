use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::movie::{Director, Genre, Movie};

pub const WELCOME_MESSAGE: &str =
    "Welcome to YusMov API! Visit /documentation.html to get started.";

/// GET /
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// GET /movies
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.shared.catalog_service.list_movies().await?;
    Ok(Json(movies))
}

/// GET /movies/{title}
/// The title is matched literally, ignoring case.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.shared.catalog_service.movie_by_title(&title).await?;
    Ok(Json(movie))
}

/// GET /genres/{name}
pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Genre>, ApiError> {
    let genre = state.shared.catalog_service.genre_by_name(&name).await?;
    Ok(Json(genre))
}

/// GET /directors/{name}
pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Director>, ApiError> {
    let director = state.shared.catalog_service.director_by_name(&name).await?;
    Ok(Json(director))
}
