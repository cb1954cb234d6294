use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{validate_movie_id, validate_registration, validate_update};
use super::{ApiError, AppState, RegisterRequest, UpdateUserRequest};
use crate::models::user::User;

/// POST /users
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(payload) = payload?;
    let new_user = validate_registration(&payload)?;

    let user = state.shared.user_service.register(new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{username}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<User>,
    Path(username): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(payload) = payload?;
    let changes = validate_update(&payload)?;

    let user = state.shared.user_service.update(&username, changes).await?;
    tracing::info!(actor = %actor.username, user_id = %user.id, "User profile updated");
    Ok(Json(user))
}

/// POST /users/{username}/movies/{movie_id}
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<String, ApiError> {
    let movie_id = validate_movie_id(&movie_id)?;

    state
        .shared
        .user_service
        .add_favorite(&username, &movie_id)
        .await?;

    Ok(format!("Movie {movie_id} added to {username}'s favorites"))
}

/// DELETE /users/{username}/movies/{movie_id}
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<String, ApiError> {
    let movie_id = validate_movie_id(&movie_id)?;

    state
        .shared
        .user_service
        .remove_favorite(&username, &movie_id)
        .await?;

    Ok(format!("Movie {movie_id} removed from {username}'s favorites"))
}

/// DELETE /users/{username}
pub async fn deregister(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<User>,
    Path(username): Path<String>,
) -> Result<String, ApiError> {
    state.shared.user_service.deregister(&username).await?;
    tracing::info!(actor = %actor.username, "Deregistration completed");

    Ok(format!("User {username} deregistered"))
}
