/*
 * Responsibility
 * - /user/favourites 系 handler (auth gate 通過後のみ到達)
 * - 対象ユーザーは常に Principal 本人
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::extractors::AuthPrincipal,
    error::AppError,
    state::AppState,
};

pub async fn get_favourites(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> Result<Json<Vec<String>>, AppError> {
    let favourites = state
        .users
        .get_favourites(principal.user_id)
        .await
        .map_err(|e| AppError::Lookup(e.to_string()))?;

    Ok(Json(favourites))
}

pub async fn add_favourite(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let favourites = state
        .users
        .add_favourite(principal.user_id, &id)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(favourites))
}

pub async fn remove_favourite(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let favourites = state
        .users
        .remove_favourite(principal.user_id, &id)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(favourites))
}
