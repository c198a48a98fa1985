/*
 * Responsibility
 * - POST /user/register, POST /user/login
 * - 失敗は UserService のメッセージをそのまま 422 で返す
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{error, info};

use crate::{
    api::dto::users::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse},
    error::AppError,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::ValidationOrConflict(e.body_text()))?;

    let message = state
        .users
        .register(req.into())
        .await
        .map_err(|e| AppError::ValidationOrConflict(e.to_string()))?;

    Ok(Json(MessageResponse { message }))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidCredentials(e.body_text()))?;

    let user = state
        .users
        .check_user(&req.username, &req.password)
        .await
        .map_err(|e| AppError::InvalidCredentials(e.to_string()))?;

    let token = state.tokens.issue(user.id, &user.user_name).map_err(|e| {
        error!(user_id = %user.id, error = %e, "failed to issue token");
        AppError::Internal
    })?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}
