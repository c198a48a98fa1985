/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - error kind → status は下の表で固定
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthDenied;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Registration rejected by the user store.
    #[error("{0}")]
    ValidationOrConflict(String),
    #[error("{0}")]
    InvalidCredentials(String),
    /// No usable bearer token on the request.
    #[error("unauthorized")]
    Unauthorized,
    /// Token present but refused (signature, expiry, payload or subject).
    #[error("authentication denied")]
    InvalidToken,
    #[error("{0}")]
    Lookup(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationOrConflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::Lookup(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthDenied> for AppError {
    fn from(e: AuthDenied) -> Self {
        match e {
            AuthDenied::MissingToken => AppError::Unauthorized,
            AuthDenied::Rejected => AppError::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        let cases = [
            (AppError::ValidationOrConflict("x".into()), 422),
            (AppError::InvalidCredentials("x".into()), 422),
            (AppError::Unauthorized, 401),
            (AppError::InvalidToken, 403),
            (AppError::Lookup("x".into()), 403),
            (AppError::BadRequest("x".into()), 400),
            (AppError::Internal, 500),
        ];

        for (err, code) in cases {
            assert_eq!(err.status().as_u16(), code, "{err:?}");
        }
    }

    #[tokio::test]
    async fn body_is_a_message_object() {
        let resp = AppError::BadRequest("Unable to update favourites".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Unable to update favourites"}));
    }

    #[test]
    fn denial_reasons_map_to_distinct_statuses() {
        assert_eq!(
            AppError::from(AuthDenied::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthDenied::Rejected).status(),
            StatusCode::FORBIDDEN
        );
    }
}
