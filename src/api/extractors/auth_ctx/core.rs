use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Principal;
use crate::state::AppState;

/// Handler で Principal を受け取るための extractor
/// middleware が Principal を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（auth gate 未設定のルート）
pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or(AppError::Unauthorized)
    }
}
