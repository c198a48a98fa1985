//! Auth gate: bearer token → verified claims → resolved principal.
//!
//! Every failure after the header has been read collapses into `AuthDenied::Rejected`,
//! so a caller cannot tell a bad signature from an expired token or a deleted user.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use tracing::{debug, error};
use uuid::Uuid;

use crate::repos::UserStore;
use crate::services::auth::token_service::TokenService;

/// The authenticated user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthDenied {
    #[error("missing or malformed bearer token")]
    MissingToken,
    #[error("authentication denied")]
    Rejected,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthDenied>;
}

pub struct JwtAuthenticator {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserStore>,
}

impl JwtAuthenticator {
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthDenied> {
        let token = bearer_token(headers).ok_or(AuthDenied::MissingToken)?;

        let claims = self.tokens.verify(token).map_err(|_| AuthDenied::Rejected)?;

        let user = match self.users.find_by_id(claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = %claims.sub, "token subject no longer exists");
                return Err(AuthDenied::Rejected);
            }
            Err(e) => {
                error!(user_id = %claims.sub, error = %e, "failed to resolve token subject");
                return Err(AuthDenied::Rejected);
            }
        };

        Ok(Principal {
            user_id: user.id,
            user_name: user.user_name,
        })
    }
}

/// `Authorization: Bearer <token>`; the scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
