/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserService, tokens: TokenService, gate: Authenticator
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::UserStore;
use crate::services::auth::{Authenticator, JwtAuthenticator, TokenService};
use crate::services::passwords::PasswordService;
use crate::services::users::UserService;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, passwords: PasswordService, jwt_secret: &[u8]) -> Self {
        let tokens = Arc::new(TokenService::new(jwt_secret));
        let gate = Arc::new(JwtAuthenticator::new(tokens.clone(), store.clone()));
        let users = Arc::new(UserService::new(store, passwords));

        Self {
            users,
            tokens,
            gate,
        }
    }
}
