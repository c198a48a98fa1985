/*
 * Responsibility
 * - /user 系の request/response DTO
 * - 中身の検証は UserService 側 (ここでは形だけ)
 */
use serde::{Deserialize, Serialize};

use crate::services::users::RegisterUser;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "userName")]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub password2: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            user_name: req.username,
            password: req.password,
            password2: req.password2,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "userName")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_spellings_of_user_name() {
        let a: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw123"}"#).unwrap();
        let b: LoginRequest =
            serde_json::from_str(r#"{"userName":"alice","password":"pw123"}"#).unwrap();
        assert_eq!(a.username, b.username);
    }

    #[test]
    fn password2_is_optional() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"userName":"alice","password":"pw123"}"#).unwrap();
        assert!(req.password2.is_none());

        let user = RegisterUser::from(req);
        assert_eq!(user.user_name, "alice");
    }
}
