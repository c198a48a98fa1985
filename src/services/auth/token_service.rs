use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

/// Validity window of every issued token (3 days).
pub const TOKEN_TTL_SECONDS: i64 = 3 * 24 * 60 * 60;

/// Identity token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Verification failed. Which check failed is deliberately not exposed.
#[derive(Debug, Error)]
#[error("invalid token")]
pub struct InvalidToken;

#[derive(Debug, Error)]
#[error("failed to sign token")]
pub struct SigningError(#[source] jsonwebtoken::errors::Error);

/// Issues and verifies HS256 identity tokens with a process-wide secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(&self, user_id: Uuid, user_name: &str) -> Result<String, SigningError> {
        self.issue_at(user_id, user_name, Utc::now())
    }

    /// Issue a token as if it were signed at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        user_name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, SigningError> {
        let claims = Claims {
            sub: user_id,
            user_name: user_name.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(TOKEN_TTL_SECONDS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, "failed to sign JWT");
                SigningError(e)
            },
        )
    }

    /// Check signature and expiry, then return the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                debug!(kind = ?e.kind(), "token verification failed");
                Err(InvalidToken)
            }
        }
    }
}
