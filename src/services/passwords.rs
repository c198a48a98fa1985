use argon2::{
    Algorithm, Argon2, ParamsBuilder, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use thiserror::Error;

const SALT_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("password hash error: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("failed to generate salt: {0}")]
    Rng(getrandom::Error),
}

/// Argon2id hashing for stored credentials.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordService").finish_non_exhaustive()
    }
}

impl PasswordService {
    pub fn new() -> Result<Self, PasswordError> {
        Self::with_cost(19 * 1024, 2) // 19 MiB, 2 passes
    }

    /// `m_cost_kib` is the memory cost in KiB, `t_cost` the number of passes.
    pub fn with_cost(m_cost_kib: u32, t_cost: u32) -> Result<Self, PasswordError> {
        let mut builder = ParamsBuilder::new();
        builder.m_cost(m_cost_kib);
        builder.t_cost(t_cost);
        builder.p_cost(1);
        let params = builder.build().map_err(PasswordError::Params)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        Ok(Self { argon2 })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        getrandom::fill(&mut salt_bytes).map_err(PasswordError::Rng)?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(PasswordError::Hash)?;

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(PasswordError::Hash)?
            .to_string();
        Ok(hash)
    }

    /// `Ok(false)` means a well-formed hash that does not match.
    pub fn verify_password(&self, password: &str, encoded: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(encoded).map_err(PasswordError::Hash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordError::Hash(err)),
        }
    }
}
