use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::{UserRow, UserStore};
use crate::services::passwords::{PasswordError, PasswordService};

/// Upper bound on a user's favourites list.
pub const MAX_FAVOURITES: usize = 50;

/// Messages are surfaced to clients as-is.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User Name and password are required")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("User Name already taken")]
    UserNameTaken,
    #[error("Unable to find user {0}")]
    UnknownUserName(String),
    #[error("Incorrect password for user {0}")]
    IncorrectPassword(String),
    #[error("Unable to find user")]
    UserNotFound,
    #[error("Unable to update favourites")]
    FavouritesUpdate,
    #[error("There was an error processing the user")]
    Password(#[from] PasswordError),
    #[error("There was an error processing the user")]
    Store(#[from] RepoError),
    #[error("There was an error processing the user")]
    Worker,
}

#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub user_name: String,
    pub password: String,
    pub password2: Option<String>,
}

/// Credential checks and favourites bookkeeping on top of a `UserStore`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    passwords: PasswordService,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, passwords: PasswordService) -> Self {
        Self { store, passwords }
    }

    /// Returns the confirmation message on success.
    ///
    /// Surrounding whitespace in the user name is not significant.
    pub async fn register(&self, req: RegisterUser) -> Result<String, UserError> {
        let user_name = req.user_name.trim();
        if user_name.is_empty() || req.password.is_empty() {
            return Err(UserError::MissingCredentials);
        }
        if let Some(password2) = &req.password2
            && password2 != &req.password
        {
            return Err(UserError::PasswordMismatch);
        }

        let hash = self.hash(req.password).await?;

        match self.store.create(user_name, &hash).await {
            Ok(row) => {
                info!(user_id = %row.id, "user registered");
                Ok(format!("User {} successfully registered", row.user_name))
            }
            Err(RepoError::Conflict) => Err(UserError::UserNameTaken),
            Err(e) => {
                error!(error = %e, "failed to create user");
                Err(UserError::Store(e))
            }
        }
    }

    pub async fn check_user(&self, user_name: &str, password: &str) -> Result<UserRow, UserError> {
        let user_name = user_name.trim();
        let user = self
            .store
            .find_by_user_name(user_name)
            .await
            .inspect_err(|e| error!(error = %e, "failed to look up user by name"))?
            .ok_or_else(|| UserError::UnknownUserName(user_name.to_string()))?;

        if !self.verify(password, &user.password_hash).await? {
            return Err(UserError::IncorrectPassword(user_name.to_string()));
        }

        Ok(user)
    }

    pub async fn get_favourites(&self, user_id: Uuid) -> Result<Vec<String>, UserError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await
            .inspect_err(|e| error!(user_id = %user_id, error = %e, "failed to load favourites"))?
            .ok_or(UserError::UserNotFound)?;

        Ok(user.favourites)
    }

    pub async fn add_favourite(&self, user_id: Uuid, item: &str) -> Result<Vec<String>, UserError> {
        self.store
            .add_favourite(user_id, item, MAX_FAVOURITES)
            .await
            .inspect_err(|e| error!(user_id = %user_id, error = %e, "failed to add favourite"))?
            .ok_or(UserError::FavouritesUpdate)
    }

    pub async fn remove_favourite(
        &self,
        user_id: Uuid,
        item: &str,
    ) -> Result<Vec<String>, UserError> {
        self.store
            .remove_favourite(user_id, item)
            .await
            .inspect_err(|e| error!(user_id = %user_id, error = %e, "failed to remove favourite"))?
            .ok_or(UserError::FavouritesUpdate)
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash(&self, password: String) -> Result<String, UserError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash_password(&password))
            .await
            .map_err(|_| UserError::Worker)?
            .map_err(UserError::from)
    }

    async fn verify(&self, password: &str, encoded: &str) -> Result<bool, UserError> {
        let passwords = self.passwords.clone();
        let (password, encoded) = (password.to_string(), encoded.to_string());
        tokio::task::spawn_blocking(move || passwords.verify_password(&password, &encoded))
            .await
            .map_err(|_| UserError::Worker)?
            .map_err(UserError::from)
    }
}
