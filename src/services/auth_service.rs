//! Domain service for registration and login.

use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::user::{LoginRequest, RegisterRequest, User};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User with this email already exists")]
    EmailTaken,

    /// Unknown email and wrong password share this variant.
    #[error("{}", crate::constants::auth::INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => Self::EmailTaken,
            StoreError::ReadOnly => Self::Internal(err.to_string()),
            StoreError::Corrupt(_) | StoreError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Login result containing the account and its session token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account with the default role. The password is hashed
    /// before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is already registered.
    async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError>;

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResult, AuthError>;
}
