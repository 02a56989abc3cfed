//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use crate::constants::auth::DEFAULT_ROLE;
use crate::db::{NewUser, Store};
use crate::models::user::{LoginRequest, RegisterRequest, SessionUser, User};
use crate::services::auth_service::{AuthError, AuthService, LoginResult};
use crate::services::credentials::{TokenIssuer, hash_password_blocking, verify_password_blocking};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
    tokens: TokenIssuer,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig, tokens: TokenIssuer) -> Self {
        Self {
            store,
            security,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        if self.store.email_exists(&request.email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password_blocking(&request.password, &self.security).await?;

        // The unique index still catches a concurrent registration racing
        // past the check above.
        let user = self
            .store
            .create_user(NewUser {
                name: &request.name,
                email: &request.email,
                password_hash: &password_hash,
                role: DEFAULT_ROLE,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResult, AuthError> {
        let Some((user, password_hash)) =
            self.store.get_user_with_password(&request.email).await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password_blocking(&request.password, &password_hash).await? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&SessionUser::from(&user))?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { user, token })
    }
}
