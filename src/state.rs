use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::db::{AccessLevel, Store};
use crate::services::credentials::TokenIssuer;
use crate::services::{AuthService, SeaOrmAuthService};

/// Long-lived dependencies built once at startup and shared by every
/// request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: TokenIssuer,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    /// Opens the elevated store handle. Fails when the store credentials
    /// are missing.
    pub async fn new(config: Config) -> Result<Self> {
        let store = Store::connect(&config.database, AccessLevel::Elevated).await?;
        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let tokens = TokenIssuer::new(config.jwt_secret(), config.auth.token_ttl_days);

        let auth_service: Arc<dyn AuthService> = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
            tokens.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            tokens,
            auth_service,
        }
    }
}
