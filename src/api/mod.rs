use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::AuthService;
use crate::services::credentials::TokenIssuer;
use crate::state::SharedState;

mod about;
pub mod auth;
mod daily_status;
mod error;
mod health;
mod links;
mod observability;
mod payload;
mod recipes;
mod types;
pub mod validation;

pub use error::ApiError;
pub use payload::Payload;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenIssuer {
        &self.shared.tokens
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipes/{id}", get(recipes::get_recipe))
        .route("/recipes/{id}/adjacent", get(recipes::get_adjacent))
        .route("/daily-status", get(daily_status::get_latest))
        .route("/daily-status/history", get(daily_status::get_history))
        .route("/about", get(about::get_about))
        .route("/resources", get(links::list_resources))
        .route("/social-links", get(links::list_social_links))
        .route("/health", get(health::health_check))
        .route("/metrics", get(observability::get_metrics))
        .merge(create_write_router(state.clone()))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Mutating content routes. They sit behind the session guard.
fn create_write_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes", post(recipes::create_recipe))
        .route(
            "/recipes/{id}",
            put(recipes::update_recipe).delete(recipes::delete_recipe),
        )
        .route("/daily-status", post(daily_status::save_daily_status))
        .route("/about", put(about::update_about))
        .route_layer(middleware::from_fn_with_state(state, auth::require_session))
}
