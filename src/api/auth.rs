use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_sessions::cookie::{Cookie, SameSite};

use super::validation::{validate_login, validate_registration};
use super::{ApiError, ApiResponse, AppState, LoginDto, Payload};
use crate::constants::auth::TOKEN_COOKIE;
use crate::models::user::{LoginRequest, RegisterRequest, SessionUser, User};

// ============================================================================
// Session tokens
// ============================================================================

/// Pulls the session token from `Authorization: Bearer` or the `token`
/// cookie, in that order.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == TOKEN_COOKIE && !cookie.value().is_empty())
        .map(|cookie| cookie.value().to_string())
}

/// Resolves the caller's session claims.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<SessionUser, ApiError> {
    let token =
        extract_token(headers).ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    Ok(state.tokens().verify(&token)?)
}

fn session_cookie(value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a valid session token when
/// `auth.require_auth_for_writes` is enabled.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config().auth.require_auth_for_writes {
        return Ok(next.run(request).await);
    }

    let user = authenticate(&state, &headers)?;
    tracing::Span::current().record("user_id", user.id.as_str());
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    validate_registration(&payload.0)?;
    let request: RegisterRequest = payload.into_typed()?;

    let user = state.auth_service().register(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            user,
            "User registered successfully",
        )),
    ))
}

/// POST /auth/login
/// Returns the account and token, and sets the token cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<impl IntoResponse, ApiError> {
    validate_login(&payload.0)?;
    let request: LoginRequest = payload.into_typed()?;

    let result = state.auth_service().login(&request).await?;

    let cookie = session_cookie(
        result.token.clone(),
        state.tokens().ttl_seconds(),
        state.config().is_production(),
    );

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(ApiResponse::success_with_message(
            LoginDto {
                user: result.user,
                token: result.token,
            },
            "Login successful",
        )),
    ))
}

/// POST /auth/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = session_cookie(String::new(), 0, state.config().is_production());

    (
        [(header::SET_COOKIE, cookie.to_string())],
        Json(ApiResponse::message("Logged out successfully")),
    )
}

/// GET /auth/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<SessionUser>>, ApiError> {
    let user = authenticate(&state, &headers)?;
    Ok(Json(ApiResponse::success(user)))
}
