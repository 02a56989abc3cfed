use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Untyped JSON object body. Malformed bodies are rejected with the
/// standard 400 envelope instead of axum's plain-text rejection.
pub struct Payload(pub Value);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        if !value.is_object() {
            return Err(ApiError::validation("Request body must be a JSON object"));
        }

        Ok(Self(value))
    }
}

impl Payload {
    /// Deserializes into an allow-listed request type. Unknown fields are
    /// dropped.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.0)
            .map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))
    }
}
