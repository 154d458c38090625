use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::v1::extractors::auth_ctx::types::AuthCtx;
use crate::error::AppError;

/// Present only when the gate authenticated the request; anonymous requests
/// hitting a route that extracts `AuthCtx` get a 401.
impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
