//! Caller identity from JWT bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::UserId;

/// Extractor that requires a valid JWT token and yields the caller's id
///
/// The token is read from the `Authorization: Bearer <jwt>` header; its
/// `sub` claim must be a positive integer.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser(pub UserId);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        let claims = state.jwt_service.validate(&token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        let user = claims.user_id().map_err(|e| {
            debug!(error = %e, "Token subject is not a user id");
            ApiError::unauthorized("Invalid token subject")
        })?;

        Ok(RequireUser(user))
    }
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();

            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide JWT token via 'Authorization: Bearer <token>' header",
    ))
}
