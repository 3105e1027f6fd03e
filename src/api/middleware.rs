//! Session gate
//!
//! Guards protected routes. A request passes only with a well-formed
//! `Authorization: Bearer <token>` header whose token verifies, is not
//! revoked and names a subject. The subject and raw token are attached to
//! the request as an [`AuthSession`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::response::ApiError;
use crate::tokens::{redact, revocation};
use crate::AppState;

pub const MISSING_HEADER: &str = "Authorization Header is required";
pub const INVALID_HEADER_FORMAT: &str =
    "Invalid Authorization Header format, must be 'Bearer <token>'";
pub const INVALID_TOKEN: &str = "Invalid or expired token";
pub const REVOKED_TOKEN: &str = "Token is already blacklisted";
pub const INVALID_TOKEN_DATA: &str = "Invalid token data";

/// The authenticated caller of a request
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub subject_id: String,
    pub token: String,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthSession>().cloned().ok_or_else(|| {
            tracing::warn!("User ID not found in request context");
            ApiError::unauthorized("User ID not found")
        })
    }
}

/// Middleware that admits only requests carrying a live session token.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    tracing::debug!(path = %path, "Validating Authorization header");

    let token = bearer_token(request.headers().get(AUTHORIZATION))?.to_string();

    match state.tokens.verify(&token) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(path = %path, "Token is not authorized");
            return Err(ApiError::unauthorized(INVALID_TOKEN));
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Error verifying token");
            return Err(ApiError::unauthorized(INVALID_TOKEN));
        }
    }

    match revocation::is_revoked(&state.db, &token) {
        Ok(false) => {}
        Ok(true) => {
            tracing::warn!(path = %path, token = %redact(&token), "Token is already blacklisted");
            return Err(ApiError::forbidden(REVOKED_TOKEN));
        }
        Err(e) => {
            tracing::error!(error = %e, "Error checking blacklist status");
            return Err(ApiError::internal("Internal server error"));
        }
    }

    let subject_id = state.tokens.extract_subject(&token).map_err(|e| {
        tracing::warn!(path = %path, error = %e, "Error extracting subject from token");
        ApiError::unauthorized(INVALID_TOKEN_DATA)
    })?;

    tracing::debug!(path = %path, subject_id = %subject_id, "Session accepted");
    request
        .extensions_mut()
        .insert(AuthSession { subject_id, token });

    Ok(next.run(request).await)
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The header must be exactly two space-separated parts, the first being
/// the case-sensitive literal `Bearer`.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, ApiError> {
    let header = header.ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        ApiError::unauthorized(MISSING_HEADER)
    })?;

    let value = header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        ApiError::unauthorized(INVALID_HEADER_FORMAT)
    })?;

    match value.split(' ').collect::<Vec<_>>().as_slice() {
        [scheme, token] if *scheme == "Bearer" => Ok(*token),
        _ => {
            tracing::warn!("Invalid Authorization header format");
            Err(ApiError::unauthorized(INVALID_HEADER_FORMAT))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn message(err: ApiError) -> (StatusCode, String) {
        match err {
            ApiError::Fail(code, msg) | ApiError::Error(code, msg) => (code, msg),
        }
    }

    #[test]
    fn test_missing_header() {
        let (code, msg) = message(bearer_token(None).unwrap_err());
        assert_eq!(code, StatusCode::UNAUTHORIZED);
        assert_eq!(msg, MISSING_HEADER);
    }

    #[test]
    fn test_well_formed_header() {
        let header = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&header)).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_empty_token_passes_format_check() {
        let header = HeaderValue::from_static("Bearer ");
        assert_eq!(bearer_token(Some(&header)).unwrap(), "");
    }

    #[test]
    fn test_malformed_headers() {
        for raw in [
            "abc.def.ghi",
            "bearer abc.def.ghi",
            "Basic dXNlcjpwYXNz",
            "Bearer",
            "Bearer  abc",
            "Bearer abc def",
            "Token abc",
        ] {
            let header = HeaderValue::from_static(raw);
            let (code, msg) = message(bearer_token(Some(&header)).unwrap_err());
            assert_eq!(code, StatusCode::UNAUTHORIZED, "{raw}");
            assert_eq!(msg, INVALID_HEADER_FORMAT, "{raw}");
        }
    }
}
