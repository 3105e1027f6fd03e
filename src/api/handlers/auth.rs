use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::auth_error;
use crate::api::middleware::AuthSession;
use crate::api::response::{ApiError, AppJson, CommonResponse};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub password: String,
    pub username: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<CommonResponse<LoginResponse>>, ApiError> {
    validate_login(&req)?;

    // Password hashing is CPU-bound; keep it off the async workers
    let auth = state.auth.clone();
    let access_token = tokio::task::spawn_blocking(move || auth.login(&req.username, &req.password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Login task panicked");
            ApiError::internal("Internal server error")
        })?
        .map_err(auth_error)?;

    Ok(CommonResponse::success(
        "Login successful",
        LoginResponse { access_token },
    ))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<CommonResponse<()>>, ApiError> {
    state.auth.logout(&session.token).map_err(auth_error)?;

    tracing::info!(subject_id = %session.subject_id, "Logout successful");
    Ok(CommonResponse::success("Logout successful", ()))
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_login(req: &LoginRequest) -> Result<(), ApiError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        tracing::warn!("Login request is missing username or password");
        return Err(ApiError::bad_request("Invalid body request"));
    }
    Ok(())
}
