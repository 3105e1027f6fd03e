mod auth;
mod health;
mod payment;

use crate::api::middleware::{INVALID_TOKEN, REVOKED_TOKEN};
use crate::api::response::ApiError;
use crate::auth::AuthError;
use crate::payment::PaymentError;

pub use auth::{login, logout, LoginRequest, LoginResponse};
pub use health::health;
pub use payment::{add_payment, PaymentResponse};

/// Map an AuthError to an ApiError
fn auth_error(e: AuthError) -> ApiError {
    match e {
        AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credential"),
        AuthError::AlreadyRevoked => ApiError::forbidden(REVOKED_TOKEN),
        AuthError::Token(e) => {
            tracing::warn!(error = %e, "Rejected token");
            ApiError::unauthorized(INVALID_TOKEN)
        }
        AuthError::Store(e) => {
            tracing::error!(error = %e, "Storage failure during authentication");
            ApiError::internal("Internal server error")
        }
    }
}

/// Map a PaymentError to an ApiError
fn payment_error(e: PaymentError) -> ApiError {
    match e {
        PaymentError::Store(e) => {
            tracing::error!(error = %e, "Storage failure while adding payment");
            ApiError::internal("Internal server error")
        }
        other => {
            tracing::warn!(error = %other, "Error adding payment");
            ApiError::bad_request(other.to_string())
        }
    }
}
