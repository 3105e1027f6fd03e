//! Customer login and logout.

pub mod password;

use chrono::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::audit::{self, Outcome};
use crate::config::TokenConfig;
use crate::storage::models::HistoryAction;
use crate::storage::{Database, StoreError};
use crate::tokens::{revocation, RevocationError, TokenCodec, TokenError};

pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token is already blacklisted")]
    AlreadyRevoked,
    #[error("Invalid credential")]
    InvalidCredentials,
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<RevocationError> for AuthError {
    fn from(e: RevocationError) -> Self {
        match e {
            RevocationError::AlreadyRevoked => AuthError::AlreadyRevoked,
            RevocationError::StoreUnavailable(e) => AuthError::Store(e),
        }
    }
}

/// Issues and revokes customer sessions
#[derive(Clone)]
pub struct Authenticator {
    codec: TokenCodec,
    db: Database,
    ttl: Duration,
}

impl Authenticator {
    pub fn new(db: Database, codec: TokenCodec, config: &TokenConfig) -> Self {
        Self {
            codec,
            db,
            ttl: Duration::seconds(config.ttl_seconds as i64),
        }
    }

    /// Check credentials and issue a session token
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        tracing::info!(username = %username, "Attempting login");

        let customer = match self.db.get_customer_by_username(username) {
            Ok(Some(customer)) => customer,
            Ok(None) => {
                audit::record(
                    &self.db,
                    None,
                    HistoryAction::Login,
                    Outcome::Failure,
                    format!("Login failed because customer with username {username} not exists"),
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                audit::record(
                    &self.db,
                    None,
                    HistoryAction::Login,
                    Outcome::Failure,
                    format!("Login failed: {e}"),
                );
                return Err(e.into());
            }
        };

        if !verify_password(&customer.password_hash, password) {
            audit::record(
                &self.db,
                Some(customer.id),
                HistoryAction::Login,
                Outcome::Failure,
                "Invalid credential",
            );
            return Err(AuthError::InvalidCredentials);
        }

        let token = match self.codec.issue(&customer.id.to_string(), self.ttl) {
            Ok(token) => token,
            Err(e) => {
                audit::record(
                    &self.db,
                    Some(customer.id),
                    HistoryAction::Login,
                    Outcome::Failure,
                    format!("Failed to generate access token: {e}"),
                );
                return Err(e.into());
            }
        };

        audit::record(
            &self.db,
            Some(customer.id),
            HistoryAction::Login,
            Outcome::Success,
            "Login successful",
        );
        Ok(token)
    }

    /// Revoke a session token
    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        let subject = match self.codec.extract_subject(token) {
            Ok(subject) => subject,
            Err(e) => {
                audit::record(
                    &self.db,
                    None,
                    HistoryAction::Logout,
                    Outcome::Failure,
                    format!("Logout failed: {e}"),
                );
                return Err(e.into());
            }
        };
        let customer_id = Uuid::parse_str(&subject).ok();

        if let Err(e) = revocation::revoke(&self.db, token) {
            audit::record(
                &self.db,
                customer_id,
                HistoryAction::Logout,
                Outcome::Failure,
                format!("Failed to blacklist token: {e}"),
            );
            return Err(e.into());
        }

        audit::record(
            &self.db,
            customer_id,
            HistoryAction::Logout,
            Outcome::Success,
            "Logout successful",
        );
        Ok(())
    }
}
