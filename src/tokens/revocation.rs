use thiserror::Error;

use crate::storage::{Database, StoreError};

use super::redact;

#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("Token is already blacklisted")]
    AlreadyRevoked,
    #[error("Revocation store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl From<StoreError> for RevocationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => RevocationError::AlreadyRevoked,
            other => RevocationError::StoreUnavailable(other),
        }
    }
}

/// Whether a token has been revoked
pub fn is_revoked(db: &Database, token: &str) -> Result<bool, RevocationError> {
    let revoked = db
        .is_token_revoked(token)
        .map_err(RevocationError::StoreUnavailable)?;
    if revoked {
        tracing::debug!(token = %redact(token), "Token is revoked");
    }
    Ok(revoked)
}

/// Revoke a token. Revocation is permanent.
pub fn revoke(db: &Database, token: &str) -> Result<(), RevocationError> {
    match db.put_revoked_token(token) {
        Ok(()) => {
            tracing::info!(token = %redact(token), "Revoked session token");
            Ok(())
        }
        Err(e) => {
            let err = RevocationError::from(e);
            if matches!(err, RevocationError::AlreadyRevoked) {
                tracing::warn!(token = %redact(token), "Token is already blacklisted");
            }
            Err(err)
        }
    }
}
