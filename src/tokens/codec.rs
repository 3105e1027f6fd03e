//! Signed session tokens (HS256 JWT).
//!
//! A token carries the subject (customer id), issue and expiry times, a
//! unique id and the `authorized` flag. The codec is built from an explicit
//! [`TokenConfig`] and holds no other state.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TokenConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("Token expired")]
    Expired,
    #[error("Token has an invalid signature or unexpected signing method")]
    InvalidSignature,
    #[error("Token time-to-live must be positive")]
    InvalidTtl,
    #[error("Malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
    #[error("Subject missing or invalid in token")]
    MissingSubjectClaim,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::Malformed(e),
        }
    }
}

/// Session token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub authorized: bool,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issued at, seconds since the epoch
    #[serde(default)]
    pub iat: i64,
    /// Unique token id, so two sessions never share a token string
    #[serde(default)]
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

#[derive(Clone)]
pub struct TokenCodec {
    decoding: DecodingKey,
    encoding: EncodingKey,
    /// Signature and expiry, no leeway
    validation: Validation,
    /// Signature only
    subject_validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let mut subject_validation = validation.clone();
        subject_validation.validate_exp = false;

        Self {
            decoding: DecodingKey::from_secret(secret),
            encoding: EncodingKey::from_secret(secret),
            validation,
            subject_validation,
        }
    }

    /// Issue a token for `subject_id` that expires `ttl` from now
    pub fn issue(&self, subject_id: &str, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(subject_id, ttl, Utc::now())
    }

    /// Issue a token as if it were `issued_at`
    pub fn issue_at(
        &self,
        subject_id: &str,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidTtl);
        }

        let claims = Claims {
            authorized: true,
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            sub: Some(subject_id.to_string()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Check signature, algorithm and expiry.
    ///
    /// Returns the token's `authorized` flag.
    pub fn verify(&self, token: &str) -> Result<bool, TokenError> {
        Ok(self.decode(token)?.authorized)
    }

    /// Decode and fully validate a token
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Read the subject from a token.
    ///
    /// The signature is checked but expiry is not, so an expired token still
    /// yields its subject.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.subject_validation)?;
        match data.claims.sub {
            Some(sub) if !sub.is_empty() => Ok(sub),
            _ => Err(TokenError::MissingSubjectClaim),
        }
    }
}
