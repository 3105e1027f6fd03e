//! merchant-pay - a small merchant payment API
//!
//! This crate provides customer sessions and payments with:
//! - HS256 JWT session tokens issued at login
//! - Logout through a permanent token revocation list
//! - A session gate middleware in front of protected routes
//! - Flat JSON file storage for every entity, rewritten whole on each write
//! - A best-effort audit trail of logins, logouts and payments
//! - REST API

pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod payment;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod tokens;

use auth::Authenticator;
use config::Config;
use storage::Database;
use tokens::TokenCodec;

/// Shared application state
pub struct AppState {
    pub auth: Authenticator,
    pub config: Config,
    pub db: Database,
    pub tokens: TokenCodec,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let tokens = TokenCodec::new(&config.tokens);
        let auth = Authenticator::new(db.clone(), tokens.clone(), &config.tokens);
        Self {
            auth,
            config,
            db,
            tokens,
        }
    }
}
