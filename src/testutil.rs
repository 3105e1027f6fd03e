//! Shared test helpers for the `#[cfg(test)]` modules in the crate.

use std::sync::Arc;

use chrono::Utc;
use tempfile::TempDir;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::config::{Config, ServerConfig, TokenConfig};
use crate::storage::models::{Customer, Merchant};
use crate::storage::{
    Collection, Database, Medium, Memory, StoreError, BLACKLIST_TOKENS, HISTORY,
};
use crate::AppState;

/// Open a fresh JSON-file database in a temporary directory.
///
/// Returns both the `Database` and the `TempDir` guard. Keep the guard alive
/// for the duration of the test.
pub fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path()).unwrap();
    (db, temp_dir)
}

/// A database that never touches disk.
pub fn memory_db() -> Database {
    Database::in_memory()
}

/// A medium that reads as empty and fails every write.
struct Unwritable(&'static str);

impl<T> Medium<T> for Unwritable {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(Vec::new())
    }

    fn save(&self, _records: &[T]) -> Result<(), StoreError> {
        Err(StoreError::Write {
            path: self.0.into(),
            source: std::io::Error::other("disk full"),
        })
    }
}

/// An in-memory database whose audit history cannot be written.
pub fn failing_history_db() -> Database {
    Database::from_collections(
        Collection::new("customers", Memory::new()),
        Collection::new("history", Unwritable(HISTORY)),
        Collection::new("merchants", Memory::new()),
        Collection::new("payments", Memory::new()),
        Collection::new("revoked_tokens", Memory::new()),
    )
}

/// An in-memory database whose revocation list can be read but not written.
pub fn failing_revocation_db() -> Database {
    Database::from_collections(
        Collection::new("customers", Memory::new()),
        Collection::new("history", Memory::new()),
        Collection::new("merchants", Memory::new()),
        Collection::new("payments", Memory::new()),
        Collection::new("revoked_tokens", Unwritable(BLACKLIST_TOKENS)),
    )
}

/// A minimal `Config` suitable for unit tests.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:4000".to_string(),
            data_dir: "/tmp/test".to_string(),
        },
        tokens: TokenConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            ttl_seconds: 600,
        },
    }
}

/// Build a full `Arc<AppState>` around the given database.
pub fn test_state(db: Database) -> Arc<AppState> {
    Arc::new(AppState::new(test_config(), db))
}

/// Create a `Customer` with a hashed password.
pub fn make_customer(username: &str, password: &str) -> Customer {
    let now = Utc::now();
    Customer {
        created_at: now,
        id: Uuid::new_v4(),
        password_hash: hash_password(password).unwrap(),
        updated_at: now,
        username: username.to_string(),
    }
}

/// Create a `Merchant` with the given name.
pub fn make_merchant(name: &str) -> Merchant {
    let now = Utc::now();
    Merchant {
        created_at: now,
        id: Uuid::new_v4(),
        name: name.to_string(),
        updated_at: now,
    }
}
