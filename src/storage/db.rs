use std::path::Path;
use std::sync::Arc;

use super::collection::{Collection, JsonFile, Memory, StoreError};
use super::models::{Customer, HistoryEntry, Merchant, PaymentTransaction};
use super::tables::*;

pub(super) struct Collections {
    pub(super) customers: Collection<Customer>,
    pub(super) history: Collection<HistoryEntry>,
    pub(super) merchants: Collection<Merchant>,
    pub(super) payments: Collection<PaymentTransaction>,
    pub(super) revoked_tokens: Collection<String>,
}

/// Handle to every persisted collection. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    pub(super) inner: Arc<Collections>,
}

impl Database {
    /// Open or create the JSON collections in the given directory
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let collections = Collections {
            customers: Collection::new("customers", JsonFile::open(dir.join(CUSTOMERS))?),
            history: Collection::new("history", JsonFile::open(dir.join(HISTORY))?),
            merchants: Collection::new("merchants", JsonFile::open(dir.join(MERCHANTS))?),
            payments: Collection::new(
                "payments",
                JsonFile::open(dir.join(PAYMENT_TRANSACTIONS))?,
            ),
            revoked_tokens: Collection::new(
                "revoked_tokens",
                JsonFile::open(dir.join(BLACKLIST_TOKENS))?,
            ),
        };

        Ok(Self {
            inner: Arc::new(collections),
        })
    }

    /// A database that lives only in memory
    pub fn in_memory() -> Self {
        let collections = Collections {
            customers: Collection::new("customers", Memory::new()),
            history: Collection::new("history", Memory::new()),
            merchants: Collection::new("merchants", Memory::new()),
            payments: Collection::new("payments", Memory::new()),
            revoked_tokens: Collection::new("revoked_tokens", Memory::new()),
        };

        Self {
            inner: Arc::new(collections),
        }
    }

    /// Assemble a database from caller-provided collections
    pub fn from_collections(
        customers: Collection<Customer>,
        history: Collection<HistoryEntry>,
        merchants: Collection<Merchant>,
        payments: Collection<PaymentTransaction>,
        revoked_tokens: Collection<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Collections {
                customers,
                history,
                merchants,
                payments,
                revoked_tokens,
            }),
        }
    }
}
