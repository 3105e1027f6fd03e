//! Generic keyed-record collections over a pluggable backing medium.
//!
//! Every entity the service persists is a whole-list collection: reads load
//! the full list, writes rewrite it. The medium decides where the list lives
//! (a JSON file on disk, or memory for tests).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Record {0} already exists")]
    Duplicate(String),
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A persisted record with a unique key.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Key: PartialEq + fmt::Display + ?Sized;

    fn key(&self) -> &Self::Key;
}

/// Revoked tokens are stored as bare strings, keyed by themselves.
impl Record for String {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

/// Whole-list storage for one collection.
pub trait Medium<T>: Send + Sync {
    fn load(&self) -> Result<Vec<T>, StoreError>;
    fn save(&self, records: &[T]) -> Result<(), StoreError>;
}

/// A JSON array in a single file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Open the file at `path`, creating it as an empty array if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            fs::write(&path, b"[]").map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "Created empty collection file");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Medium<T> for JsonFile {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the target and rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &data).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// An in-process list. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct Memory<T> {
    records: Mutex<Vec<T>>,
}

impl<T> Memory<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone + Send + Sync> Medium<T> for Memory<T> {
    fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.lock().clone())
    }

    fn save(&self, records: &[T]) -> Result<(), StoreError> {
        *self.records.lock() = records.to_vec();
        Ok(())
    }
}

/// A named collection of records of one type.
pub struct Collection<T: Record> {
    medium: Box<dyn Medium<T>>,
    name: &'static str,
    /// Serializes load-modify-save cycles within this process
    write_lock: Mutex<()>,
}

impl<T: Record> Collection<T> {
    pub fn new(name: &'static str, medium: impl Medium<T> + 'static) -> Self {
        Self {
            medium: Box::new(medium),
            name,
            write_lock: Mutex::new(()),
        }
    }

    /// Load every record
    pub fn load(&self) -> Result<Vec<T>, StoreError> {
        let records = self.medium.load()?;
        tracing::trace!(collection = self.name, count = records.len(), "Loaded collection");
        Ok(records)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Get a record by key
    pub fn get(&self, key: &T::Key) -> Result<Option<T>, StoreError> {
        self.find(|record| record.key() == key)
    }

    /// First record matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Result<Option<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.load()?.into_iter().find(|record| predicate(record)))
    }

    pub fn contains(&self, key: &T::Key) -> Result<bool, StoreError> {
        Ok(self.load()?.iter().any(|record| record.key() == key))
    }

    /// Append a record unless one with the same key exists.
    ///
    /// The load, duplicate scan, append and save happen under the collection
    /// lock, so concurrent inserts in this process never overwrite each other.
    pub fn insert(&self, record: T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();

        let mut records = self.medium.load()?;
        if records.iter().any(|existing| existing.key() == record.key()) {
            return Err(StoreError::Duplicate(record.key().to_string()));
        }

        records.push(record);
        self.medium.save(&records)?;
        tracing::debug!(collection = self.name, count = records.len(), "Saved collection");
        Ok(())
    }
}
