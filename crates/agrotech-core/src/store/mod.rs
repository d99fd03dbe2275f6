//! Local record store.
//!
//! A key-value persistence layer for named collections. Each collection is
//! stored whole, as JSON, under its namespaced key. Two backends implement
//! [`RecordStore`]:
//!
//! - [`Database`](crate::db::Database) -- SQLite file on the device
//! - [`InMemoryStore`] -- `HashMap`-based store for tests and embedding
//!
//! Loading never fails on bad data: an absent key or a value that no longer
//! deserializes yields the caller's fallback. Storage I/O errors still
//! propagate.

mod memory;
mod sqlite;

pub use memory::InMemoryStore;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::db::DbError;

/// Prefix shared by every storage key.
pub const KEY_PREFIX: &str = "agrotech_";

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Animals,
    Paddocks,
    Lots,
    Vaccines,
    HealthRecords,
    MilkRecords,
    BirthRecords,
    Property,
    User,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 9] = [
        CollectionKey::Animals,
        CollectionKey::Paddocks,
        CollectionKey::Lots,
        CollectionKey::Vaccines,
        CollectionKey::HealthRecords,
        CollectionKey::MilkRecords,
        CollectionKey::BirthRecords,
        CollectionKey::Property,
        CollectionKey::User,
    ];

    /// Collection name without the prefix.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Animals => "animals",
            Self::Paddocks => "paddocks",
            Self::Lots => "lots",
            Self::Vaccines => "vaccines",
            Self::HealthRecords => "health_records",
            Self::MilkRecords => "milk_records",
            Self::BirthRecords => "birth_records",
            Self::Property => "property",
            Self::User => "user",
        }
    }

    /// Namespaced key used by the backends.
    pub fn storage_key(&self) -> String {
        format!("{KEY_PREFIX}{}", self.name())
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key-value persistence of serialized collections.
pub trait RecordStore: Send {
    /// Raw JSON under a storage key, `None` if absent.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the raw JSON under a storage key.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a storage key. Returns `true` if it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Load a collection, or `fallback` when it is absent or malformed.
    fn load<T>(&self, key: CollectionKey, fallback: T) -> StoreResult<T>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        let storage_key = key.storage_key();
        let Some(raw) = self.read(&storage_key)? else {
            debug!(collection = %key, "collection absent; using fallback");
            return Ok(fallback);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(collection = %key, error = %e, "malformed stored collection; using fallback");
                Ok(fallback)
            }
        }
    }

    /// Serialize and store a whole collection.
    fn save<T>(&self, key: CollectionKey, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.write(&key.storage_key(), &json)?;
        debug!(collection = %key, bytes = json.len(), "collection saved");
        Ok(())
    }

    /// Delete a collection.
    fn clear(&self, key: CollectionKey) -> StoreResult<bool>
    where
        Self: Sized,
    {
        self.remove(&key.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_keys() {
        assert_eq!(CollectionKey::Animals.storage_key(), "agrotech_animals");
        assert_eq!(
            CollectionKey::HealthRecords.storage_key(),
            "agrotech_health_records"
        );
        assert_eq!(CollectionKey::User.storage_key(), "agrotech_user");
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            CollectionKey::ALL.iter().map(|k| k.storage_key()).collect();
        assert_eq!(keys.len(), CollectionKey::ALL.len());
    }
}
