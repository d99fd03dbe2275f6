use std::collections::HashMap;
use std::sync::RwLock;

use super::{RecordStore, StoreError, StoreResult};

/// In-memory, HashMap-based record store.
///
/// Intended for tests and embedding. Values are held as the same JSON text the
/// SQLite backend would persist, so serialization behavior is identical.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for InMemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self
            .values
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut map = self
            .values
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut map = self
            .values
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(map.remove(key).is_some())
    }
}
