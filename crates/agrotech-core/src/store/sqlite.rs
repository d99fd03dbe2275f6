//! SQLite-backed record store.

use super::{RecordStore, StoreResult};
use crate::db::Database;

impl RecordStore for Database {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_value(key)?)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        Ok(self.put_value(key, value)?)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        Ok(self.delete_value(key)?)
    }
}
