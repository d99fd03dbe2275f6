//! SQLite schema definition.

/// Complete database schema for the farm store.
///
/// Every collection is one row: the whole collection serialized as JSON under
/// its namespaced key.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Collections
-- ============================================================================

CREATE TABLE IF NOT EXISTS collections (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON array or object
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
