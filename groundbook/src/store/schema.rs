//! SQL used by the `SQLite` backend.

/// Schema version this build reads and writes.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value table carrying the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// One row per collection; `document` holds the JSON array of records.
pub const CREATE_COLLECTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS collections (
        name TEXT PRIMARY KEY NOT NULL,
        document TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

pub const METADATA_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'";

pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)";

pub const SELECT_DOCUMENT: &str = "SELECT document FROM collections WHERE name = ?1";

pub const UPSERT_DOCUMENT: &str = r"
    INSERT INTO collections (name, document, updated_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT(name) DO UPDATE SET
        document = excluded.document,
        updated_at = excluded.updated_at
";
