//! Schema initialization and version checks for the `SQLite` backend.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_COLLECTIONS_TABLE, CREATE_METADATA_TABLE, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, METADATA_TABLE_EXISTS, SELECT_SCHEMA_VERSION,
};

/// Creates the tables and records the current schema version.
///
/// # Errors
///
/// Returns an error if any statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_COLLECTIONS_TABLE, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    Ok(())
}

/// Reads the stored schema version; `0` means the database is uninitialized.
///
/// # Errors
///
/// Returns an error if the query fails or the stored value is not a number.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let tables: i64 = conn.query_row(METADATA_TABLE_EXISTS, [], |row| row.get(0))?;
    if tables == 0 {
        return Ok(0);
    }

    let value: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;
    match value {
        None => Ok(0),
        Some(raw) => raw.parse::<i32>().map_err(|e| Error::InvalidSetting {
            field: "schema_version".into(),
            message: format!("stored value '{raw}' is not a number: {e}"),
        }),
    }
}

/// Initializes a fresh database or verifies an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the database was written
/// by a different schema version.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;
    if version == 0 {
        log::debug!("Initializing store schema version {CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)
    } else if version == CURRENT_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        })
    }
}
