//! Schema versioning for the planner database.
//!
//! The version lives in the `metadata` table. Each step in [`STEPS`] moves
//! the schema up by one version and runs in its own transaction together with
//! the version bump, so an interrupted upgrade resumes at the failed step.

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::{CREATE_ITEMS_TABLE, CREATE_METADATA_TABLE};

/// Schema version this build writes.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// Upgrade steps; entry `n` brings a database from version `n` to `n + 1`.
const STEPS: &[&str] = &[CREATE_ITEMS_TABLE];

/// Bring `conn` up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the stored version is unreadable, newer than this
/// build understands, or an upgrade step fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    let stored = schema_version(conn)?;
    if stored > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {stored} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for version in stored..CURRENT_VERSION {
        apply_step(conn, version)?;
    }
    Ok(())
}

/// The stored schema version; 0 for a database never initialized.
///
/// # Errors
///
/// Returns an error if the metadata query fails or the value is not a number.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn apply_step(conn: &Connection, from: i32) -> Result<()> {
    let step = usize::try_from(from)
        .ok()
        .and_then(|index| STEPS.get(index))
        .ok_or_else(|| Error::DatabaseMigration {
            message: format!("no upgrade step from version {from}"),
        })?;

    let to = from + 1;
    debug!(from, to, "Upgrading planner schema");
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(step)?;
    tx.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, to.to_string()),
    )?;
    tx.commit()?;
    info!(version = to, "Planner schema upgraded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn has_table(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_steps_cover_current_version() {
        assert_eq!(STEPS.len(), usize::try_from(CURRENT_VERSION).unwrap());
    }

    #[test]
    fn test_fresh_database_reaches_current_version() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();

        assert!(has_table(&conn, "items"));
        assert!(has_table(&conn, "metadata"));
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_reinitialize_keeps_data() {
        let conn = fresh();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO items (origin, key, value) VALUES ('local', 'trips', '[]')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_unset_version_is_zero() {
        let conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_garbage_version_rejected() {
        let conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES ('schema_version', 'one')",
            [],
        )
        .unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("invalid schema version"));
    }

    #[test]
    fn test_newer_database_rejected() {
        let conn = fresh();
        conn.execute(CREATE_METADATA_TABLE, []).unwrap();
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES ('schema_version', '99')",
            [],
        )
        .unwrap();

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
        assert!(!has_table(&conn, "items"));
    }
}
