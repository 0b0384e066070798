//! Database connection management
//!
//! Every database is a private in-memory SQLite instance.

#![allow(clippy::result_large_err)]

use crate::errors::{engine_incompatible, from_rusqlite_init, Result};
use rusqlite::{Batch, Connection};

/// Open a fresh in-memory database
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite_init)
}

/// Version string reported by the linked SQLite library
pub fn sqlite_version(conn: &Connection) -> Result<String> {
    conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))
        .map_err(from_rusqlite_init)
}

/// Open a scratch database and confirm the engine answers
///
/// Returns the engine version on success.
pub fn self_check() -> Result<String> {
    let conn = open_in_memory()?;
    let version = sqlite_version(&conn)?;
    if !version.starts_with("3.") {
        return Err(engine_incompatible(&version));
    }
    Ok(version)
}

/// Run every statement in `sql`, stepping queries to completion
///
/// Rows are discarded. Statements before a failing one stay applied.
pub fn exec_batch(conn: &Connection, sql: &str) -> rusqlite::Result<()> {
    let mut batch = Batch::new(conn, sql);
    while let Some(mut stmt) = batch.next()? {
        let mut rows = stmt.raw_query();
        while rows.next()?.is_some() {}
    }
    Ok(())
}
