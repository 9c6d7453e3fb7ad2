use rusqlite::Connection;

use crate::error::TaskflowError;

/// The store is a plain key/value table; the task collection lives in one row.
pub fn run_migrations(conn: &Connection) -> Result<(), TaskflowError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}
