use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TaskflowError;

use super::migrations;

pub const DB_FILE: &str = "taskflow.db";

/// Path to the database inside a data home.
pub fn db_path(home: &Path) -> PathBuf {
    home.join(DB_FILE)
}

/// Open (creating if needed) the database under `home` and bring the schema
/// up to date. Safe to call on every start.
pub fn open_db(home: &Path) -> Result<Connection, TaskflowError> {
    fs::create_dir_all(home).map_err(|e| {
        TaskflowError::storage(format!("cannot create {}: {e}", home.display()))
    })?;
    let conn = Connection::open(db_path(home))?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, TaskflowError> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskflowError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_home_and_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let home = dir.path().join("nested").join("taskflow");
        open_db(&home).unwrap();
        assert!(db_path(&home).exists());
        open_db(&home).unwrap();
    }
}
