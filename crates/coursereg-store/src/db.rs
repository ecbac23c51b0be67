//! Connection management
//!
//! Opening and configuring the single SQLite connection the gateway owns.

use crate::config::{DatabaseConfig, JournalMode};
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Path value that selects an in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the database the config points at, creating parent directories
pub fn open_configured(config: &DatabaseConfig) -> Result<Connection> {
    if config.path.as_os_str() == MEMORY_PATH {
        return open_in_memory();
    }
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::errors::io_error("create_db_dir", e))?;
        }
    }
    open(&config.path)
}

/// Apply connection pragmas
pub fn configure(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(from_rusqlite)?;

    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(from_rusqlite)?;

    // journal_mode returns the resulting mode as a row
    let mode = match config.journal_mode {
        JournalMode::Wal => "WAL",
        JournalMode::Delete => "DELETE",
        JournalMode::Memory => "MEMORY",
    };
    conn.pragma_update_and_check(None, "journal_mode", mode, |_| Ok(()))
        .map_err(from_rusqlite)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_enables_foreign_keys() {
        let conn = open_in_memory().unwrap();
        configure(&conn, &DatabaseConfig::default()).unwrap();

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_open_configured_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("nested").join("store.db"),
            ..DatabaseConfig::default()
        };

        let conn = open_configured(&config).unwrap();
        configure(&conn, &config).unwrap();
        assert!(config.path.exists());
    }
}
