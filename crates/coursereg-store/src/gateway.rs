//! Persistence gateway: scoped units of work over the SQLite store
//!
//! The gateway owns the one connection the process uses, opened and
//! migrated once at construction and handed to repositories by reference.
//! Each unit of work locks the connection for its duration; the guard is
//! released on every exit path, including early returns and panics. A
//! panicking unit of work poisons the lock but not the connection: its
//! `Transaction` is rolled back on drop, so the lock is recovered.

use crate::config::DatabaseConfig;
use crate::db;
use crate::errors::{from_rusqlite, persistence_failure, Result};
use crate::migrations::apply_migrations;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct Gateway {
    session: Mutex<Connection>,
    path: PathBuf,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").field("path", &self.path).finish()
    }
}

impl Gateway {
    /// Open the configured database, apply pragmas and pending migrations
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = db::open_configured(config)?;
        Self::from_connection(conn, config)
    }

    /// Fresh private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&DatabaseConfig::in_memory())
    }

    /// Take ownership of an already-open connection
    pub fn from_connection(mut conn: Connection, config: &DatabaseConfig) -> Result<Self> {
        db::configure(&conn, config)?;
        apply_migrations(&mut conn)?;

        tracing::debug!(path = %config.path.display(), "gateway opened");
        Ok(Self {
            session: Mutex::new(conn),
            path: config.path.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire(&self, op: &str) -> MutexGuard<'_, Connection> {
        self.session.lock().unwrap_or_else(|poisoned| {
            tracing::warn!(op, "recovering session after a panicked unit of work");
            self.session.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Run a read-only unit of work without an explicit transaction
    pub fn with_session<T, F>(&self, op: &str, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let session = self.acquire(op);
        work(&session)
    }

    /// Run `work` inside one transaction
    ///
    /// Commits if `work` returns `Ok`; rolls back and returns the error
    /// unchanged otherwise. The transaction is `BEGIN IMMEDIATE`, so the
    /// write lock is held from the first read; other writers wait up to the
    /// configured busy timeout.
    pub fn with_transaction<T, F>(&self, op: &str, work: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut session = self.acquire(op);
        let tx = session
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| persistence_failure(op, "Could not begin transaction", e))?;

        let outcome = work(&tx);
        match outcome {
            Ok(value) => {
                tx.commit()
                    .map_err(|e| persistence_failure(op, "Could not commit transaction", e))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!(op, error = %rollback_err, "rollback failed");
                }
                tracing::debug!(op, err_code = err.code(), "transaction rolled back");
                Err(err)
            }
        }
    }

    /// Close the underlying connection
    pub fn close(self) -> Result<()> {
        let conn = self
            .session
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        conn.close().map_err(|(_, e)| from_rusqlite(e))
    }
}
