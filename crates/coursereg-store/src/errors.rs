//! Error helpers for the store
//!
//! Every `rusqlite::Error` is wrapped here with a kind from the taxonomy,
//! the operation name, and the original error kept as the cause.

use coursereg_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// `Concurrency` when SQLite reports the database busy or locked
fn write_kind(err: &rusqlite::Error) -> ExErrorKind {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) =>
        {
            ExErrorKind::Concurrency
        }
        _ => ExErrorKind::Persistence,
    }
}

/// A write could not be committed
pub fn persistence_failure(op: &str, message: &str, err: rusqlite::Error) -> ExError {
    ExError::new(write_kind(&err))
        .with_op(op)
        .with_message(message)
        .with_cause(err)
}

/// A read could not complete
pub fn query_failure(op: &str, message: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Query)
        .with_op(op)
        .with_message(message)
        .with_cause(err)
}

/// Connection-level store error (open, pragma, begin, commit)
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
        .with_cause(err)
}

/// Create a migration error
pub fn migration_error(migration_id: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed", migration_id))
        .with_cause(err)
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Configuration)
        .with_op("load_config")
        .with_message(reason)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
        .with_cause(err)
}
