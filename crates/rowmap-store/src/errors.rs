//! Error handling for rowmap-store
//!
//! Wraps rowmap-core ExError with store-specific helpers

use rowmap_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

fn store_error(kind: ExErrorKind, op: &str, table: &str, err: rusqlite::Error) -> ExError {
    ExError::new(kind)
        .with_op(op.to_string())
        .with_table(table.to_string())
        .with_message(err.to_string())
}

/// Create a schema error (CREATE/DROP failed)
pub fn schema_error(op: &str, table: &str, err: rusqlite::Error) -> ExError {
    store_error(ExErrorKind::Schema, op, table, err)
}

/// Create an insert error (constraint violation or store failure)
pub fn insert_error(table: &str, err: rusqlite::Error) -> ExError {
    if is_constraint_violation(&err) {
        return ExError::new(ExErrorKind::Insert)
            .with_op("insert_row")
            .with_table(table.to_string())
            .with_message(format!("Constraint violation: {}", err));
    }
    store_error(ExErrorKind::Insert, "insert_row", table, err)
}

/// Create a query error (SELECT failed or a column could not be read)
pub fn query_error(table: &str, err: rusqlite::Error) -> ExError {
    store_error(ExErrorKind::Query, "load_row", table, err)
}

/// Create a not-found error for a primary-key lookup
pub fn row_not_found(table: &str, key_column: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("load_row")
        .with_table(table.to_string())
        .with_field(key_column.to_string())
        .with_message("No row matches the primary key")
}

/// Create a remote fetch error
pub fn fetch_error(url: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Fetch)
        .with_op("fetch")
        .with_message(format!("Fetching {} failed: {}", url, reason))
}

/// Create a configuration parse error
pub fn config_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_config")
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Whether a rusqlite error is a constraint violation (e.g. duplicate key)
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
