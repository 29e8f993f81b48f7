//! Schema manager: CREATE and DROP of entity tables

use crate::errors::{schema_error, Result};
use crate::statements::{create_table_sql, drop_table_sql};
use rowmap_core::metadata::TableMapping;
use rowmap_core::model::Entity;
use rowmap_core::naming::IdentifierTranslator;
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, OptionalExtension};
use std::time::Instant;

/// Create the table for `T` if it does not exist yet
///
/// # Errors
///
/// Returns a configuration error for invalid metadata (before any SQL runs)
/// or a `Schema` error if SQLite rejects the statement.
pub fn create_table<T: Entity>(
    conn: &Connection,
    translator: &dyn IdentifierTranslator,
) -> Result<()> {
    let table = T::descriptor().name;
    let start = Instant::now();
    log_op_start!("create_table", table = table);

    let result = execute_create::<T>(conn, translator);

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(column_count) => {
            log_op_end!(
                "create_table",
                duration_ms = duration_ms,
                table = table,
                column_count = column_count
            );
            Ok(())
        }
        Err(e) => {
            log_op_error!("create_table", e.clone(), duration_ms = duration_ms, table = table);
            Err(e)
        }
    }
}

fn execute_create<T: Entity>(
    conn: &Connection,
    translator: &dyn IdentifierTranslator,
) -> Result<usize> {
    let table = T::descriptor().name;
    let mapping = TableMapping::derive(T::descriptor(), translator)?;
    let sql = create_table_sql(&mapping)?;
    tracing::debug!(table = table, sql = sql.as_str(), "create table");
    conn.execute(&sql, [])
        .map_err(|e| schema_error("create_table", table, e))?;
    Ok(mapping.columns.len())
}

/// Drop the table for `T` if it exists
///
/// # Errors
///
/// Returns a `Schema` error if SQLite rejects the statement.
pub fn drop_table<T: Entity>(conn: &Connection) -> Result<()> {
    let table = T::descriptor().name;
    let start = Instant::now();
    log_op_start!("drop_table", table = table);

    let result = conn
        .execute(&drop_table_sql(table), [])
        .map_err(|e| schema_error("drop_table", table, e));

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(_) => {
            log_op_end!("drop_table", duration_ms = duration_ms, table = table);
            Ok(())
        }
        Err(e) => {
            log_op_error!("drop_table", e.clone(), duration_ms = duration_ms, table = table);
            Err(e)
        }
    }
}

/// Whether the table for `T` currently exists
///
/// # Errors
///
/// Returns a `Schema` error if the catalog cannot be queried.
pub fn table_exists<T: Entity>(conn: &Connection) -> Result<bool> {
    let table = T::descriptor().name;
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| schema_error("table_exists", table, e))
}
