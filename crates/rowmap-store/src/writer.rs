//! Row writer: single-statement INSERT of an entity

use crate::coder;
use crate::errors::{insert_error, Result};
use crate::statements::insert_sql;
use rowmap_core::errors::{ExError, ExErrorKind};
use rowmap_core::metadata::TableMapping;
use rowmap_core::model::Entity;
use rowmap_core::naming::IdentifierTranslator;
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use std::time::Instant;

/// Insert every persistable field of `instance` as one row
///
/// All values are encoded before the statement runs, so a bad field value
/// never leaves a partially bound statement behind. Returns the number of
/// rows affected (always 1 on success).
///
/// # Errors
///
/// Returns a configuration error for invalid metadata or field values, or an
/// `Insert` error on a constraint violation (e.g. duplicate primary key) or
/// any other store failure. Nothing is retried.
pub fn insert_row<T: Entity>(
    conn: &Connection,
    translator: &dyn IdentifierTranslator,
    instance: &T,
) -> Result<usize> {
    let table = T::descriptor().name;
    let start = Instant::now();
    log_op_start!("insert_row", table = table);

    let result = execute_insert(conn, translator, instance);

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(rows_affected) => {
            log_op_end!(
                "insert_row",
                duration_ms = duration_ms,
                table = table,
                rows_affected = rows_affected
            );
            Ok(rows_affected)
        }
        Err(e) => {
            log_op_error!("insert_row", e.clone(), duration_ms = duration_ms, table = table);
            Err(e)
        }
    }
}

fn execute_insert<T: Entity>(
    conn: &Connection,
    translator: &dyn IdentifierTranslator,
    instance: &T,
) -> Result<usize> {
    let mapping = TableMapping::derive(T::descriptor(), translator)?;
    let sql = insert_sql(&mapping);

    let params = mapping
        .columns
        .iter()
        .map(|c| {
            let value = instance.field(c.field.name)?;
            coder::encode(c.field, &value)
        })
        .collect::<Result<Vec<SqlValue>>>()?;

    tracing::debug!(table = mapping.table, sql = sql.as_str(), "insert row");
    let rows_affected = conn
        .execute(&sql, params_from_iter(params))
        .map_err(|e| insert_error(mapping.table, e))?;

    if rows_affected != 1 {
        return Err(ExError::new(ExErrorKind::Insert)
            .with_op("insert_row")
            .with_table(mapping.table)
            .with_message(format!("Expected 1 row affected, got {}", rows_affected)));
    }

    Ok(rows_affected)
}
