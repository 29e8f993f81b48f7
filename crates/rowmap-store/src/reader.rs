//! Row reader: primary-key lookup into a fresh entity

use crate::coder;
use crate::errors::{query_error, row_not_found, Result};
use crate::proxy::{Deferred, Loaded};
use crate::statements::select_by_key_sql;
use rowmap_core::errors::OrmError;
use rowmap_core::fetch::RemoteFetcher;
use rowmap_core::metadata::TableMapping;
use rowmap_core::model::Entity;
use rowmap_core::naming::IdentifierTranslator;
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{params_from_iter, Connection};
use std::sync::Arc;
use std::time::Instant;

/// Load the row whose primary key equals the key held by `template`
///
/// Only the primary-key field of `template` is read. The returned instance
/// is built from `T::default()` and populated from the row. Types with
/// `deferred_remote` fields come back as [`Loaded::Deferred`], others as
/// [`Loaded::Plain`].
///
/// # Errors
///
/// - `MissingPrimaryKey` / `DuplicatePrimaryKey` for a bad declaration
/// - `PrimaryKeyUnset` if the template's key is NULL
/// - `NotFound` if no row matches
/// - `Query` if SQLite fails or a column cannot be decoded
pub fn load_row<T: Entity>(
    conn: &Connection,
    translator: &dyn IdentifierTranslator,
    fetcher: &Arc<dyn RemoteFetcher>,
    template: &T,
) -> Result<Loaded<T>> {
    let table = T::descriptor().name;
    let start = Instant::now();
    log_op_start!("load_row", table = table);

    let result = execute_load(conn, translator, fetcher, template);

    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(loaded) => {
            let deferred_count = loaded
                .as_deferred()
                .map_or(0, |proxy| proxy.deferred_fields().count());
            log_op_end!(
                "load_row",
                duration_ms = duration_ms,
                table = table,
                deferred_count = deferred_count
            );
            Ok(loaded)
        }
        Err(e) => {
            log_op_error!("load_row", e.clone(), duration_ms = duration_ms, table = table);
            Err(e)
        }
    }
}

fn execute_load<T: Entity>(
    conn: &Connection,
    translator: &dyn IdentifierTranslator,
    fetcher: &Arc<dyn RemoteFetcher>,
    template: &T,
) -> Result<Loaded<T>> {
    let desc = T::descriptor();
    let mapping = TableMapping::derive(desc, translator)?;
    let key = mapping.primary_key()?;

    let key_value = template.field(key.field.name)?;
    if key_value.is_null() {
        return Err(OrmError::PrimaryKeyUnset {
            type_name: desc.name.to_string(),
            field: key.field.name.to_string(),
        }
        .into());
    }
    let key_param = coder::encode(key.field, &key_value)?;

    let sql = select_by_key_sql(&mapping)?;
    tracing::debug!(table = mapping.table, sql = sql.as_str(), "load row");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| query_error(mapping.table, e))?;
    let mut rows = stmt
        .query(params_from_iter([key_param]))
        .map_err(|e| query_error(mapping.table, e))?;
    let row = rows
        .next()
        .map_err(|e| query_error(mapping.table, e))?
        .ok_or_else(|| row_not_found(mapping.table, &key.column))?;

    let mut instance = T::default();
    for (index, column) in mapping.columns.iter().enumerate() {
        let value = coder::decode(mapping.table, column.field, row, index)?;
        instance.set_field(column.field.name, value)?;
    }

    if !mapping.has_deferred() {
        return Ok(Loaded::Plain(instance));
    }

    Ok(Loaded::Deferred(Deferred::new(instance, Arc::clone(fetcher))?))
}
