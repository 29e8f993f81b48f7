//! SQL text generation from table mappings
//!
//! Column order always follows the mapping, which follows field declaration
//! order, so positional parameters line up with `TableMapping::columns`.

use crate::coder;
use crate::errors::Result;
use rowmap_core::metadata::TableMapping;

/// `CREATE TABLE IF NOT EXISTS <table>(<col> <TYPE>[ PRIMARY KEY], ...)`
///
/// # Errors
///
/// Returns `UnsupportedType` if any column has no storage type.
pub fn create_table_sql(mapping: &TableMapping) -> Result<String> {
    let columns = mapping
        .columns
        .iter()
        .map(|c| {
            let sql_type = coder::sql_type(c.field)?;
            let key = if c.field.is_primary_key() {
                " PRIMARY KEY"
            } else {
                ""
            };
            Ok(format!("{} {}{}", c.column, sql_type, key))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {}({})",
        mapping.table,
        columns.join(", ")
    ))
}

/// `DROP TABLE IF EXISTS <table>`
pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", table)
}

/// `INSERT INTO <table> (<cols>) VALUES (?, ...)`
pub fn insert_sql(mapping: &TableMapping) -> String {
    let placeholders = vec!["?"; mapping.columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        mapping.table,
        mapping.column_names().join(", "),
        placeholders.join(", ")
    )
}

/// `SELECT <cols> FROM <table> WHERE <pk> = ?`
///
/// # Errors
///
/// Returns `MissingPrimaryKey` if the mapping has no key column.
pub fn select_by_key_sql(mapping: &TableMapping) -> Result<String> {
    let key = mapping.primary_key()?;
    Ok(format!(
        "SELECT {} FROM {} WHERE {} = ?",
        mapping.column_names().join(", "),
        mapping.table,
        key.column
    ))
}
