//! Value coder: semantic types to SQLite storage and back
//!
//! | Semantic type | Storage type |
//! |---------------|--------------|
//! | Text          | TEXT         |
//! | Integer       | INTEGER      |
//! | RawBytes      | BLOB         |

use crate::errors::{query_error, Result};
use rowmap_core::errors::OrmError;
use rowmap_core::model::{FieldDescriptor, SemanticType, Value};
use rusqlite::types::Value as SqlValue;
use rusqlite::Row;

const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

fn unsupported(field: &FieldDescriptor) -> OrmError {
    OrmError::UnsupportedType {
        field: field.name.to_string(),
        declared: field.semantic_type.to_string(),
    }
}

/// SQL column type for a field
///
/// # Errors
///
/// Returns `UnsupportedType` for types outside the storage table.
pub fn sql_type(field: &FieldDescriptor) -> Result<&'static str> {
    match field.semantic_type {
        SemanticType::Text => Ok("TEXT"),
        SemanticType::Integer => Ok("INTEGER"),
        SemanticType::RawBytes => Ok("BLOB"),
        SemanticType::Other(_) => Err(unsupported(field).into()),
    }
}

/// Encode a field value as a positional statement parameter
///
/// # Errors
///
/// Returns `UnsupportedType` if the field's declared type has no storage
/// mapping and `TypeMismatch` if the value does not fit the declared type.
pub fn encode(field: &FieldDescriptor, value: &Value) -> Result<SqlValue> {
    if let SemanticType::Other(_) = field.semantic_type {
        return Err(unsupported(field).into());
    }
    if !value.fits(field.semantic_type) {
        return Err(OrmError::TypeMismatch {
            field: field.name.to_string(),
            expected: field.semantic_type.to_string(),
            found: value.type_name().to_string(),
        }
        .into());
    }

    Ok(match value {
        Value::Null => SqlValue::Null,
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Bytes(b) => SqlValue::Blob(b.clone()),
    })
}

/// Decode column `index` of a result row by the field's declared type
///
/// SQL NULL decodes to `Value::Null` for every supported type.
///
/// # Errors
///
/// Returns `UnsupportedType` for unmapped declared types, or a `Query` error
/// when the stored value cannot be read as the declared type.
pub fn decode(table: &str, field: &FieldDescriptor, row: &Row<'_>, index: usize) -> Result<Value> {
    let value = match field.semantic_type {
        SemanticType::Text => row
            .get::<_, Option<String>>(index)
            .map(|v| v.map_or(Value::Null, Value::Text)),
        SemanticType::Integer => row
            .get::<_, Option<i64>>(index)
            .map(|v| v.map_or(Value::Null, Value::Integer)),
        SemanticType::RawBytes => row
            .get::<_, Option<Vec<u8>>>(index)
            .map(|v| v.map_or(Value::Null, Value::Bytes)),
        SemanticType::Other(_) => return Err(unsupported(field).into()),
    };
    value.map_err(|e| query_error(table, e).with_field(field.name))
}

/// Interpret a raw byte payload as a remote reference
///
/// Returns the URL when the bytes are UTF-8 text beginning with an HTTP(S)
/// scheme (scheme compared ASCII case-insensitively).
pub fn remote_ref(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    let is_remote = REMOTE_SCHEMES.iter().any(|scheme| {
        text.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    is_remote.then_some(text)
}
