//! Type metadata extraction
//!
//! Turns a `TypeDescriptor` into the ordered column mapping used to generate
//! SQL. Mappings are recomputed on every call and never cached.

use crate::errors::{OrmError, Result};
use crate::model::{FieldDescriptor, TypeDescriptor};
use crate::naming::IdentifierTranslator;

/// Persistable fields in declaration order
pub fn persistable_fields(desc: &'static TypeDescriptor) -> Vec<&'static FieldDescriptor> {
    desc.fields.iter().filter(|f| f.is_persistable()).collect()
}

/// The single primary-key field
///
/// # Errors
///
/// Returns `MissingPrimaryKey` when no field is flagged and
/// `DuplicatePrimaryKey` when more than one is.
pub fn primary_key(desc: &'static TypeDescriptor) -> Result<&'static FieldDescriptor> {
    let keys: Vec<&'static FieldDescriptor> =
        desc.fields.iter().filter(|f| f.is_primary_key()).collect();
    match keys.as_slice() {
        [] => Err(OrmError::MissingPrimaryKey {
            type_name: desc.name.to_string(),
        }),
        [key] => Ok(*key),
        many => Err(OrmError::DuplicatePrimaryKey {
            type_name: desc.name.to_string(),
            fields: many.iter().map(|f| f.name.to_string()).collect(),
        }),
    }
}

/// Names of the fields flagged for deferred remote loading
pub fn deferred_fields(desc: &'static TypeDescriptor) -> Vec<&'static str> {
    desc.fields
        .iter()
        .filter(|f| f.is_deferred_remote())
        .map(|f| f.name)
        .collect()
}

/// Check the flag invariants of a descriptor
///
/// # Errors
///
/// - `InvalidFieldFlags` if a primary-key or deferred field is not persistable
/// - `DuplicatePrimaryKey` if several fields are primary keys
/// - `NoPersistableFields` if nothing would be stored
pub fn validate(desc: &'static TypeDescriptor) -> Result<()> {
    for field in desc.fields {
        let reason = if field.is_primary_key() && !field.is_persistable() {
            Some("primary key must be persistable")
        } else if field.is_deferred_remote() && !field.is_persistable() {
            Some("deferred remote field must be persistable")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(OrmError::InvalidFieldFlags {
                type_name: desc.name.to_string(),
                field: field.name.to_string(),
                reason: reason.to_string(),
            });
        }
    }

    match primary_key(desc) {
        Ok(_) | Err(OrmError::MissingPrimaryKey { .. }) => {}
        Err(e) => return Err(e),
    }

    if !desc.fields.iter().any(|f| f.is_persistable()) {
        return Err(OrmError::NoPersistableFields {
            type_name: desc.name.to_string(),
        });
    }

    Ok(())
}

/// A persistable field paired with its column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub field: &'static FieldDescriptor,
    pub column: String,
}

/// The full derived mapping of a type onto its table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMapping {
    /// Table name, the type name verbatim
    pub table: &'static str,
    /// Persistable columns in declaration order
    pub columns: Vec<ColumnMapping>,
    primary_key: Option<usize>,
}

impl TableMapping {
    /// Derive the mapping for a descriptor
    ///
    /// A type without a primary key is accepted here; operations that need
    /// one call [`TableMapping::primary_key`].
    ///
    /// # Errors
    ///
    /// Returns any error from [`validate`].
    pub fn derive(
        desc: &'static TypeDescriptor,
        translator: &dyn IdentifierTranslator,
    ) -> Result<Self> {
        validate(desc)?;

        let columns: Vec<ColumnMapping> = persistable_fields(desc)
            .into_iter()
            .map(|field| ColumnMapping {
                field,
                column: translator.to_column_identifier(field.name),
            })
            .collect();
        let primary_key = columns.iter().position(|c| c.field.is_primary_key());

        Ok(Self {
            table: desc.name,
            columns,
            primary_key,
        })
    }

    /// The primary-key column
    ///
    /// # Errors
    ///
    /// Returns `MissingPrimaryKey` if the type declares none.
    pub fn primary_key(&self) -> Result<&ColumnMapping> {
        self.primary_key
            .map(|i| &self.columns[i])
            .ok_or_else(|| OrmError::MissingPrimaryKey {
                type_name: self.table.to_string(),
            })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }

    pub fn has_deferred(&self) -> bool {
        self.columns.iter().any(|c| c.field.is_deferred_remote())
    }
}
