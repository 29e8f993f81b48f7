//! Statically declared type metadata
//!
//! Each entity type declares one `TypeDescriptor` as a `static`, listing its
//! fields in declaration order together with their capability flags.

use std::fmt;

/// Declared semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Text,
    Integer,
    RawBytes,
    /// A type the value coder has no mapping for, named as declared
    Other(&'static str),
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Text => write!(f, "Text"),
            SemanticType::Integer => write!(f, "Integer"),
            SemanticType::RawBytes => write!(f, "RawBytes"),
            SemanticType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Metadata for a single declared field
///
/// Built with const constructors so descriptors can live in statics:
///
/// ```
/// use rowmap_core::model::{FieldDescriptor, SemanticType};
///
/// const ID: FieldDescriptor = FieldDescriptor::new("id", SemanticType::Integer)
///     .persistable()
///     .primary_key();
/// assert!(ID.is_primary_key());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub semantic_type: SemanticType,
    persistable: bool,
    primary_key: bool,
    deferred_remote: bool,
}

impl FieldDescriptor {
    /// Declare a field with no capability flags
    pub const fn new(name: &'static str, semantic_type: SemanticType) -> Self {
        Self {
            name,
            semantic_type,
            persistable: false,
            primary_key: false,
            deferred_remote: false,
        }
    }

    /// Mark the field as stored in and loaded from the table
    pub const fn persistable(mut self) -> Self {
        self.persistable = true;
        self
    }

    /// Mark the field as the row identity
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the field as eligible for lazy remote resolution
    pub const fn deferred_remote(mut self) -> Self {
        self.deferred_remote = true;
        self
    }

    pub const fn is_persistable(&self) -> bool {
        self.persistable
    }

    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub const fn is_deferred_remote(&self) -> bool {
        self.deferred_remote
    }
}

/// Metadata for an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type name, used verbatim as the table name
    pub name: &'static str,
    /// Fields in declaration order
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
