//! rowmap Core - metadata-driven object-relational mapping kernel
//!
//! This crate provides the storage-independent half of rowmap:
//! - Statically declared type and field metadata (`TypeDescriptor`, `FieldDescriptor`)
//! - The `Entity` trait through which rows are read and populated
//! - Type metadata extraction into ordered column mappings
//! - Field to column identifier translation
//! - The remote fetch collaborator trait used by deferred loading
//! - Error and logging facilities shared with `rowmap-store`

pub mod errors;
pub mod fetch;
pub mod logging_facility;
pub mod metadata;
pub mod model;
pub mod naming;

// Used by the logging macros
pub use rowmap_core_types as core_types;

// Re-export commonly used types
pub use errors::{ErrorClass, ExError, ExErrorKind, OrmError, Result};
pub use fetch::RemoteFetcher;
pub use metadata::{ColumnMapping, TableMapping};
pub use model::{Entity, FieldDescriptor, SemanticType, TypeDescriptor, Value};
pub use naming::{IdentifierTranslator, NamingStrategy, SnakeCase, Verbatim};
