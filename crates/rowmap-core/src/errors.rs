use thiserror::Error;

/// Result type alias using OrmError
pub type Result<T> = std::result::Result<T, OrmError>;

// ========== Error Facility ==========

/// Coarse classification of an error kind
///
/// Callers branch on the class to decide how to react: configuration errors
/// are programming mistakes in a type declaration, store errors come from
/// SQLite, `NotFound` is an expected outcome of a load, and fetch errors are
/// local to a single deferred field access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Configuration,
    Store,
    NotFound,
    Fetch,
    Internal,
}

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration (detected before any store interaction)
    MissingPrimaryKey,
    DuplicatePrimaryKey,
    InvalidFieldFlags,
    NoPersistableFields,
    UnsupportedType,
    TypeMismatch,
    UnknownField,
    PrimaryKeyUnset,
    InvalidConfig,

    // Store
    Schema,
    Insert,
    Query,
    Persistence,

    // Lookup
    NotFound,

    // Remote content
    Fetch,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingPrimaryKey => "ERR_MISSING_PRIMARY_KEY",
            ExErrorKind::DuplicatePrimaryKey => "ERR_DUPLICATE_PRIMARY_KEY",
            ExErrorKind::InvalidFieldFlags => "ERR_INVALID_FIELD_FLAGS",
            ExErrorKind::NoPersistableFields => "ERR_NO_PERSISTABLE_FIELDS",
            ExErrorKind::UnsupportedType => "ERR_UNSUPPORTED_TYPE",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::PrimaryKeyUnset => "ERR_PRIMARY_KEY_UNSET",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Schema => "ERR_SCHEMA",
            ExErrorKind::Insert => "ERR_INSERT",
            ExErrorKind::Query => "ERR_QUERY",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Fetch => "ERR_FETCH",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Get the class this kind belongs to
    pub fn class(&self) -> ErrorClass {
        match self {
            ExErrorKind::MissingPrimaryKey
            | ExErrorKind::DuplicatePrimaryKey
            | ExErrorKind::InvalidFieldFlags
            | ExErrorKind::NoPersistableFields
            | ExErrorKind::UnsupportedType
            | ExErrorKind::TypeMismatch
            | ExErrorKind::UnknownField
            | ExErrorKind::PrimaryKeyUnset
            | ExErrorKind::InvalidConfig => ErrorClass::Configuration,
            ExErrorKind::Schema
            | ExErrorKind::Insert
            | ExErrorKind::Query
            | ExErrorKind::Persistence => ErrorClass::Store,
            ExErrorKind::NotFound => ErrorClass::NotFound,
            ExErrorKind::Fetch => ErrorClass::Fetch,
            ExErrorKind::Internal => ErrorClass::Internal,
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the error class
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the table context, if any
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while interpreting type metadata and field values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrmError {
    /// No field of the type is flagged as primary key
    #[error("Type {type_name} declares no primary key")]
    MissingPrimaryKey { type_name: String },

    /// More than one field of the type is flagged as primary key
    #[error("Type {type_name} declares more than one primary key: {fields:?}")]
    DuplicatePrimaryKey {
        type_name: String,
        fields: Vec<String>,
    },

    /// A field carries a flag combination that is not allowed
    #[error("Field {type_name}.{field} has invalid flags: {reason}")]
    InvalidFieldFlags {
        type_name: String,
        field: String,
        reason: String,
    },

    /// The type has nothing to store
    #[error("Type {type_name} declares no persistable fields")]
    NoPersistableFields { type_name: String },

    /// The declared semantic type has no storage mapping
    #[error("Field {field} has unsupported type {declared}")]
    UnsupportedType { field: String, declared: String },

    /// A value does not match the field's declared semantic type
    #[error("Field {field} expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// The entity does not know the requested field
    #[error("Type {type_name} has no field {field}")]
    UnknownField { type_name: String, field: String },

    /// A load was requested with an empty primary key
    #[error("Primary key {type_name}.{field} is not populated")]
    PrimaryKeyUnset { type_name: String, field: String },
}

impl OrmError {
    /// Get the canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            OrmError::MissingPrimaryKey { .. } => ExErrorKind::MissingPrimaryKey,
            OrmError::DuplicatePrimaryKey { .. } => ExErrorKind::DuplicatePrimaryKey,
            OrmError::InvalidFieldFlags { .. } => ExErrorKind::InvalidFieldFlags,
            OrmError::NoPersistableFields { .. } => ExErrorKind::NoPersistableFields,
            OrmError::UnsupportedType { .. } => ExErrorKind::UnsupportedType,
            OrmError::TypeMismatch { .. } => ExErrorKind::TypeMismatch,
            OrmError::UnknownField { .. } => ExErrorKind::UnknownField,
            OrmError::PrimaryKeyUnset { .. } => ExErrorKind::PrimaryKeyUnset,
        }
    }
}

/// Conversion from OrmError to ExError
impl From<OrmError> for ExError {
    fn from(err: OrmError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            OrmError::MissingPrimaryKey { type_name }
            | OrmError::NoPersistableFields { type_name } => {
                ExError::new(kind).with_table(type_name).with_message(message)
            }

            OrmError::DuplicatePrimaryKey { type_name, .. } => {
                ExError::new(kind).with_table(type_name).with_message(message)
            }

            OrmError::InvalidFieldFlags {
                type_name, field, ..
            }
            | OrmError::UnknownField { type_name, field }
            | OrmError::PrimaryKeyUnset { type_name, field } => ExError::new(kind)
                .with_table(type_name)
                .with_field(field)
                .with_message(message),

            OrmError::UnsupportedType { field, .. } | OrmError::TypeMismatch { field, .. } => {
                ExError::new(kind).with_field(field).with_message(message)
            }
        }
    }
}
