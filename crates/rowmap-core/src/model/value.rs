use crate::errors::{OrmError, Result};
use crate::model::SemanticType;

/// An in-memory field value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Text(_) => "Text",
            Value::Integer(_) => "Integer",
            Value::Bytes(_) => "RawBytes",
        }
    }

    /// Whether this value may be stored in a field of the given type
    ///
    /// `Null` fits every supported type.
    pub fn fits(&self, semantic_type: SemanticType) -> bool {
        matches!(
            (self, semantic_type),
            (Value::Null, _)
                | (Value::Text(_), SemanticType::Text)
                | (Value::Integer(_), SemanticType::Integer)
                | (Value::Bytes(_), SemanticType::RawBytes)
        )
    }

    fn mismatch(self, field: &str, expected: &str) -> OrmError {
        OrmError::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            found: self.type_name().to_string(),
        }
    }

    /// Take the value as text for the named field
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other variant, including `Null`.
    pub fn into_text(self, field: &str) -> Result<String> {
        match self {
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch(field, "Text")),
        }
    }

    /// Take the value as an integer for the named field
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other variant, including `Null`.
    pub fn into_integer(self, field: &str) -> Result<i64> {
        match self {
            Value::Integer(i) => Ok(i),
            other => Err(other.mismatch(field, "Integer")),
        }
    }

    /// Take the value as bytes for the named field
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for any other variant, including `Null`.
    pub fn into_bytes(self, field: &str) -> Result<Vec<u8>> {
        match self {
            Value::Bytes(b) => Ok(b),
            other => Err(other.mismatch(field, "RawBytes")),
        }
    }

    /// Like `into_text` but maps `Null` to `None`
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for non-text, non-null values.
    pub fn into_optional_text(self, field: &str) -> Result<Option<String>> {
        match self {
            Value::Null => Ok(None),
            other => other.into_text(field).map(Some),
        }
    }

    /// Like `into_integer` but maps `Null` to `None`
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for non-integer, non-null values.
    pub fn into_optional_integer(self, field: &str) -> Result<Option<i64>> {
        match self {
            Value::Null => Ok(None),
            other => other.into_integer(field).map(Some),
        }
    }

    /// Like `into_bytes` but maps `Null` to `None`
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for non-bytes, non-null values.
    pub fn into_optional_bytes(self, field: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Value::Null => Ok(None),
            other => other.into_bytes(field).map(Some),
        }
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
