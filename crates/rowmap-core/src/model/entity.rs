use crate::errors::{OrmError, Result};
use crate::model::{TypeDescriptor, Value};

/// A data-object type that can be mapped to a table
///
/// Implementations route field names to struct fields by hand; the
/// descriptor is the single source of truth for which fields exist and how
/// they are flagged.
///
/// ```
/// use rowmap_core::errors::Result;
/// use rowmap_core::model::{Entity, FieldDescriptor, SemanticType, TypeDescriptor, Value};
///
/// #[derive(Default)]
/// struct Tag {
///     id: Option<i64>,
///     label: String,
/// }
///
/// static TAG: TypeDescriptor = TypeDescriptor::new(
///     "Tag",
///     &[
///         FieldDescriptor::new("id", SemanticType::Integer).persistable().primary_key(),
///         FieldDescriptor::new("label", SemanticType::Text).persistable(),
///     ],
/// );
///
/// impl Entity for Tag {
///     fn descriptor() -> &'static TypeDescriptor {
///         &TAG
///     }
///
///     fn field(&self, name: &str) -> Result<Value> {
///         match name {
///             "id" => Ok(self.id.into()),
///             "label" => Ok(self.label.clone().into()),
///             _ => Err(Self::unknown_field(name)),
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
///         match name {
///             "id" => self.id = value.into_optional_integer(name)?,
///             "label" => self.label = value.into_text(name)?,
///             _ => return Err(Self::unknown_field(name)),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Entity: Default {
    /// Static metadata for this type
    fn descriptor() -> &'static TypeDescriptor;

    /// Read the current value of a declared field
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the name is not a field of this type.
    fn field(&self, name: &str) -> Result<Value>;

    /// Overwrite a declared field
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for undeclared names and `TypeMismatch` when the
    /// value does not fit the field.
    fn set_field(&mut self, name: &str, value: Value) -> Result<()>;

    /// Build the error for a name this type does not declare
    fn unknown_field(name: &str) -> OrmError {
        OrmError::UnknownField {
            type_name: Self::descriptor().name.to_string(),
            field: name.to_string(),
        }
    }
}
