pub mod descriptor;
pub mod entity;
pub mod value;

pub use descriptor::{FieldDescriptor, SemanticType, TypeDescriptor};
pub use entity::Entity;
pub use value::Value;
