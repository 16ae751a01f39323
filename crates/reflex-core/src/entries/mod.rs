//! Descriptor types stored in the database.
//!
//! - [`Entity`] - identity, name, outer back-reference and properties shared
//!   by every descriptor
//! - [`Field`], [`StaticField`] - data members of structs
//! - [`Method`], [`StaticMethod`] - callable members of structs
//! - [`Variable`], [`Function`] - namespace-level declarations
//! - [`EnumValue`] - one enumerator
//!
//! Descriptors are created by generated registration code and handed to the
//! database builder, which binds their qualified name, id and outer entity.

mod entity;
mod enum_value;
mod field;
mod function;
mod method;
mod static_field;
mod variable;

pub use entity::{Entity, EntityKind, Reflected};
pub use enum_value::EnumValue;
pub use field::Field;
pub use function::Function;
pub use method::{Method, StaticMethod};
pub use static_field::StaticField;
pub use variable::Variable;
