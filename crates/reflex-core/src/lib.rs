//! Reflex core crate.
//!
//! Leaf vocabulary of the reflection database:
//! - Content-addressed identity ([`EntityId`], [`QualifiedName`])
//! - Property annotations ([`Properties`], [`ComplexProperty`])
//! - Access specifiers and member flag sets
//! - Declared-type descriptors ([`TypeDesc`]) and the [`Reflect`] bootstrap trait
//! - Member descriptors (fields, methods, variables, functions, enum values)
//! - Static storage addresses and type-erased callables
//! - Error types
//!
//! # Example
//!
//! ```
//! use std::mem::offset_of;
//! use reflex_core::{Field, FieldFlags, TypeDesc};
//!
//! struct Player {
//!     health: i32,
//! }
//!
//! let health = Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, offset_of!(Player, health));
//! let mut player = Player { health: 10 };
//! unsafe { health.set(&mut player, 25i32) }.unwrap();
//! assert_eq!(unsafe { health.get::<i32, _>(&player) }, Ok(25));
//! ```

pub mod callable;
pub mod entity_id;
pub mod entries;
pub mod error;
pub mod flags;
pub mod property;
pub mod qualified_name;
pub mod storage;
pub mod type_desc;

// Re-export commonly used types at crate root
pub use callable::{
    IntoMethodCallable, IntoStaticCallable, MethodCallable, Parameter, Signature, StaticCallable,
    Value,
};
pub use entity_id::{ENTITY_DOMAIN, EntityId, callable_signature};
pub use entries::{
    Entity, EntityKind, EnumValue, Field, Function, Method, Reflected, StaticField, StaticMethod,
    Variable,
};
pub use error::{AccessError, CallError, InstantiationError, ReflexError, RegistrationError};
pub use flags::{AccessSpecifier, FieldFlags, FunctionFlags, MethodFlags, VarFlags};
pub use property::{ComplexProperty, Properties};
pub use qualified_name::{QualifiedName, SCOPE_SEPARATOR};
pub use storage::{RawAddress, StaticAddress};
pub use type_desc::{Reflect, TypeDesc};
