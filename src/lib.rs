//! Reflex: a runtime reflection database for ahead-of-time compiled types.
//!
//! Generated registration code describes every reflected declaration
//! (namespaces, structs, classes, enums, fields, methods, variables,
//! functions) to a [`DatabaseBuilder`]. Building it yields an immutable
//! [`Database`] that any number of threads can query by name, by predicate,
//! by visitor walk or by id.
//!
//! This crate re-exports:
//! - [`reflex_core`] - identity, properties, flags, member descriptors, errors
//! - [`reflex_registry`] - the builder, the database and its read views
//!
//! and adds [`global`], the process-wide installation point.
//!
//! # Example
//!
//! ```
//! use std::mem::offset_of;
//! use reflex::prelude::*;
//!
//! struct Player {
//!     health: i32,
//! }
//!
//! let mut builder = DatabaseBuilder::with_fundamentals().unwrap();
//! let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
//! let player = builder.add_class(game, "Player", size_of::<Player>()).unwrap();
//! builder
//!     .add_field(player, Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, offset_of!(Player, health)))
//!     .unwrap();
//! builder
//!     .add_static_method_instantiator(player, StaticMethod::new("make", MethodFlags::PUBLIC, || Player { health: 100 }))
//!     .unwrap();
//! let db = builder.build();
//!
//! let class = db.get_namespace_by_name("game").unwrap().get_class_by_name("Player").unwrap();
//! let mut instance: Player = class.make_instance(args![]).unwrap();
//! let health = class.get_field("health").unwrap();
//! unsafe { health.set(&mut instance, 75i32) }.unwrap();
//! assert_eq!(instance.health, 75);
//! ```

pub mod global;

pub use reflex_core;
pub use reflex_registry;

pub use reflex_core::{
    AccessError, AccessSpecifier, CallError, ComplexProperty, Entity, EntityId, EntityKind,
    EnumValue, Field, FieldFlags, Function, FunctionFlags, InstantiationError, Method, MethodFlags,
    Parameter, Properties, QualifiedName, Reflect, Reflected, ReflexError, RegistrationError,
    Signature, StaticAddress, StaticField, StaticMethod, TypeDesc, Value, VarFlags, Variable, args,
};
pub use reflex_registry::{
    ArchetypeRef, Database, DatabaseBuilder, DirectParent, EntityRef, EnumKey, EnumRef,
    FundamentalRef, NamespaceKey, NamespaceRef, Owner, StructKey, StructRef,
};

/// Everything needed to register and query reflected types.
pub mod prelude {
    pub use crate::global::InstallError;
    pub use crate::{
        AccessError, AccessSpecifier, ArchetypeRef, CallError, ComplexProperty, Database,
        DatabaseBuilder, EntityId, EntityKind, EntityRef, EnumKey, EnumRef, EnumValue, Field,
        FieldFlags, Function, FunctionFlags, InstantiationError, Method, MethodFlags,
        NamespaceKey, NamespaceRef, Owner, Reflect, Reflected, RegistrationError, StaticAddress,
        StaticField, StaticMethod, StructKey, StructRef, TypeDesc, Value, VarFlags, Variable, args,
    };
}
