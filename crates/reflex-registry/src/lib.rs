//! Reflex registry crate.
//!
//! The archetype database built on top of `reflex-core`:
//! - [`DatabaseBuilder`] - the single-threaded registration phase
//! - [`Database`] - the frozen, shareable read-only phase with a global id index
//! - [`StructRef`] - structs and classes: inheritance, members, instantiators
//! - [`EnumRef`] - enums and their values
//! - [`NamespaceRef`] - namespaces and the file-level root scope
//! - [`lookup`] - the predicate/visitor protocol every container exposes
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use reflex_registry::{DatabaseBuilder, NamespaceKey, StructRef};
//!
//! let mut builder = DatabaseBuilder::new();
//! let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
//! builder.add_struct(game, "Vec2", 8).unwrap();
//! builder.add_struct(game, "Vec3", 12).unwrap();
//! let db = builder.build();
//!
//! let game = db.get_namespace_by_name("game").unwrap();
//! let big = game
//!     .get_structs_by_predicate(Some(|s: StructRef<'_>| Ok::<_, Infallible>(s.memory_size() > 8)))
//!     .unwrap();
//! assert_eq!(big.len(), 1);
//! ```

mod archetype;
mod builder;
mod database;
mod entity_ref;
mod enumeration;
pub mod lookup;
mod member_table;
mod namespace;
mod store;
mod structure;

pub use archetype::{ArchetypeRef, FundamentalRef};
pub use builder::{DatabaseBuilder, EnumKey, NamespaceKey, Owner, StructKey};
pub use database::Database;
pub use entity_ref::EntityRef;
pub use enumeration::EnumRef;
pub use namespace::NamespaceRef;
pub use structure::{DirectParent, StructRef};
