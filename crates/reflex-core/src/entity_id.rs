//! Content-addressed entity identity.
//!
//! This module provides [`EntityId`], a 64-bit hash that identifies every
//! reflected entity (namespaces, archetypes, members, enum values, free
//! functions and variables). Ids are computed from the fully qualified name,
//! never from a memory address, so:
//!
//! - Generated code can compute an id before the entity is registered
//! - Copying a descriptor keeps its identity
//! - The same declaration always hashes to the same id for a given build
//!
//! # Examples
//!
//! ```
//! use reflex_core::EntityId;
//!
//! let a = EntityId::from_name("game::Player");
//! let b = EntityId::from_name("game::Player");
//! assert_eq!(a, b);
//!
//! // Callables fold their parameter types into the name
//! let f1 = EntityId::from_callable("game::Player::heal", &["i32"]);
//! let f2 = EntityId::from_callable("game::Player::heal", &["f32"]);
//! assert_ne!(f1, f2);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain constant mixed into every entity hash.
pub const ENTITY_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit id derived from an entity's fully qualified name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Empty/invalid id. Never produced for a registered entity.
    pub const EMPTY: EntityId = EntityId(0);

    /// Create an id from a fully qualified name.
    #[inline]
    pub fn from_name(qualified_name: &str) -> Self {
        let hash = ENTITY_DOMAIN ^ xxh64(qualified_name.as_bytes(), 0);
        // EMPTY stays reserved for unbound entities.
        if hash == 0 { EntityId(ENTITY_DOMAIN) } else { EntityId(hash) }
    }

    /// Create an id for a callable from its qualified name and parameter type names.
    ///
    /// The id is the hash of the signature string returned by
    /// [`callable_signature`], so overloads get distinct ids.
    #[inline]
    pub fn from_callable(qualified_name: &str, parameter_types: &[&str]) -> Self {
        Self::from_name(&callable_signature(qualified_name, parameter_types))
    }

    /// Check if this is the empty id.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Build the signature string a callable's id is hashed from: `name(T1, T2)`.
pub fn callable_signature(qualified_name: &str, parameter_types: &[&str]) -> String {
    format!("{}({})", qualified_name, parameter_types.join(", "))
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({:#018x})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_determinism() {
        assert_eq!(EntityId::from_name("a::B"), EntityId::from_name("a::B"));
    }

    #[test]
    fn id_uniqueness() {
        let names = ["A", "a::A", "a::b::A", "B", "a::A::x"];
        let ids: Vec<_> = names.iter().map(|n| EntityId::from_name(n)).collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                assert_ne!(ids[i], ids[j], "{} vs {}", names[i], names[j]);
            }
        }
    }

    #[test]
    fn callable_overloads_differ() {
        let none = EntityId::from_callable("f", &[]);
        let one = EntityId::from_callable("f", &["i32"]);
        let two = EntityId::from_callable("f", &["i32", "f32"]);
        let swapped = EntityId::from_callable("f", &["f32", "i32"]);
        assert_ne!(none, one);
        assert_ne!(one, two);
        assert_ne!(two, swapped);
    }

    #[test]
    fn callable_id_matches_signature_name() {
        assert_eq!(
            EntityId::from_callable("ns::f", &["i32", "bool"]),
            EntityId::from_name("ns::f(i32, bool)")
        );
    }

    #[test]
    fn never_empty() {
        assert!(!EntityId::from_name("").is_empty());
        assert!(EntityId::EMPTY.is_empty());
    }

    #[test]
    fn display_and_debug() {
        let id = EntityId(0x1234);
        assert_eq!(id.to_string(), "0x0000000000001234");
        assert_eq!(format!("{:?}", id), "EntityId(0x0000000000001234)");
    }
}
