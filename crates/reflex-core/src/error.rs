//! Error types for the reflection database.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ReflexError (top-level wrapper)
//! ├── RegistrationError  - contract violations while the database is built
//! ├── AccessError        - typed reads/writes through field descriptors
//! ├── CallError          - invoking reflected callables
//! └── InstantiationError - building instances through instantiators
//! ```
//!
//! "Not found" is never an error: lookups return `Option`/empty collections.
//! Faults raised by caller-supplied predicates and visitors are the caller's
//! own error type and are returned untouched, so they do not appear here.

use thiserror::Error;

use crate::EntityId;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating a database builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two entities hash to the same id.
    #[error("duplicate entity id {id} for '{name}'")]
    DuplicateId { name: String, id: EntityId },

    /// An archetype with this name already exists in the same scope.
    #[error("duplicate archetype: {0}")]
    DuplicateArchetype(String),

    /// A member's static flag does not match the registry it was added to.
    #[error("member '{member}' {}", if *expected_static { "must be flagged static" } else { "must not be flagged static" })]
    StaticFlagMismatch { member: String, expected_static: bool },

    /// The inheritance edge would make a type reachable from itself.
    #[error("circular inheritance: '{child}' cannot inherit from '{parent}'")]
    CyclicInheritance { child: String, parent: String },

    /// The target archetype is not a struct or class.
    #[error("'{0}' is not a struct or class")]
    NotAStruct(String),

    /// The target archetype is not an enum.
    #[error("'{0}' is not an enum")]
    NotAnEnum(String),

    /// A key or id does not refer to a registered entity.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// The instantiator is not a static method of the struct it is added to.
    #[error("'{method}' is not a static method of '{structure}'")]
    InvalidInstantiator { structure: String, method: String },

    /// Entities must have a non-empty name.
    #[error("entity name must not be empty")]
    EmptyName,
}

// ============================================================================
// Access Errors
// ============================================================================

/// Errors raised by typed field and variable access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Write through a read-only field, static field or variable.
    #[error("'{name}' is read-only")]
    ReadOnly { name: String },

    /// The requested Rust type does not match the declared type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },
}

// ============================================================================
// Call Errors
// ============================================================================

/// Errors raised when invoking a reflected callable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// Wrong number of arguments.
    #[error("expected {expected} argument(s), got {got}")]
    ArgumentCount { expected: usize, got: usize },

    /// An argument's Rust type does not match the parameter.
    #[error("argument {index} must be {expected}")]
    ArgumentType { index: usize, expected: String },

    /// The receiver is not an instance of the method's struct.
    #[error("receiver must be {expected}")]
    Receiver { expected: &'static str },
}

// ============================================================================
// Instantiation Errors
// ============================================================================

/// Errors raised by `make_instance`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiationError {
    /// No instantiator accepts the supplied arguments.
    #[error("'{structure}' has no instantiator taking {arity} argument(s)")]
    NoInstantiator { structure: String, arity: usize },

    /// The instantiator produced something other than the requested type.
    #[error("instantiator of '{structure}' did not return a {expected}")]
    ReturnType {
        structure: String,
        expected: &'static str,
    },

    /// The instantiator itself failed.
    #[error(transparent)]
    Call(#[from] CallError),
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Top-level error wrapping every phase-specific error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflexError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_mismatch_message() {
        let err = RegistrationError::StaticFlagMismatch {
            member: "Player::count".into(),
            expected_static: true,
        };
        assert_eq!(err.to_string(), "member 'Player::count' must be flagged static");

        let err = RegistrationError::StaticFlagMismatch {
            member: "Player::hp".into(),
            expected_static: false,
        };
        assert_eq!(err.to_string(), "member 'Player::hp' must not be flagged static");
    }

    #[test]
    fn read_only_is_distinct_from_mismatch() {
        let ro = AccessError::ReadOnly { name: "MAX".into() };
        assert_eq!(ro.to_string(), "'MAX' is read-only");
        assert!(!matches!(ro, AccessError::TypeMismatch { .. }));
    }

    #[test]
    fn wrapper_is_transparent() {
        let inner = CallError::ArgumentCount { expected: 2, got: 1 };
        let wrapped: ReflexError = InstantiationError::from(inner.clone()).into();
        assert_eq!(wrapped.to_string(), inner.to_string());
    }
}
