//! Access specifiers and member flag sets.

use std::fmt;

use bitflags::bitflags;

/// Access specifier of a member, nested archetype or inheritance edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessSpecifier {
    /// Not applicable (namespace-level entities) or "any" when used as a filter.
    #[default]
    Undefined,
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    /// Check if `self`, used as a filter, accepts `other`.
    ///
    /// `Undefined` accepts every access specifier.
    pub fn accepts(self, other: AccessSpecifier) -> bool {
        self == AccessSpecifier::Undefined || self == other
    }
}

impl fmt::Display for AccessSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessSpecifier::Undefined => write!(f, "undefined"),
            AccessSpecifier::Public => write!(f, "public"),
            AccessSpecifier::Protected => write!(f, "protected"),
            AccessSpecifier::Private => write!(f, "private"),
        }
    }
}

bitflags! {
    /// Flags describing a field or static field.
    ///
    /// `STATIC` decides which struct registry a field belongs to. `CONST`
    /// makes the field read-only through reflection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const MUTABLE = 1 << 4;
        const CONST = 1 << 5;
    }
}

bitflags! {
    /// Flags describing a method or static method.
    ///
    /// ```
    /// use reflex_core::MethodFlags;
    ///
    /// let flags = MethodFlags::PUBLIC | MethodFlags::CONST;
    /// assert!(flags.contains(MethodFlags::PUBLIC));
    /// assert!(!flags.contains(MethodFlags::STATIC));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodFlags: u16 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const INLINE = 1 << 4;
        const VIRTUAL = 1 << 5;
        const PURE_VIRTUAL = 1 << 6;
        const OVERRIDE = 1 << 7;
        const FINAL = 1 << 8;
        const CONST = 1 << 9;
    }
}

bitflags! {
    /// Flags describing a namespace-level variable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VarFlags: u8 {
        /// Internal linkage.
        const STATIC = 1 << 0;
        const CONST = 1 << 1;
    }
}

bitflags! {
    /// Flags describing a namespace-level function.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FunctionFlags: u8 {
        /// Internal linkage.
        const STATIC = 1 << 0;
        const INLINE = 1 << 1;
    }
}

impl FieldFlags {
    /// Access specifier encoded in the flags.
    pub fn access(self) -> AccessSpecifier {
        if self.contains(FieldFlags::PUBLIC) {
            AccessSpecifier::Public
        } else if self.contains(FieldFlags::PROTECTED) {
            AccessSpecifier::Protected
        } else if self.contains(FieldFlags::PRIVATE) {
            AccessSpecifier::Private
        } else {
            AccessSpecifier::Undefined
        }
    }
}

impl MethodFlags {
    /// Access specifier encoded in the flags.
    pub fn access(self) -> AccessSpecifier {
        if self.contains(MethodFlags::PUBLIC) {
            AccessSpecifier::Public
        } else if self.contains(MethodFlags::PROTECTED) {
            AccessSpecifier::Protected
        } else if self.contains(MethodFlags::PRIVATE) {
            AccessSpecifier::Private
        } else {
            AccessSpecifier::Undefined
        }
    }
}
