//! Declared-type descriptors and the [`Reflect`] bootstrap trait.

use std::any::TypeId;
use std::fmt;

use crate::{AccessError, EntityId};

/// Implemented by generated code for every reflected Rust type.
///
/// The qualified name is the same string the type's archetype was registered
/// under, so [`Reflect::entity_id`] resolves it through the database's id index
/// without walking namespaces.
pub trait Reflect: 'static + Sized {
    /// Fully qualified name the archetype is registered under.
    const QUALIFIED_NAME: &'static str;

    /// Size of one instance. Zero for `()`.
    const MEMORY_SIZE: usize = std::mem::size_of::<Self>();

    /// Id of the archetype describing `Self`.
    fn entity_id() -> EntityId {
        EntityId::from_name(Self::QUALIFIED_NAME)
    }
}

macro_rules! impl_reflect_fundamental {
    ($($rust_ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $rust_ty {
                const QUALIFIED_NAME: &'static str = $name;
            }
        )*
    };
}

impl_reflect_fundamental! {
    () => "void",
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

/// Description of a declared type (field type, parameter type, return type).
///
/// The `TypeId` is optional: generated code knows it, hand-written descriptors
/// for foreign layouts may not. Typed accessors only check what is known.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    /// Display name, also used to build callable signatures.
    pub name: String,
    /// Size in bytes.
    pub size: usize,
    /// Rust type identity, when known.
    pub type_id: Option<TypeId>,
    /// Archetype describing this type, when it is itself reflected.
    pub archetype: Option<EntityId>,
}

impl TypeDesc {
    /// Descriptor for a reflected type, linked to its archetype.
    pub fn of<T: Reflect>() -> Self {
        Self {
            name: T::QUALIFIED_NAME.to_string(),
            size: T::MEMORY_SIZE,
            type_id: Some(TypeId::of::<T>()),
            archetype: Some(T::entity_id()),
        }
    }

    /// Descriptor for a type that has no archetype.
    pub fn opaque<T: 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            size: std::mem::size_of::<T>(),
            type_id: Some(TypeId::of::<T>()),
            archetype: None,
        }
    }

    /// Descriptor known only by name and size.
    pub fn named(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            type_id: None,
            archetype: None,
        }
    }

    /// The `void` descriptor used for callables returning nothing.
    pub fn void() -> Self {
        Self::of::<()>()
    }

    pub fn is_void(&self) -> bool {
        self.type_id == Some(TypeId::of::<()>())
    }

    /// Check that `T` is compatible with this descriptor.
    ///
    /// Descriptors without a `TypeId` accept any `T`.
    pub fn accepts<T: 'static>(&self) -> bool {
        self.accepts_id(TypeId::of::<T>())
    }

    pub fn accepts_id(&self, type_id: TypeId) -> bool {
        self.type_id.is_none_or(|expected| expected == type_id)
    }

    /// Like [`TypeDesc::accepts`], reporting a mismatch as an error.
    pub fn check<T: 'static>(&self) -> Result<(), AccessError> {
        if self.accepts::<T>() {
            Ok(())
        } else {
            Err(AccessError::TypeMismatch {
                expected: self.name.clone(),
                actual: std::any::type_name::<T>(),
            })
        }
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDesc({}, {} bytes)", self.name, self.size)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
