use crate::{AccessError, AccessSpecifier, Entity, EntityId, FieldFlags, StaticAddress, TypeDesc};

use super::{EntityKind, Reflected};

/// A static field: a typed slot at a process-wide address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticField {
    pub entity: Entity,
    pub ty: TypeDesc,
    pub flags: FieldFlags,
    /// Struct that declares the field. Filled in on registration when empty.
    pub owner: EntityId,
    pub address: StaticAddress,
}

impl StaticField {
    /// Create a static field. The `STATIC` flag is added automatically.
    pub fn new(name: impl Into<String>, ty: TypeDesc, flags: FieldFlags, address: StaticAddress) -> Self {
        Self {
            entity: Entity::new(name),
            ty,
            flags: flags | FieldFlags::STATIC,
            owner: EntityId::EMPTY,
            address,
        }
    }

    pub fn declared_in(mut self, owner: EntityId) -> Self {
        self.owner = owner;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldFlags::STATIC)
    }

    /// Read-only through either the `CONST` flag or a read-only address.
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(FieldFlags::CONST) || self.address.is_read_only()
    }

    pub fn access(&self) -> AccessSpecifier {
        self.flags.access()
    }

    /// Borrow the stored value.
    ///
    /// # Safety
    ///
    /// The address must hold an initialized `T` that nobody writes to while
    /// the reference lives.
    pub unsafe fn get_ref<T: 'static>(&self) -> Result<&'static T, AccessError> {
        // SAFETY: upheld by the caller.
        unsafe { self.address.get_ref(&self.ty) }
    }

    /// Clone the stored value out.
    ///
    /// # Safety
    ///
    /// Same as [`StaticField::get_ref`].
    pub unsafe fn get<T: Clone + 'static>(&self) -> Result<T, AccessError> {
        // SAFETY: upheld by the caller.
        unsafe { self.address.get(&self.ty) }
    }

    /// Overwrite the stored value.
    ///
    /// # Safety
    ///
    /// The address must hold an initialized `T` and no other access may
    /// happen concurrently.
    pub unsafe fn set<T: 'static>(&self, value: T) -> Result<(), AccessError> {
        let read_only = self.flags.contains(FieldFlags::CONST);
        // SAFETY: upheld by the caller.
        unsafe {
            self.address
                .set(&self.ty, &self.entity.qualified_name, read_only, value)
        }
    }
}

impl Reflected for StaticField {
    const KIND: EntityKind = EntityKind::StaticField;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
