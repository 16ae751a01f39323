use crate::{AccessError, Entity, StaticAddress, TypeDesc, VarFlags};

use super::{EntityKind, Reflected};

/// A namespace-level variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub entity: Entity,
    pub ty: TypeDesc,
    pub flags: VarFlags,
    pub address: StaticAddress,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: TypeDesc, flags: VarFlags, address: StaticAddress) -> Self {
        Self {
            entity: Entity::new(name),
            ty,
            flags,
            address,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(VarFlags::CONST) || self.address.is_read_only()
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
    /// Same as [`Variable::get_ref`].
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
        let read_only = self.flags.contains(VarFlags::CONST);
        // SAFETY: upheld by the caller.
        unsafe {
            self.address
                .set(&self.ty, &self.entity.qualified_name, read_only, value)
        }
    }
}

impl Reflected for Variable {
    const KIND: EntityKind = EntityKind::Variable;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
