use crate::{AccessError, AccessSpecifier, Entity, EntityId, FieldFlags, TypeDesc};

use super::{EntityKind, Reflected};

/// An instance field: a typed slot at a fixed offset inside its struct.
///
/// Fields inherited from a parent may be registered again on the child; the
/// `owner` then names the declaring parent while the entity's `outer` names
/// the struct the descriptor is registered in. Such a copy is named after the
/// declaring parent and shares its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub entity: Entity,
    /// Declared type.
    pub ty: TypeDesc,
    pub flags: FieldFlags,
    /// Struct that declares the field. Filled in on registration when empty.
    pub owner: EntityId,
    /// Byte offset from the start of the instance.
    pub memory_offset: usize,
}

impl Field {
    /// Create an instance field, typically with `std::mem::offset_of!`.
    pub fn new(name: impl Into<String>, ty: TypeDesc, flags: FieldFlags, memory_offset: usize) -> Self {
        Self {
            entity: Entity::new(name),
            ty,
            flags,
            owner: EntityId::EMPTY,
            memory_offset,
        }
    }

    /// Record the declaring struct of an inherited field.
    pub fn declared_in(mut self, owner: EntityId) -> Self {
        self.owner = owner;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(FieldFlags::STATIC)
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(FieldFlags::CONST)
    }

    pub fn access(&self) -> AccessSpecifier {
        self.flags.access()
    }

    /// Address of the field inside `instance`.
    pub fn data_ptr<O>(&self, instance: *const O) -> *const u8 {
        instance.cast::<u8>().wrapping_add(self.memory_offset)
    }

    /// Borrow the field's data.
    ///
    /// # Safety
    ///
    /// `instance` must be an instance of the struct this field was registered
    /// for, and the registered offset must point to an initialized `T`.
    pub unsafe fn get_ref<'a, T: 'static, O>(&self, instance: &'a O) -> Result<&'a T, AccessError> {
        self.ty.check::<T>()?;
        // SAFETY: upheld by the caller.
        Ok(unsafe { &*self.data_ptr(instance).cast::<T>() })
    }

    /// Clone the field's data out.
    ///
    /// # Safety
    ///
    /// Same as [`Field::get_ref`].
    pub unsafe fn get<T: Clone + 'static, O>(&self, instance: &O) -> Result<T, AccessError> {
        // SAFETY: upheld by the caller.
        unsafe { self.get_ref::<T, O>(instance) }.cloned()
    }

    /// Overwrite the field's data. Read-only fields refuse the write.
    ///
    /// # Safety
    ///
    /// Same as [`Field::get_ref`].
    pub unsafe fn set<T: 'static, O>(&self, instance: &mut O, value: T) -> Result<(), AccessError> {
        if self.is_read_only() {
            return Err(AccessError::ReadOnly {
                name: self.entity.qualified_name.clone(),
            });
        }
        self.ty.check::<T>()?;
        let ptr = (instance as *mut O).cast::<u8>().wrapping_add(self.memory_offset);
        // SAFETY: upheld by the caller.
        unsafe { *ptr.cast::<T>() = value };
        Ok(())
    }
}

impl Reflected for Field {
    const KIND: EntityKind = EntityKind::Field;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[derive(Clone)]
    struct Player {
        level: u8,
        health: i32,
        name: String,
    }

    fn player() -> Player {
        Player {
            level: 3,
            health: 100,
            name: "ada".into(),
        }
    }

    #[test]
    fn read_by_offset() {
        let health = Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, offset_of!(Player, health));
        let name = Field::new("name", TypeDesc::opaque::<String>(), FieldFlags::PUBLIC, offset_of!(Player, name));
        let p = player();

        assert_eq!(unsafe { health.get::<i32, _>(&p) }, Ok(100));
        assert_eq!(unsafe { name.get_ref::<String, _>(&p) }.map(String::as_str), Ok("ada"));
        assert_eq!(p.level, 3);
    }

    #[test]
    fn write_by_offset() {
        let health = Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, offset_of!(Player, health));
        let mut p = player();
        unsafe { health.set(&mut p, 42i32) }.unwrap();
        assert_eq!(p.health, 42);
    }

    #[test]
    fn const_field_rejects_writes_but_reads() {
        let level = Field::new(
            "level",
            TypeDesc::of::<u8>(),
            FieldFlags::PUBLIC | FieldFlags::CONST,
            offset_of!(Player, level),
        );
        let mut p = player();
        assert!(matches!(unsafe { level.set(&mut p, 9u8) }, Err(AccessError::ReadOnly { .. })));
        assert_eq!(unsafe { level.get::<u8, _>(&p) }, Ok(3));
        assert_eq!(p.level, 3);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let health = Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, offset_of!(Player, health));
        let p = player();
        assert!(matches!(unsafe { health.get::<i64, _>(&p) }, Err(AccessError::TypeMismatch { .. })));
    }

    #[test]
    fn declared_in_overrides_owner() {
        let owner = EntityId::from_name("Base");
        let field = Field::new("x", TypeDesc::of::<f32>(), FieldFlags::empty(), 0).declared_in(owner);
        assert_eq!(field.owner, owner);
        assert!(!field.is_static());
    }
}
