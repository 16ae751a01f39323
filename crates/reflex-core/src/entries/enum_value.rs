use crate::Entity;

use super::{EntityKind, Reflected};

/// One enumerator: a name bound to a signed 64-bit underlying value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub entity: Entity,
    pub value: i64,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            entity: Entity::new(name),
            value,
        }
    }
}

impl Reflected for EnumValue {
    const KIND: EntityKind = EntityKind::EnumValue;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}
