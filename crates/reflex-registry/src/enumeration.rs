//! Enums: an ordered list of named values over an underlying integer type.

use std::fmt;

use reflex_core::{AccessSpecifier, Entity, EntityId, EnumValue, Properties, TypeDesc};

use crate::archetype::ArchetypeData;
use crate::database::Database;
use crate::entity_ref::EntityRef;
use crate::lookup::predicate_lookups;
use crate::member_table::MemberTable;

#[derive(Debug)]
pub(crate) struct EnumData {
    pub underlying: TypeDesc,
    pub values: MemberTable<EnumValue>,
}

impl EnumData {
    pub fn new(underlying: TypeDesc) -> Self {
        Self {
            underlying,
            values: MemberTable::default(),
        }
    }
}

/// An enum in a frozen [`Database`].
#[derive(Clone, Copy)]
pub struct EnumRef<'db> {
    db: &'db Database,
    data: &'db ArchetypeData,
    body: &'db EnumData,
}

impl<'db> EnumRef<'db> {
    pub(crate) fn new(db: &'db Database, data: &'db ArchetypeData, body: &'db EnumData) -> Self {
        Self { db, data, body }
    }

    pub(crate) fn data(&self) -> &'db ArchetypeData {
        self.data
    }

    pub(crate) fn db(&self) -> &'db Database {
        self.db
    }

    pub fn entity(&self) -> &'db Entity {
        &self.data.entity
    }

    pub fn id(&self) -> EntityId {
        self.data.entity.id
    }

    pub fn name(&self) -> &'db str {
        &self.data.entity.name
    }

    pub fn qualified_name(&self) -> &'db str {
        &self.data.entity.qualified_name
    }

    pub fn properties(&self) -> &'db Properties {
        &self.data.entity.properties
    }

    pub fn memory_size(&self) -> usize {
        self.data.memory_size
    }

    pub fn access(&self) -> AccessSpecifier {
        self.data.access
    }

    pub fn outer(&self) -> Option<EntityRef<'db>> {
        self.db.get_entity_by_id(self.data.entity.outer?)
    }

    pub fn underlying_type(&self) -> &'db TypeDesc {
        &self.body.underlying
    }

    pub fn get_enum_value_by_name(&self, name: &str) -> Option<&'db EnumValue> {
        self.body.values.first(name)
    }

    /// First value whose underlying integer is `value`.
    pub fn get_enum_value(&self, value: i64) -> Option<&'db EnumValue> {
        self.body.values.iter().find(|v| v.value == value)
    }

    /// Every value whose underlying integer is `value`.
    pub fn get_enum_values(&self, value: i64) -> Vec<&'db EnumValue> {
        self.body.values.iter().filter(|v| v.value == value).collect()
    }

    pub fn enum_value_at(&self, index: usize) -> Option<&'db EnumValue> {
        self.body.values.get(index)
    }

    pub fn enum_values(self) -> impl Iterator<Item = &'db EnumValue> + 'db {
        self.body.values.iter()
    }

    pub fn enum_value_count(&self) -> usize {
        self.body.values.len()
    }

    predicate_lookups!("enum value", &'db EnumValue, enum_values,
        get_enum_value_by_predicate, get_enum_values_by_predicate, foreach_enum_value);
}

impl PartialEq for EnumRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data.entity.id == other.data.entity.id
    }
}

impl Eq for EnumRef<'_> {}

impl fmt::Debug for EnumRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enum({})", self.data.entity.qualified_name)
    }
}
