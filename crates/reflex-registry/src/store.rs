//! Arena storage shared by the builder and the frozen database.
//!
//! Archetypes and namespaces live in flat vectors and refer to each other by
//! index; the id index maps every registered entity to its slot. Nothing in
//! the arena owns anything else, so parent/child and outer edges are plain
//! indices or ids.

use rustc_hash::FxHashMap;

use reflex_core::{Entity, EntityId, RegistrationError};

use crate::archetype::{ArchetypeBody, ArchetypeData};
use crate::enumeration::EnumData;
use crate::namespace::NamespaceData;
use crate::structure::StructData;

/// Index of an archetype in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ArchetypeIdx(pub usize);

/// Index of a namespace in the arena. Index 0 is the file-level root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NamespaceIdx(pub usize);

impl NamespaceIdx {
    pub const ROOT: NamespaceIdx = NamespaceIdx(0);
}

/// Where an entity lives in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Namespace(NamespaceIdx),
    Archetype(ArchetypeIdx),
    Field(ArchetypeIdx, usize),
    StaticField(ArchetypeIdx, usize),
    Method(ArchetypeIdx, usize),
    StaticMethod(ArchetypeIdx, usize),
    EnumValue(ArchetypeIdx, usize),
    Variable(NamespaceIdx, usize),
    Function(NamespaceIdx, usize),
}

#[derive(Debug)]
pub(crate) struct Store {
    pub namespaces: Vec<NamespaceData>,
    pub archetypes: Vec<ArchetypeData>,
    pub index: FxHashMap<EntityId, Slot>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            namespaces: vec![NamespaceData::new(Entity::new(""))],
            archetypes: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl Store {
    /// The file-level root, created with the store.
    pub fn root(&self) -> &NamespaceData {
        &self.namespaces[NamespaceIdx::ROOT.0]
    }

    pub fn namespace(&self, idx: NamespaceIdx) -> Option<&NamespaceData> {
        self.namespaces.get(idx.0)
    }

    pub fn namespace_mut(&mut self, idx: NamespaceIdx) -> Result<&mut NamespaceData, RegistrationError> {
        self.namespaces
            .get_mut(idx.0)
            .ok_or_else(|| RegistrationError::UnknownEntity(format!("namespace #{}", idx.0)))
    }

    pub fn archetype(&self, idx: ArchetypeIdx) -> Option<&ArchetypeData> {
        self.archetypes.get(idx.0)
    }

    pub fn archetype_mut(&mut self, idx: ArchetypeIdx) -> Result<&mut ArchetypeData, RegistrationError> {
        self.archetypes
            .get_mut(idx.0)
            .ok_or_else(|| RegistrationError::UnknownEntity(format!("archetype #{}", idx.0)))
    }

    pub fn struct_mut(&mut self, idx: ArchetypeIdx) -> Result<&mut StructData, RegistrationError> {
        let archetype = self.archetype_mut(idx)?;
        match &mut archetype.body {
            ArchetypeBody::Struct(data) | ArchetypeBody::Class(data) => Ok(data),
            _ => Err(RegistrationError::NotAStruct(archetype.entity.qualified_name.clone())),
        }
    }

    pub fn enum_mut(&mut self, idx: ArchetypeIdx) -> Result<&mut EnumData, RegistrationError> {
        let archetype = self.archetype_mut(idx)?;
        match &mut archetype.body {
            ArchetypeBody::Enum(data) => Ok(data),
            _ => Err(RegistrationError::NotAnEnum(archetype.entity.qualified_name.clone())),
        }
    }

    /// Mutable access to the entity stored at `slot`.
    pub fn entity_mut(&mut self, slot: Slot) -> Option<&mut Entity> {
        match slot {
            Slot::Namespace(ns) => self.namespaces.get_mut(ns.0).map(|n| &mut n.entity),
            Slot::Archetype(a) => self.archetypes.get_mut(a.0).map(|a| &mut a.entity),
            Slot::Field(a, pos) => self.struct_mut(a).ok()?.fields.get_mut(pos).map(|m| &mut m.entity),
            Slot::StaticField(a, pos) => self.struct_mut(a).ok()?.static_fields.get_mut(pos).map(|m| &mut m.entity),
            Slot::Method(a, pos) => self.struct_mut(a).ok()?.methods.get_mut(pos).map(|m| &mut m.entity),
            Slot::StaticMethod(a, pos) => self.struct_mut(a).ok()?.static_methods.get_mut(pos).map(|m| &mut m.entity),
            Slot::EnumValue(a, pos) => self.enum_mut(a).ok()?.values.get_mut(pos).map(|v| &mut v.entity),
            Slot::Variable(ns, pos) => self.namespaces.get_mut(ns.0)?.variables.get_mut(pos).map(|v| &mut v.entity),
            Slot::Function(ns, pos) => self.namespaces.get_mut(ns.0)?.functions.get_mut(pos).map(|f| &mut f.entity),
        }
    }

    pub fn struct_data(&self, idx: ArchetypeIdx) -> Option<&StructData> {
        self.archetype(idx)?.body.as_struct()
    }

    pub fn enum_data(&self, idx: ArchetypeIdx) -> Option<&EnumData> {
        self.archetype(idx)?.body.as_enum()
    }

    /// The entity stored at `slot`.
    pub fn entity(&self, slot: Slot) -> Option<&Entity> {
        match slot {
            Slot::Namespace(ns) => self.namespace(ns).map(|n| &n.entity),
            Slot::Archetype(a) => self.archetype(a).map(|a| &a.entity),
            Slot::Field(a, pos) => self.struct_data(a)?.fields.get(pos).map(|m| &m.entity),
            Slot::StaticField(a, pos) => self.struct_data(a)?.static_fields.get(pos).map(|m| &m.entity),
            Slot::Method(a, pos) => self.struct_data(a)?.methods.get(pos).map(|m| &m.entity),
            Slot::StaticMethod(a, pos) => self.struct_data(a)?.static_methods.get(pos).map(|m| &m.entity),
            Slot::EnumValue(a, pos) => self.enum_data(a)?.values.get(pos).map(|v| &v.entity),
            Slot::Variable(ns, pos) => self.namespace(ns)?.variables.get(pos).map(|v| &v.entity),
            Slot::Function(ns, pos) => self.namespace(ns)?.functions.get(pos).map(|f| &f.entity),
        }
    }

    /// Qualified name of a registered entity, for error messages.
    pub fn describe(&self, id: EntityId) -> String {
        self.index
            .get(&id)
            .and_then(|&slot| self.entity(slot))
            .map_or_else(|| id.to_string(), |entity| entity.qualified_name.clone())
    }

    pub fn entity_count(&self) -> usize {
        self.index.len()
    }
}
