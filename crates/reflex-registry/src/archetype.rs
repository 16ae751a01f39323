//! Archetypes: the reflected types of the database.
//!
//! Every archetype shares [`ArchetypeData`] (entity, size, access) and carries
//! one [`ArchetypeBody`] variant with the data of its kind. Readers get an
//! [`ArchetypeRef`] and narrow it by pattern matching.

use std::fmt;

use reflex_core::{AccessSpecifier, Entity, EntityId, EntityKind, Properties};

use crate::database::Database;
use crate::entity_ref::EntityRef;
use crate::enumeration::{EnumData, EnumRef};
use crate::store::ArchetypeIdx;
use crate::structure::{StructData, StructRef};

// ============================================================================
// Storage
// ============================================================================

#[derive(Debug)]
pub(crate) struct ArchetypeData {
    pub entity: Entity,
    pub memory_size: usize,
    /// Set when nested in a struct; `Undefined` at namespace level.
    pub access: AccessSpecifier,
    pub body: ArchetypeBody,
}

/// Kind-specific data of an archetype.
#[derive(Debug)]
pub(crate) enum ArchetypeBody {
    Struct(StructData),
    Class(StructData),
    Enum(EnumData),
    Fundamental,
}

impl ArchetypeBody {
    pub fn kind(&self) -> EntityKind {
        match self {
            ArchetypeBody::Struct(_) => EntityKind::Struct,
            ArchetypeBody::Class(_) => EntityKind::Class,
            ArchetypeBody::Enum(_) => EntityKind::Enum,
            ArchetypeBody::Fundamental => EntityKind::Fundamental,
        }
    }

    pub fn as_struct(&self) -> Option<&StructData> {
        match self {
            ArchetypeBody::Struct(data) | ArchetypeBody::Class(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumData> {
        match self {
            ArchetypeBody::Enum(data) => Some(data),
            _ => None,
        }
    }
}

impl ArchetypeData {
    pub fn new(entity: Entity, memory_size: usize, body: ArchetypeBody) -> Self {
        Self {
            entity,
            memory_size,
            access: AccessSpecifier::Undefined,
            body,
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// A fundamental type such as `i32` or `void`.
#[derive(Clone, Copy)]
pub struct FundamentalRef<'db> {
    db: &'db Database,
    data: &'db ArchetypeData,
}

impl<'db> FundamentalRef<'db> {
    pub fn entity(&self) -> &'db Entity {
        &self.data.entity
    }

    pub fn id(&self) -> EntityId {
        self.data.entity.id
    }

    pub fn name(&self) -> &'db str {
        &self.data.entity.name
    }

    pub fn memory_size(&self) -> usize {
        self.data.memory_size
    }

    pub fn outer(&self) -> Option<EntityRef<'db>> {
        self.db.get_entity_by_id(self.data.entity.outer?)
    }
}

impl fmt::Debug for FundamentalRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fundamental({})", self.data.entity.qualified_name)
    }
}

/// Any archetype, narrowed by pattern matching.
#[derive(Clone, Copy)]
pub enum ArchetypeRef<'db> {
    Struct(StructRef<'db>),
    Class(StructRef<'db>),
    Enum(EnumRef<'db>),
    Fundamental(FundamentalRef<'db>),
}

impl<'db> ArchetypeRef<'db> {
    pub(crate) fn new(db: &'db Database, idx: ArchetypeIdx) -> Option<Self> {
        let data = db.store.archetype(idx)?;
        Some(match &data.body {
            ArchetypeBody::Struct(body) => ArchetypeRef::Struct(StructRef::new(db, idx, data, body)),
            ArchetypeBody::Class(body) => ArchetypeRef::Class(StructRef::new(db, idx, data, body)),
            ArchetypeBody::Enum(body) => ArchetypeRef::Enum(EnumRef::new(db, data, body)),
            ArchetypeBody::Fundamental => ArchetypeRef::Fundamental(FundamentalRef { db, data }),
        })
    }

    fn data(&self) -> &'db ArchetypeData {
        match self {
            ArchetypeRef::Struct(s) | ArchetypeRef::Class(s) => s.data(),
            ArchetypeRef::Enum(e) => e.data(),
            ArchetypeRef::Fundamental(f) => f.data,
        }
    }

    fn db(&self) -> &'db Database {
        match self {
            ArchetypeRef::Struct(s) | ArchetypeRef::Class(s) => s.db(),
            ArchetypeRef::Enum(e) => e.db(),
            ArchetypeRef::Fundamental(f) => f.db,
        }
    }

    pub fn entity(&self) -> &'db Entity {
        &self.data().entity
    }

    pub fn id(&self) -> EntityId {
        self.data().entity.id
    }

    pub fn name(&self) -> &'db str {
        &self.data().entity.name
    }

    pub fn qualified_name(&self) -> &'db str {
        &self.data().entity.qualified_name
    }

    pub fn properties(&self) -> &'db Properties {
        &self.data().entity.properties
    }

    pub fn kind(&self) -> EntityKind {
        self.data().body.kind()
    }

    pub fn memory_size(&self) -> usize {
        self.data().memory_size
    }

    /// Access specifier inside the enclosing struct. `Undefined` at namespace level.
    pub fn access(&self) -> AccessSpecifier {
        self.data().access
    }

    /// The enclosing namespace or struct, if any.
    pub fn outer(&self) -> Option<EntityRef<'db>> {
        self.db().get_entity_by_id(self.data().entity.outer?)
    }

    /// Narrow to a struct or class.
    pub fn as_struct(&self) -> Option<StructRef<'db>> {
        match self {
            ArchetypeRef::Struct(s) | ArchetypeRef::Class(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumRef<'db>> {
        match self {
            ArchetypeRef::Enum(e) => Some(*e),
            _ => None,
        }
    }

    pub fn as_fundamental(&self) -> Option<FundamentalRef<'db>> {
        match self {
            ArchetypeRef::Fundamental(f) => Some(*f),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, ArchetypeRef::Struct(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self, ArchetypeRef::Class(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, ArchetypeRef::Enum(_))
    }

    pub fn is_fundamental(&self) -> bool {
        matches!(self, ArchetypeRef::Fundamental(_))
    }
}

impl PartialEq for ArchetypeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ArchetypeRef<'_> {}

impl fmt::Debug for ArchetypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.qualified_name())
    }
}
