//! Kind-tagged handle to any registered entity.

use reflex_core::{
    Entity, EntityId, EntityKind, EnumValue, Field, Function, Method, Properties, StaticField,
    StaticMethod, Variable,
};

use crate::archetype::ArchetypeRef;
use crate::enumeration::EnumRef;
use crate::namespace::NamespaceRef;
use crate::structure::StructRef;

/// Any entity of a frozen database, as returned by id and name lookups.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'db> {
    Namespace(NamespaceRef<'db>),
    Archetype(ArchetypeRef<'db>),
    Field(&'db Field),
    StaticField(&'db StaticField),
    Method(&'db Method),
    StaticMethod(&'db StaticMethod),
    EnumValue(&'db EnumValue),
    Variable(&'db Variable),
    Function(&'db Function),
}

impl<'db> EntityRef<'db> {
    pub fn entity(&self) -> &'db Entity {
        match *self {
            EntityRef::Namespace(n) => n.entity(),
            EntityRef::Archetype(a) => a.entity(),
            EntityRef::Field(f) => &f.entity,
            EntityRef::StaticField(f) => &f.entity,
            EntityRef::Method(m) => &m.entity,
            EntityRef::StaticMethod(m) => &m.entity,
            EntityRef::EnumValue(v) => &v.entity,
            EntityRef::Variable(v) => &v.entity,
            EntityRef::Function(f) => &f.entity,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match *self {
            EntityRef::Namespace(_) => EntityKind::Namespace,
            EntityRef::Archetype(a) => a.kind(),
            EntityRef::Field(_) => EntityKind::Field,
            EntityRef::StaticField(_) => EntityKind::StaticField,
            EntityRef::Method(_) => EntityKind::Method,
            EntityRef::StaticMethod(_) => EntityKind::StaticMethod,
            EntityRef::EnumValue(_) => EntityKind::EnumValue,
            EntityRef::Variable(_) => EntityKind::Variable,
            EntityRef::Function(_) => EntityKind::Function,
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity().id
    }

    pub fn name(&self) -> &'db str {
        &self.entity().name
    }

    pub fn qualified_name(&self) -> &'db str {
        &self.entity().qualified_name
    }

    /// Id of the enclosing entity.
    pub fn outer_id(&self) -> Option<EntityId> {
        self.entity().outer
    }

    pub fn properties(&self) -> &'db Properties {
        &self.entity().properties
    }

    pub fn as_namespace(&self) -> Option<NamespaceRef<'db>> {
        match *self {
            EntityRef::Namespace(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_archetype(&self) -> Option<ArchetypeRef<'db>> {
        match *self {
            EntityRef::Archetype(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<StructRef<'db>> {
        self.as_archetype()?.as_struct()
    }

    pub fn as_enum(&self) -> Option<EnumRef<'db>> {
        self.as_archetype()?.as_enum()
    }

    pub fn as_field(&self) -> Option<&'db Field> {
        match *self {
            EntityRef::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_static_field(&self) -> Option<&'db StaticField> {
        match *self {
            EntityRef::StaticField(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&'db Method> {
        match *self {
            EntityRef::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_static_method(&self) -> Option<&'db StaticMethod> {
        match *self {
            EntityRef::StaticMethod(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_enum_value(&self) -> Option<&'db EnumValue> {
        match *self {
            EntityRef::EnumValue(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&'db Variable> {
        match *self {
            EntityRef::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&'db Function> {
        match *self {
            EntityRef::Function(f) => Some(f),
            _ => None,
        }
    }
}
