//! Common entity data shared by every descriptor.

use std::fmt;

use crate::{ComplexProperty, EntityId, Properties};

/// Discriminates every kind of reflected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Namespace,
    Struct,
    Class,
    Enum,
    EnumValue,
    Fundamental,
    Field,
    StaticField,
    Method,
    StaticMethod,
    Variable,
    Function,
}

impl EntityKind {
    /// Check if this kind is an archetype (a reflected type).
    pub fn is_archetype(self) -> bool {
        matches!(
            self,
            EntityKind::Struct | EntityKind::Class | EntityKind::Enum | EntityKind::Fundamental
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Namespace => "namespace",
            EntityKind::Struct => "struct",
            EntityKind::Class => "class",
            EntityKind::Enum => "enum",
            EntityKind::EnumValue => "enum value",
            EntityKind::Fundamental => "fundamental",
            EntityKind::Field => "field",
            EntityKind::StaticField => "static field",
            EntityKind::Method => "method",
            EntityKind::StaticMethod => "static method",
            EntityKind::Variable => "variable",
            EntityKind::Function => "function",
        };
        f.write_str(name)
    }
}

/// Identity, name, outer back-reference and properties of one entity.
///
/// An entity starts unbound (empty id, qualified name equal to its simple
/// name). The database builder binds it when it is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Content-addressed id, derived from the qualified name.
    pub id: EntityId,
    /// Simple name.
    pub name: String,
    /// Fully qualified name (`a::B::c`).
    pub qualified_name: String,
    /// Id of the lexically enclosing entity. Never owning.
    pub outer: Option<EntityId>,
    /// Attached properties.
    pub properties: Properties,
}

impl Entity {
    /// Create an unbound entity.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: EntityId::EMPTY,
            qualified_name: name.clone(),
            name,
            outer: None,
            properties: Properties::new(),
        }
    }

    /// Bind the entity to its place in the database.
    pub fn bind(&mut self, qualified_name: String, id: EntityId, outer: Option<EntityId>) {
        self.qualified_name = qualified_name;
        self.id = id;
        self.outer = outer;
    }

    pub fn is_bound(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Access to the [`Entity`] part of a descriptor.
pub trait Reflected {
    /// Kind of the descriptor.
    const KIND: EntityKind;

    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    fn id(&self) -> EntityId {
        self.entity().id
    }

    fn name(&self) -> &str {
        &self.entity().name
    }

    fn qualified_name(&self) -> &str {
        &self.entity().qualified_name
    }

    fn outer(&self) -> Option<EntityId> {
        self.entity().outer
    }

    fn properties(&self) -> &Properties {
        &self.entity().properties
    }

    /// String the id is hashed from, given the qualified name.
    ///
    /// Callables override this to fold in their parameter types.
    fn identity_key(&self, qualified_name: &str) -> String {
        qualified_name.to_string()
    }

    /// Attach a simple property before registration.
    fn with_property(mut self, name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.entity_mut().properties.add_simple(name);
        self
    }

    /// Attach a complex property before registration.
    fn with_complex_property(mut self, property: ComplexProperty) -> Self
    where
        Self: Sized,
    {
        self.entity_mut().properties.add_complex(property);
        self
    }
}
