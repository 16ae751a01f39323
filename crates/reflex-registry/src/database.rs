//! Read-only phase: the frozen [`Database`].
//!
//! A `Database` is produced by [`DatabaseBuilder::build`](crate::DatabaseBuilder::build)
//! and offers no way to add, remove or change entities. It is `Send + Sync`
//! and can be shared across threads without locking. Reads and writes through
//! static-field addresses are not synchronized by the database.

use std::fmt;

use reflex_core::{EntityId, Function, FunctionFlags, Reflect, SCOPE_SEPARATOR, VarFlags, Variable};

use crate::archetype::ArchetypeRef;
use crate::builder::DatabaseBuilder;
use crate::entity_ref::EntityRef;
use crate::enumeration::EnumRef;
use crate::namespace::NamespaceRef;
use crate::store::{NamespaceIdx, Slot, Store};
use crate::structure::StructRef;

/// Frozen reflection database.
pub struct Database {
    pub(crate) store: Store,
}

impl Database {
    pub(crate) fn from_store(store: Store) -> Self {
        Self { store }
    }

    /// Start a new registration phase.
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// The file-level scope holding top-level namespaces and declarations.
    pub fn root(&self) -> NamespaceRef<'_> {
        NamespaceRef::from_data(self, NamespaceIdx::ROOT, self.store.root())
    }

    /// Number of registered entities (the root scope excluded).
    pub fn entity_count(&self) -> usize {
        self.store.entity_count()
    }

    // ==========================================================================
    // Lookup by id
    // ==========================================================================

    /// Any entity by id, in constant time.
    pub fn get_entity_by_id(&self, id: EntityId) -> Option<EntityRef<'_>> {
        let slot = *self.store.index.get(&id)?;
        Some(match slot {
            Slot::Namespace(idx) => EntityRef::Namespace(NamespaceRef::new(self, idx)?),
            Slot::Archetype(idx) => EntityRef::Archetype(ArchetypeRef::new(self, idx)?),
            Slot::Field(idx, pos) => EntityRef::Field(self.store.struct_data(idx)?.fields.get(pos)?),
            Slot::StaticField(idx, pos) => EntityRef::StaticField(self.store.struct_data(idx)?.static_fields.get(pos)?),
            Slot::Method(idx, pos) => EntityRef::Method(self.store.struct_data(idx)?.methods.get(pos)?),
            Slot::StaticMethod(idx, pos) => EntityRef::StaticMethod(self.store.struct_data(idx)?.static_methods.get(pos)?),
            Slot::EnumValue(idx, pos) => EntityRef::EnumValue(self.store.enum_data(idx)?.values.get(pos)?),
            Slot::Variable(ns, pos) => EntityRef::Variable(self.store.namespace(ns)?.variables.get(pos)?),
            Slot::Function(ns, pos) => EntityRef::Function(self.store.namespace(ns)?.functions.get(pos)?),
        })
    }

    /// Any entity by the string its id is hashed from: the qualified name,
    /// plus the parameter list for callables (`game::heal(i32)`).
    pub fn get_entity_by_name(&self, qualified_name: &str) -> Option<EntityRef<'_>> {
        if qualified_name.is_empty() {
            return None;
        }
        self.get_entity_by_id(EntityId::from_name(qualified_name))
    }

    pub fn get_namespace_by_id(&self, id: EntityId) -> Option<NamespaceRef<'_>> {
        self.get_entity_by_id(id)?.as_namespace()
    }

    pub fn get_archetype_by_id(&self, id: EntityId) -> Option<ArchetypeRef<'_>> {
        self.get_entity_by_id(id)?.as_archetype()
    }

    pub fn get_struct_by_id(&self, id: EntityId) -> Option<StructRef<'_>> {
        self.get_entity_by_id(id)?.as_struct()
    }

    pub fn get_enum_by_id(&self, id: EntityId) -> Option<EnumRef<'_>> {
        self.get_entity_by_id(id)?.as_enum()
    }

    /// Archetype registered for the Rust type `T`.
    pub fn archetype_of<T: Reflect>(&self) -> Option<ArchetypeRef<'_>> {
        self.get_archetype_by_id(T::entity_id())
    }

    // ==========================================================================
    // Lookup by name
    // ==========================================================================

    /// Namespace by path (`"game"`, `"game::ai"`), walking from the root.
    pub fn get_namespace_by_name(&self, path: &str) -> Option<NamespaceRef<'_>> {
        if path.is_empty() {
            return None;
        }
        path.split(SCOPE_SEPARATOR)
            .try_fold(self.root(), |ns, segment| ns.get_namespace_by_name(segment))
    }

    pub fn get_archetype_by_name(&self, name: &str) -> Option<ArchetypeRef<'_>> {
        self.root().get_archetype_by_name(name)
    }

    pub fn get_struct_by_name(&self, name: &str) -> Option<StructRef<'_>> {
        self.root().get_struct_by_name(name)
    }

    pub fn get_class_by_name(&self, name: &str) -> Option<StructRef<'_>> {
        self.root().get_class_by_name(name)
    }

    pub fn get_enum_by_name(&self, name: &str) -> Option<EnumRef<'_>> {
        self.root().get_enum_by_name(name)
    }

    pub fn get_variable_by_name(&self, name: &str, min_flags: VarFlags) -> Option<&Variable> {
        self.root().get_variable_by_name(name, min_flags)
    }

    pub fn get_function_by_name(&self, name: &str, min_flags: FunctionFlags) -> Option<&Function> {
        self.root().get_function_by_name(name, min_flags)
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("entities", &self.store.entity_count())
            .field("namespaces", &(self.store.namespaces.len() - 1))
            .field("archetypes", &self.store.archetypes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NamespaceKey, Owner};
    use reflex_core::{EntityKind, Method, MethodFlags, TypeDesc};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn database_is_shareable() {
        assert_send_sync::<Database>();
    }

    #[test]
    fn nested_namespace_paths() {
        let mut builder = DatabaseBuilder::new();
        let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
        let ai = builder.add_namespace(game, "ai").unwrap();
        builder.add_struct(ai, "Planner", 4).unwrap();
        let db = builder.build();

        let ai = db.get_namespace_by_name("game::ai").unwrap();
        assert_eq!(ai.qualified_name(), "game::ai");
        assert_eq!(ai.outer().map(|ns| ns.name()), Some("game"));
        assert!(ai.get_struct_by_name("Planner").is_some());
        assert!(db.get_namespace_by_name("game::nope").is_none());
        assert!(db.get_namespace_by_name("").is_none());
    }

    #[test]
    fn id_index_covers_every_kind() {
        struct Player;
        let mut builder = DatabaseBuilder::with_fundamentals().unwrap();
        let player = builder.add_class(Owner::ROOT, "Player", 0).unwrap();
        let heal = builder
            .add_method(player, Method::new("heal", MethodFlags::PUBLIC, |_: &mut Player, _: i32| ()))
            .unwrap();
        let db = builder.build();

        let entity = db.get_entity_by_id(heal).unwrap();
        assert_eq!(entity.kind(), EntityKind::Method);
        assert_eq!(entity.qualified_name(), "Player::heal");
        assert_eq!(entity.outer_id(), Some(player.id()));
        assert!(db.get_entity_by_name("Player::heal(i32)").is_some());
        assert!(db.get_entity_by_name("Player::heal").is_none());

        assert_eq!(db.archetype_of::<i32>().map(|a| a.memory_size()), Some(4));
        assert_eq!(db.get_archetype_by_id(TypeDesc::of::<f64>().archetype.unwrap()).map(|a| a.name()), Some("f64"));
        assert!(db.get_struct_by_id(player.id()).is_some());
        assert!(db.get_enum_by_id(player.id()).is_none());
    }
}
