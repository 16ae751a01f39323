//! Registration phase: the mutable, single-threaded [`DatabaseBuilder`].
//!
//! Generated registration code creates namespaces and archetypes first and
//! then registers their members. Every call binds the entity's qualified
//! name, id and outer entity, and indexes it by id. [`DatabaseBuilder::build`]
//! consumes the builder and freezes everything into a [`Database`].
//!
//! # Example
//!
//! ```
//! use reflex_registry::{DatabaseBuilder, NamespaceKey};
//! use reflex_core::AccessSpecifier;
//!
//! let mut builder = DatabaseBuilder::new();
//! let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
//! let entity = builder.add_class(game, "Entity", 16).unwrap();
//! let player = builder.add_class(game, "Player", 32).unwrap();
//! builder.add_direct_parent(player, entity, AccessSpecifier::Public).unwrap();
//!
//! let db = builder.build();
//! let player = db.get_entity_by_name("game::Player").unwrap().as_struct().unwrap();
//! let entity = db.get_entity_by_name("game::Entity").unwrap().as_struct().unwrap();
//! assert!(player.inherits_from(entity));
//! assert!(entity.is_base_of(player));
//! ```

use petgraph::algo::has_path_connecting;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;

use reflex_core::{
    AccessSpecifier, ComplexProperty, Entity, EntityId, EnumValue, Field, Function, Method,
    Reflect, Reflected, RegistrationError, SCOPE_SEPARATOR, StaticField, StaticMethod, TypeDesc,
    Variable,
};

use crate::archetype::{ArchetypeBody, ArchetypeData};
use crate::database::Database;
use crate::enumeration::EnumData;
use crate::namespace::NamespaceData;
use crate::store::{ArchetypeIdx, NamespaceIdx, Slot, Store};
use crate::structure::{ParentEdge, StructData};

// ============================================================================
// Keys
// ============================================================================

/// Builder handle to a namespace (or the file-level root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceKey {
    idx: NamespaceIdx,
    id: EntityId,
}

impl NamespaceKey {
    /// The file-level root scope.
    pub const ROOT: NamespaceKey = NamespaceKey {
        idx: NamespaceIdx::ROOT,
        id: EntityId::EMPTY,
    };

    /// Id of the namespace. Empty for the root.
    pub fn id(&self) -> EntityId {
        self.id
    }
}

/// Builder handle to a struct or class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructKey {
    idx: ArchetypeIdx,
    id: EntityId,
}

impl StructKey {
    pub fn id(&self) -> EntityId {
        self.id
    }
}

/// Builder handle to an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumKey {
    idx: ArchetypeIdx,
    id: EntityId,
}

impl EnumKey {
    pub fn id(&self) -> EntityId {
        self.id
    }
}

/// Where an archetype is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// A namespace, or the root.
    Namespace(NamespaceKey),
    /// Nested in a struct with the given access specifier.
    Struct(StructKey, AccessSpecifier),
}

impl Owner {
    pub const ROOT: Owner = Owner::Namespace(NamespaceKey::ROOT);
}

impl From<NamespaceKey> for Owner {
    fn from(key: NamespaceKey) -> Self {
        Owner::Namespace(key)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Mutable database under construction.
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    store: Store,
    /// Child -> parent edges, used to reject cycles.
    inheritance: DiGraphMap<ArchetypeIdx, ()>,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with every fundamental type registered at the root.
    pub fn with_fundamentals() -> Result<Self, RegistrationError> {
        let mut builder = Self::new();
        builder.add_fundamentals()?;
        Ok(builder)
    }

    /// Register `void`, `bool`, `char` and every integer and float type at the root.
    pub fn add_fundamentals(&mut self) -> Result<(), RegistrationError> {
        self.add_fundamental::<()>()?;
        self.add_fundamental::<bool>()?;
        self.add_fundamental::<char>()?;
        self.add_fundamental::<i8>()?;
        self.add_fundamental::<i16>()?;
        self.add_fundamental::<i32>()?;
        self.add_fundamental::<i64>()?;
        self.add_fundamental::<isize>()?;
        self.add_fundamental::<u8>()?;
        self.add_fundamental::<u16>()?;
        self.add_fundamental::<u32>()?;
        self.add_fundamental::<u64>()?;
        self.add_fundamental::<usize>()?;
        self.add_fundamental::<f32>()?;
        self.add_fundamental::<f64>()?;
        Ok(())
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.store.entity_count()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.store.index.contains_key(&id)
    }

    // ==========================================================================
    // Binding
    // ==========================================================================

    /// Bind `entity` under `qualified_name`, hashing `identity_key` into its id.
    fn bind_entity(
        &self,
        entity: &mut Entity,
        qualified_name: String,
        identity_key: &str,
        outer: EntityId,
    ) -> Result<EntityId, RegistrationError> {
        let id = EntityId::from_name(identity_key);
        if self.store.index.contains_key(&id) {
            return Err(RegistrationError::DuplicateId {
                name: qualified_name,
                id,
            });
        }
        let outer = (!outer.is_empty()).then_some(outer);
        entity.bind(qualified_name, id, outer);
        Ok(id)
    }

    /// Bind a namespace or archetype entity declared in `scope`.
    fn bind_scoped(&self, entity: &mut Entity, scope: &str, outer: EntityId) -> Result<EntityId, RegistrationError> {
        if entity.name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        let qualified_name = qualify(scope, &entity.name);
        let key = qualified_name.clone();
        self.bind_entity(entity, qualified_name, &key, outer)
    }

    /// Bind a member descriptor declared in `scope`. Callables fold their
    /// parameter types into the id.
    fn bind<T: Reflected>(&self, item: &mut T, scope: &str, outer: EntityId) -> Result<EntityId, RegistrationError> {
        if item.name().is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        let qualified_name = qualify(scope, item.name());
        let key = item.identity_key(&qualified_name);
        self.bind_entity(item.entity_mut(), qualified_name, &key, outer)
    }

    fn namespace_scope(&self, key: NamespaceKey) -> Result<(String, EntityId), RegistrationError> {
        let ns = self
            .store
            .namespace(key.idx)
            .ok_or_else(|| RegistrationError::UnknownEntity(key.id.to_string()))?;
        Ok((ns.entity.qualified_name.clone(), ns.entity.id))
    }

    fn archetype_scope(&self, idx: ArchetypeIdx) -> Result<(String, EntityId), RegistrationError> {
        let archetype = self
            .store
            .archetype(idx)
            .ok_or_else(|| RegistrationError::UnknownEntity(format!("archetype #{}", idx.0)))?;
        Ok((archetype.entity.qualified_name.clone(), archetype.entity.id))
    }

    // ==========================================================================
    // Namespaces
    // ==========================================================================

    /// Open the namespace `name` inside `parent`, creating it on first use.
    pub fn add_namespace(&mut self, parent: NamespaceKey, name: &str) -> Result<NamespaceKey, RegistrationError> {
        if let Some(&idx) = self.store.namespace_mut(parent.idx)?.namespaces.first(name) {
            let id = self.store.namespaces[idx.0].entity.id;
            return Ok(NamespaceKey { idx, id });
        }

        let (scope, outer) = self.namespace_scope(parent)?;
        let mut data = NamespaceData::new(Entity::new(name));
        let id = self.bind_scoped(&mut data.entity, &scope, outer)?;
        let idx = NamespaceIdx(self.store.namespaces.len());
        log::debug!("registered namespace {}", data.entity.qualified_name);

        self.store.namespaces.push(data);
        self.store.namespace_mut(parent.idx)?.namespaces.insert(name, idx);
        self.store.index.insert(id, Slot::Namespace(idx));
        Ok(NamespaceKey { idx, id })
    }

    // ==========================================================================
    // Archetypes
    // ==========================================================================

    fn add_archetype(
        &mut self,
        owner: Owner,
        name: &str,
        memory_size: usize,
        body: ArchetypeBody,
    ) -> Result<ArchetypeIdx, RegistrationError> {
        let (scope, outer, access) = match owner {
            Owner::Namespace(ns) => {
                let (scope, outer) = self.namespace_scope(ns)?;
                (scope, outer, AccessSpecifier::Undefined)
            }
            Owner::Struct(parent, access) => {
                let (scope, outer) = self.archetype_scope(parent.idx)?;
                (scope, outer, access)
            }
        };
        let already_declared = match owner {
            Owner::Namespace(ns) => self.store.namespace_mut(ns.idx)?.archetypes.contains_name(name),
            Owner::Struct(parent, _) => self.store.struct_mut(parent.idx)?.nested.contains_name(name),
        };
        if already_declared {
            return Err(RegistrationError::DuplicateArchetype(qualify(&scope, name)));
        }

        let mut data = ArchetypeData::new(Entity::new(name), memory_size, body);
        data.access = access;
        let id = self.bind_scoped(&mut data.entity, &scope, outer)?;
        let idx = ArchetypeIdx(self.store.archetypes.len());
        log::debug!("registered {} {}", data.body.kind(), data.entity.qualified_name);

        self.store.archetypes.push(data);
        match owner {
            Owner::Namespace(ns) => {
                self.store.namespace_mut(ns.idx)?.archetypes.insert(name, idx);
            }
            Owner::Struct(parent, _) => {
                self.store.struct_mut(parent.idx)?.nested.insert(name, idx);
            }
        }
        self.store.index.insert(id, Slot::Archetype(idx));
        Ok(idx)
    }

    pub fn add_struct(
        &mut self,
        owner: impl Into<Owner>,
        name: &str,
        memory_size: usize,
    ) -> Result<StructKey, RegistrationError> {
        let body = ArchetypeBody::Struct(StructData::default());
        let idx = self.add_archetype(owner.into(), name, memory_size, body)?;
        self.inheritance.add_node(idx);
        Ok(StructKey {
            idx,
            id: self.store.archetypes[idx.0].entity.id,
        })
    }

    pub fn add_class(
        &mut self,
        owner: impl Into<Owner>,
        name: &str,
        memory_size: usize,
    ) -> Result<StructKey, RegistrationError> {
        let body = ArchetypeBody::Class(StructData::default());
        let idx = self.add_archetype(owner.into(), name, memory_size, body)?;
        self.inheritance.add_node(idx);
        Ok(StructKey {
            idx,
            id: self.store.archetypes[idx.0].entity.id,
        })
    }

    /// Register an enum. Its size is the size of the underlying type.
    pub fn add_enum(
        &mut self,
        owner: impl Into<Owner>,
        name: &str,
        underlying: TypeDesc,
    ) -> Result<EnumKey, RegistrationError> {
        let memory_size = underlying.size;
        let body = ArchetypeBody::Enum(EnumData::new(underlying));
        let idx = self.add_archetype(owner.into(), name, memory_size, body)?;
        Ok(EnumKey {
            idx,
            id: self.store.archetypes[idx.0].entity.id,
        })
    }

    /// Register the fundamental archetype of `T` at the root.
    pub fn add_fundamental<T: Reflect>(&mut self) -> Result<EntityId, RegistrationError> {
        let idx = self.add_archetype(Owner::ROOT, T::QUALIFIED_NAME, T::MEMORY_SIZE, ArchetypeBody::Fundamental)?;
        Ok(self.store.archetypes[idx.0].entity.id)
    }

    pub fn add_enum_value(&mut self, key: EnumKey, mut value: EnumValue) -> Result<EntityId, RegistrationError> {
        let (scope, outer) = self.archetype_scope(key.idx)?;
        let id = self.bind(&mut value, &scope, outer)?;
        let name = value.entity.name.clone();
        let pos = self.store.enum_mut(key.idx)?.values.insert(&name, value);
        self.store.index.insert(id, Slot::EnumValue(key.idx, pos));
        Ok(id)
    }

    // ==========================================================================
    // Inheritance
    // ==========================================================================

    /// Record that `child` inherits from `parent`.
    ///
    /// Updates the child's parent list and the subclass set of `parent` and
    /// of every ancestor, and copies the parent's current properties into the
    /// child. Edges that would make a struct its own ancestor are rejected;
    /// repeated edges are ignored.
    pub fn add_direct_parent(
        &mut self,
        child: StructKey,
        parent: StructKey,
        access: AccessSpecifier,
    ) -> Result<(), RegistrationError> {
        if child.idx == parent.idx || has_path_connecting(&self.inheritance, parent.idx, child.idx, None) {
            return Err(RegistrationError::CyclicInheritance {
                child: self.store.describe(child.id),
                parent: self.store.describe(parent.id),
            });
        }
        if self.inheritance.contains_edge(child.idx, parent.idx) {
            return Ok(());
        }
        let parent_properties = self.store.archetype_mut(parent.idx)?.entity.properties.clone();
        self.store.struct_mut(parent.idx)?;

        let child_archetype = self.store.archetype_mut(child.idx)?;
        child_archetype.entity.properties.inherit_from(&parent_properties);
        let (ArchetypeBody::Struct(child_data) | ArchetypeBody::Class(child_data)) = &mut child_archetype.body else {
            return Err(RegistrationError::NotAStruct(child_archetype.entity.qualified_name.clone()));
        };
        child_data.direct_parents.push(ParentEdge {
            access,
            parent: parent.idx,
        });
        let mut descendants = vec![child.idx];
        descendants.extend_from_slice(&child_data.children);

        self.inheritance.add_edge(child.idx, parent.idx, ());

        // The parent and all of its ancestors gain the child's whole subtree.
        let mut ancestors = Vec::new();
        let mut dfs = Dfs::new(&self.inheritance, parent.idx);
        while let Some(ancestor) = dfs.next(&self.inheritance) {
            ancestors.push(ancestor);
        }
        for ancestor in ancestors {
            let data = self.store.struct_mut(ancestor)?;
            for &descendant in &descendants {
                data.add_child(descendant);
            }
        }

        log::debug!(
            "{} inherits from {}",
            self.store.describe(child.id),
            self.store.describe(parent.id)
        );
        Ok(())
    }

    // ==========================================================================
    // Members
    // ==========================================================================

    /// Bind a struct member and return its id and the name it is indexed under.
    fn bind_member<T: Reflected>(&self, key: StructKey, item: &mut T) -> Result<(EntityId, String), RegistrationError> {
        let (scope, outer) = self.archetype_scope(key.idx)?;
        let id = self.bind(item, &scope, outer)?;
        Ok((id, item.name().to_string()))
    }

    fn check_static(member: &str, is_static: bool, expected_static: bool) -> Result<(), RegistrationError> {
        if is_static == expected_static {
            Ok(())
        } else {
            Err(RegistrationError::StaticFlagMismatch {
                member: member.to_string(),
                expected_static,
            })
        }
    }

    /// Bind a field registered on `key` and declared by `owner`.
    ///
    /// A field declared by another struct is an inherited copy: it is named
    /// and identified after the declaring struct, so it shares its id with
    /// the declaring registration. The id index keeps pointing at the
    /// declaring registration. Returns the id and whether the registration
    /// should be indexed.
    fn bind_field<T: Reflected>(
        &self,
        key: StructKey,
        item: &mut T,
        owner: EntityId,
        field_slot: fn(Slot) -> Option<ArchetypeIdx>,
    ) -> Result<(EntityId, bool), RegistrationError> {
        if item.name().is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        let (scope, outer) = self.archetype_scope(key.idx)?;
        let declared_here = owner == key.id;
        let scope = if declared_here {
            scope
        } else {
            self.store
                .index
                .get(&owner)
                .and_then(|&slot| self.store.entity(slot))
                .map(|entity| entity.qualified_name.clone())
                .ok_or_else(|| RegistrationError::UnknownEntity(owner.to_string()))?
        };
        let qualified_name = qualify(&scope, item.name());
        let id = EntityId::from_name(&item.identity_key(&qualified_name));
        let indexed = match self.store.index.get(&id) {
            None => true,
            Some(&slot) => match field_slot(slot) {
                Some(registered_in) if registered_in != key.idx => declared_here,
                _ => {
                    return Err(RegistrationError::DuplicateId {
                        name: qualified_name,
                        id,
                    });
                }
            },
        };
        let outer = (!outer.is_empty()).then_some(outer);
        item.entity_mut().bind(qualified_name, id, outer);
        Ok((id, indexed))
    }

    /// Register an instance field. The field must not be flagged static.
    ///
    /// Fields inherited from a parent may be registered on the child with
    /// [`Field::declared_in`]; they keep the declaring struct's id and sit
    /// next to any field of the same name the child declares itself.
    pub fn add_field(&mut self, key: StructKey, mut field: Field) -> Result<EntityId, RegistrationError> {
        Self::check_static(field.name(), field.is_static(), false)?;
        if field.owner.is_empty() {
            field.owner = key.id;
        }
        let owner = field.owner;
        let (id, indexed) = self.bind_field(key, &mut field, owner, |slot| match slot {
            Slot::Field(idx, _) => Some(idx),
            _ => None,
        })?;
        let name = field.entity.name.clone();
        let data = self.store.struct_mut(key.idx)?;
        if data.fields.named(&name).any(|existing| existing.entity.id == id) {
            return Err(RegistrationError::DuplicateId {
                name: field.entity.qualified_name,
                id,
            });
        }
        let pos = data.fields.insert(&name, field);
        if indexed {
            self.store.index.insert(id, Slot::Field(key.idx, pos));
        }
        Ok(id)
    }

    /// Register a static field. The field must be flagged static.
    ///
    /// Inherited static fields follow the same rules as [`Self::add_field`].
    pub fn add_static_field(&mut self, key: StructKey, mut field: StaticField) -> Result<EntityId, RegistrationError> {
        Self::check_static(field.name(), field.is_static(), true)?;
        if field.owner.is_empty() {
            field.owner = key.id;
        }
        let owner = field.owner;
        let (id, indexed) = self.bind_field(key, &mut field, owner, |slot| match slot {
            Slot::StaticField(idx, _) => Some(idx),
            _ => None,
        })?;
        let name = field.entity.name.clone();
        let data = self.store.struct_mut(key.idx)?;
        if data.static_fields.named(&name).any(|existing| existing.entity.id == id) {
            return Err(RegistrationError::DuplicateId {
                name: field.entity.qualified_name,
                id,
            });
        }
        let pos = data.static_fields.insert(&name, field);
        if indexed {
            self.store.index.insert(id, Slot::StaticField(key.idx, pos));
        }
        Ok(id)
    }

    /// Register an instance method. The method must not be flagged static.
    pub fn add_method(&mut self, key: StructKey, mut method: Method) -> Result<EntityId, RegistrationError> {
        Self::check_static(method.name(), method.is_static(), false)?;
        if method.owner.is_empty() {
            method.owner = key.id;
        }
        let (id, name) = self.bind_member(key, &mut method)?;
        let pos = self.store.struct_mut(key.idx)?.methods.insert(&name, method);
        self.store.index.insert(id, Slot::Method(key.idx, pos));
        Ok(id)
    }

    /// Register a static method. The method must be flagged static.
    pub fn add_static_method(&mut self, key: StructKey, mut method: StaticMethod) -> Result<EntityId, RegistrationError> {
        Self::check_static(method.name(), method.is_static(), true)?;
        if method.owner.is_empty() {
            method.owner = key.id;
        }
        let (id, name) = self.bind_member(key, &mut method)?;
        let pos = self.store.struct_mut(key.idx)?.static_methods.insert(&name, method);
        self.store.index.insert(id, Slot::StaticMethod(key.idx, pos));
        Ok(id)
    }

    /// Use a static method of `key` as an instantiator.
    ///
    /// Instantiators are kept ascending by parameter count. One with the same
    /// count as existing entries goes after them, except a parameterless one,
    /// which replaces the current default instantiator.
    pub fn add_instantiator(&mut self, key: StructKey, method: EntityId) -> Result<(), RegistrationError> {
        let pos = match self.store.index.get(&method) {
            Some(&Slot::StaticMethod(owner, pos)) if owner == key.idx => pos,
            _ => {
                return Err(RegistrationError::InvalidInstantiator {
                    structure: self.store.describe(key.id),
                    method: self.store.describe(method),
                });
            }
        };
        if self.store.struct_mut(key.idx)?.add_instantiator(pos) {
            log::debug!("replaced default instantiator of {}", self.store.describe(key.id));
        }
        Ok(())
    }

    /// Register a static method and use it as an instantiator.
    pub fn add_static_method_instantiator(
        &mut self,
        key: StructKey,
        method: StaticMethod,
    ) -> Result<EntityId, RegistrationError> {
        let id = self.add_static_method(key, method)?;
        self.add_instantiator(key, id)?;
        Ok(id)
    }

    // ==========================================================================
    // Namespace members
    // ==========================================================================

    pub fn add_variable(&mut self, ns: NamespaceKey, mut variable: Variable) -> Result<EntityId, RegistrationError> {
        let (scope, outer) = self.namespace_scope(ns)?;
        let id = self.bind(&mut variable, &scope, outer)?;
        let name = variable.entity.name.clone();
        let pos = self.store.namespace_mut(ns.idx)?.variables.insert(&name, variable);
        self.store.index.insert(id, Slot::Variable(ns.idx, pos));
        Ok(id)
    }

    pub fn add_function(&mut self, ns: NamespaceKey, mut function: Function) -> Result<EntityId, RegistrationError> {
        let (scope, outer) = self.namespace_scope(ns)?;
        let id = self.bind(&mut function, &scope, outer)?;
        let name = function.entity.name.clone();
        let pos = self.store.namespace_mut(ns.idx)?.functions.insert(&name, function);
        self.store.index.insert(id, Slot::Function(ns.idx, pos));
        Ok(id)
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, RegistrationError> {
        let slot = *self
            .store
            .index
            .get(&id)
            .ok_or_else(|| RegistrationError::UnknownEntity(id.to_string()))?;
        self.store
            .entity_mut(slot)
            .ok_or_else(|| RegistrationError::UnknownEntity(id.to_string()))
    }

    /// Attach a simple property to any registered entity.
    pub fn add_simple_property(&mut self, id: EntityId, name: impl Into<String>) -> Result<(), RegistrationError> {
        self.entity_mut(id)?.properties.add_simple(name);
        Ok(())
    }

    /// Attach a complex property to any registered entity.
    pub fn add_complex_property(&mut self, id: EntityId, property: ComplexProperty) -> Result<(), RegistrationError> {
        self.entity_mut(id)?.properties.add_complex(property);
        Ok(())
    }

    // ==========================================================================
    // Capacity hints
    // ==========================================================================

    pub fn reserve_fields(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.fields.reserve(additional);
        Ok(())
    }

    pub fn reserve_static_fields(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.static_fields.reserve(additional);
        Ok(())
    }

    pub fn reserve_methods(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.methods.reserve(additional);
        Ok(())
    }

    pub fn reserve_static_methods(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.static_methods.reserve(additional);
        Ok(())
    }

    pub fn reserve_nested_archetypes(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.nested.reserve(additional);
        Ok(())
    }

    pub fn reserve_direct_parents(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.direct_parents.reserve(additional);
        Ok(())
    }

    pub fn reserve_children(&mut self, key: StructKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.struct_mut(key.idx)?.reserve_children(additional);
        Ok(())
    }

    pub fn reserve_enum_values(&mut self, key: EnumKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.enum_mut(key.idx)?.values.reserve(additional);
        Ok(())
    }

    pub fn reserve_namespaces(&mut self, ns: NamespaceKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.namespace_mut(ns.idx)?.namespaces.reserve(additional);
        self.store.namespaces.reserve(additional);
        Ok(())
    }

    pub fn reserve_archetypes(&mut self, ns: NamespaceKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.namespace_mut(ns.idx)?.archetypes.reserve(additional);
        self.store.archetypes.reserve(additional);
        Ok(())
    }

    pub fn reserve_variables(&mut self, ns: NamespaceKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.namespace_mut(ns.idx)?.variables.reserve(additional);
        Ok(())
    }

    pub fn reserve_functions(&mut self, ns: NamespaceKey, additional: usize) -> Result<(), RegistrationError> {
        self.store.namespace_mut(ns.idx)?.functions.reserve(additional);
        Ok(())
    }

    // ==========================================================================
    // Freeze
    // ==========================================================================

    /// Freeze the registered entities into a read-only [`Database`].
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(self) -> Database {
        log::info!(
            "reflection database frozen: {} entities, {} namespaces, {} archetypes",
            self.store.entity_count(),
            self.store.namespaces.len() - 1,
            self.store.archetypes.len()
        );
        Database::from_store(self.store)
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}{SCOPE_SEPARATOR}{name}")
    }
}
