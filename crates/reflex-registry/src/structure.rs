//! Structs and classes: inheritance graph, member registries and instantiators.

use std::fmt;

use rustc_hash::FxHashSet;

use reflex_core::{
    AccessSpecifier, Entity, EntityId, EntityKind, Field, InstantiationError, Method,
    MethodFlags, Properties, Reflected, StaticField, StaticMethod, Value,
};

use crate::archetype::{ArchetypeData, ArchetypeRef};
use crate::database::Database;
use crate::entity_ref::EntityRef;
use crate::enumeration::EnumRef;
use crate::lookup::predicate_lookups;
use crate::member_table::MemberTable;
use crate::store::ArchetypeIdx;

// ============================================================================
// Storage
// ============================================================================

/// One inheritance edge as stored on the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParentEdge {
    pub access: AccessSpecifier,
    pub parent: ArchetypeIdx,
}

#[derive(Debug, Default)]
pub(crate) struct StructData {
    pub direct_parents: Vec<ParentEdge>,
    /// Every struct inheriting from this one, directly or not, in the order
    /// the edges were registered.
    pub children: Vec<ArchetypeIdx>,
    children_set: FxHashSet<ArchetypeIdx>,
    pub fields: MemberTable<Field>,
    pub static_fields: MemberTable<StaticField>,
    pub methods: MemberTable<Method>,
    pub static_methods: MemberTable<StaticMethod>,
    pub nested: MemberTable<ArchetypeIdx>,
    /// Positions in `static_methods`, ascending by parameter count.
    pub instantiators: Vec<usize>,
}

impl StructData {
    /// Record a subclass. Returns `false` if it was already known.
    pub fn add_child(&mut self, child: ArchetypeIdx) -> bool {
        if self.children_set.insert(child) {
            self.children.push(child);
            true
        } else {
            false
        }
    }

    pub fn has_child(&self, child: ArchetypeIdx) -> bool {
        self.children_set.contains(&child)
    }

    pub fn reserve_children(&mut self, additional: usize) {
        self.children.reserve(additional);
        self.children_set.reserve(additional);
    }

    /// Insert the static method at `method` into the instantiator list.
    ///
    /// A parameterless instantiator replaces the current default one. Others
    /// are kept ascending by parameter count, after existing entries of the
    /// same count. Returns `true` when a default instantiator was replaced.
    pub fn add_instantiator(&mut self, method: usize) -> bool {
        let methods = &self.static_methods;
        let instantiators = &mut self.instantiators;
        if instantiators.contains(&method) {
            return false;
        }

        let arity = |pos: usize| methods.get(pos).map_or(0, StaticMethod::parameter_count);
        let new_arity = arity(method);

        if new_arity == 0 {
            if let Some(first) = instantiators.first_mut()
                && arity(*first) == 0
            {
                *first = method;
                return true;
            }
            instantiators.insert(0, method);
            return false;
        }

        let at = instantiators
            .iter()
            .position(|&pos| arity(pos) > new_arity)
            .unwrap_or(instantiators.len());
        instantiators.insert(at, method);
        false
    }
}

// ============================================================================
// View
// ============================================================================

/// An inheritance edge seen from the child.
#[derive(Debug, Clone, Copy)]
pub struct DirectParent<'db> {
    pub access: AccessSpecifier,
    pub parent: StructRef<'db>,
}

/// A struct or class in a frozen [`Database`].
#[derive(Clone, Copy)]
pub struct StructRef<'db> {
    db: &'db Database,
    idx: ArchetypeIdx,
    data: &'db ArchetypeData,
    body: &'db StructData,
}

impl<'db> StructRef<'db> {
    pub(crate) fn new(db: &'db Database, idx: ArchetypeIdx, data: &'db ArchetypeData, body: &'db StructData) -> Self {
        Self { db, idx, data, body }
    }

    pub(crate) fn data(&self) -> &'db ArchetypeData {
        self.data
    }

    pub(crate) fn db(&self) -> &'db Database {
        self.db
    }

    fn at(&self, idx: ArchetypeIdx) -> Option<StructRef<'db>> {
        ArchetypeRef::new(self.db, idx)?.as_struct()
    }

    // ==========================================================================
    // Entity
    // ==========================================================================

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

    pub fn is_class(&self) -> bool {
        self.kind() == EntityKind::Class
    }

    pub fn kind(&self) -> EntityKind {
        self.data.body.kind()
    }

    pub fn outer(&self) -> Option<EntityRef<'db>> {
        self.db.get_entity_by_id(self.data.entity.outer?)
    }

    pub fn as_archetype(&self) -> ArchetypeRef<'db> {
        if self.is_class() {
            ArchetypeRef::Class(*self)
        } else {
            ArchetypeRef::Struct(*self)
        }
    }

    // ==========================================================================
    // Inheritance
    // ==========================================================================

    /// Direct parents in registration order.
    pub fn direct_parents(self) -> impl Iterator<Item = DirectParent<'db>> + 'db {
        self.body.direct_parents.iter().filter_map(move |edge| {
            Some(DirectParent {
                access: edge.access,
                parent: self.at(edge.parent)?,
            })
        })
    }

    pub fn direct_parent_count(&self) -> usize {
        self.body.direct_parents.len()
    }

    /// Every struct inheriting from this one, directly or not.
    pub fn children(self) -> impl Iterator<Item = StructRef<'db>> + 'db {
        self.body.children.iter().filter_map(move |&idx| self.at(idx))
    }

    pub fn children_count(&self) -> usize {
        self.body.children.len()
    }

    /// Check if `other` is reachable through the parent edges. A struct does
    /// not inherit from itself.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn inherits_from(&self, other: StructRef<'_>) -> bool {
        self.direct_parents()
            .any(|edge| edge.parent.idx == other.idx || edge.parent.inherits_from(other))
    }

    /// Check if `other` inherits from this struct, directly or not.
    pub fn is_base_of(&self, other: StructRef<'_>) -> bool {
        self.body.has_child(other.idx)
    }

    // ==========================================================================
    // Fields
    // ==========================================================================

    /// First field named `name`. Parents are not searched.
    pub fn get_field(&self, name: &str) -> Option<&'db Field> {
        self.body.fields.first(name)
    }

    /// Every field named `name` (shadowed inherited fields included).
    pub fn get_fields(&self, name: &str) -> Vec<&'db Field> {
        self.body.fields.named(name).collect()
    }

    pub fn get_static_field(&self, name: &str) -> Option<&'db StaticField> {
        self.body.static_fields.first(name)
    }

    pub fn get_static_fields(&self, name: &str) -> Vec<&'db StaticField> {
        self.body.static_fields.named(name).collect()
    }

    pub fn fields(self) -> impl Iterator<Item = &'db Field> + 'db {
        self.body.fields.iter()
    }

    pub fn static_fields(self) -> impl Iterator<Item = &'db StaticField> + 'db {
        self.body.static_fields.iter()
    }

    pub fn field_count(&self) -> usize {
        self.body.fields.len()
    }

    pub fn static_field_count(&self) -> usize {
        self.body.static_fields.len()
    }

    predicate_lookups!("field", &'db Field, fields,
        get_field_by_predicate, get_fields_by_predicate, foreach_field);
    predicate_lookups!("static field", &'db StaticField, static_fields,
        get_static_field_by_predicate, get_static_fields_by_predicate, foreach_static_field);

    // ==========================================================================
    // Methods
    // ==========================================================================

    /// First method named `name` carrying at least `min_flags`.
    ///
    /// With `search_parents`, parents are searched depth-first in
    /// registration order when nothing matches locally.
    pub fn get_method(&self, name: &str, min_flags: MethodFlags, search_parents: bool) -> Option<&'db Method> {
        find_member(*self, |s| &s.methods, name, &|m: &Method| m.has_flags(min_flags), search_parents)
    }

    /// Every method named `name` carrying at least `min_flags`, each at most
    /// once even when reachable through several parents.
    pub fn get_methods(&self, name: &str, min_flags: MethodFlags, search_parents: bool) -> Vec<&'db Method> {
        let mut found = Vec::new();
        collect_members(
            *self,
            |s| &s.methods,
            name,
            &|m: &Method| m.has_flags(min_flags),
            search_parents,
            &mut found,
            &mut FxHashSet::default(),
        );
        found
    }

    pub fn get_static_method(
        &self,
        name: &str,
        min_flags: MethodFlags,
        search_parents: bool,
    ) -> Option<&'db StaticMethod> {
        find_member(*self, |s| &s.static_methods, name, &|m: &StaticMethod| m.has_flags(min_flags), search_parents)
    }

    pub fn get_static_methods(
        &self,
        name: &str,
        min_flags: MethodFlags,
        search_parents: bool,
    ) -> Vec<&'db StaticMethod> {
        let mut found = Vec::new();
        collect_members(
            *self,
            |s| &s.static_methods,
            name,
            &|m: &StaticMethod| m.has_flags(min_flags),
            search_parents,
            &mut found,
            &mut FxHashSet::default(),
        );
        found
    }

    pub fn methods(self) -> impl Iterator<Item = &'db Method> + 'db {
        self.body.methods.iter()
    }

    pub fn static_methods(self) -> impl Iterator<Item = &'db StaticMethod> + 'db {
        self.body.static_methods.iter()
    }

    pub fn method_count(&self) -> usize {
        self.body.methods.len()
    }

    pub fn static_method_count(&self) -> usize {
        self.body.static_methods.len()
    }

    predicate_lookups!("method", &'db Method, methods,
        get_method_by_predicate, get_methods_by_predicate, foreach_method);
    predicate_lookups!("static method", &'db StaticMethod, static_methods,
        get_static_method_by_predicate, get_static_methods_by_predicate, foreach_static_method);

    // ==========================================================================
    // Nested archetypes
    // ==========================================================================

    /// Nested archetype named `name` whose access matches `access`
    /// (`Undefined` matches any).
    pub fn get_nested_archetype(&self, name: &str, access: AccessSpecifier) -> Option<ArchetypeRef<'db>> {
        let &idx = self.body.nested.first(name)?;
        ArchetypeRef::new(self.db, idx).filter(|a| access.accepts(a.access()))
    }

    pub fn get_nested_struct(&self, name: &str, access: AccessSpecifier) -> Option<StructRef<'db>> {
        self.get_nested_archetype(name, access)
            .filter(ArchetypeRef::is_struct)
            .and_then(|a| a.as_struct())
    }

    pub fn get_nested_class(&self, name: &str, access: AccessSpecifier) -> Option<StructRef<'db>> {
        self.get_nested_archetype(name, access)
            .filter(ArchetypeRef::is_class)
            .and_then(|a| a.as_struct())
    }

    pub fn get_nested_enum(&self, name: &str, access: AccessSpecifier) -> Option<EnumRef<'db>> {
        self.get_nested_archetype(name, access)?.as_enum()
    }

    pub fn nested_archetypes(self) -> impl Iterator<Item = ArchetypeRef<'db>> + 'db {
        self.body.nested.iter().filter_map(move |&idx| ArchetypeRef::new(self.db, idx))
    }

    pub fn nested_archetype_count(&self) -> usize {
        self.body.nested.len()
    }

    predicate_lookups!("nested archetype", ArchetypeRef<'db>, nested_archetypes,
        get_nested_archetype_by_predicate, get_nested_archetypes_by_predicate, foreach_nested_archetype);

    // ==========================================================================
    // Instantiation
    // ==========================================================================

    /// Instantiators, ascending by parameter count.
    pub fn instantiators(self) -> impl Iterator<Item = &'db StaticMethod> + 'db {
        let methods = &self.body.static_methods;
        self.body.instantiators.iter().filter_map(move |&pos| methods.get(pos))
    }

    pub fn instantiator_count(&self) -> usize {
        self.body.instantiators.len()
    }

    /// The parameterless instantiator, if any.
    pub fn default_instantiator(&self) -> Option<&'db StaticMethod> {
        self.instantiators().next().filter(|m| m.parameter_count() == 0)
    }

    /// Build an instance with the first instantiator accepting `args`.
    pub fn make_instance<T: 'static>(&self, args: Vec<Value>) -> Result<T, InstantiationError> {
        let Some(instantiator) = self.instantiators().find(|m| m.signature.accepts(&args)) else {
            return Err(InstantiationError::NoInstantiator {
                structure: self.qualified_name().to_string(),
                arity: args.len(),
            });
        };
        let value = instantiator.invoke(args)?;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| InstantiationError::ReturnType {
                structure: self.qualified_name().to_string(),
                expected: std::any::type_name::<T>(),
            })
    }
}

type TableOf<T> = for<'a> fn(&'a StructData) -> &'a MemberTable<T>;

#[cfg_attr(feature = "profiling", profiling::function)]
fn find_member<'db, T>(
    start: StructRef<'db>,
    table: TableOf<T>,
    name: &str,
    accept: &dyn Fn(&T) -> bool,
    search_parents: bool,
) -> Option<&'db T> {
    let local = table(start.body).named(name).find(|m| accept(*m));
    if local.is_some() || !search_parents {
        return local;
    }
    start
        .direct_parents()
        .find_map(|edge| find_member(edge.parent, table, name, accept, true))
}

#[cfg_attr(feature = "profiling", profiling::function)]
fn collect_members<'db, T: Reflected>(
    start: StructRef<'db>,
    table: TableOf<T>,
    name: &str,
    accept: &dyn Fn(&T) -> bool,
    search_parents: bool,
    found: &mut Vec<&'db T>,
    seen: &mut FxHashSet<EntityId>,
) {
    for member in table(start.body).named(name) {
        if accept(member) && seen.insert(member.id()) {
            found.push(member);
        }
    }
    if search_parents {
        for edge in start.direct_parents() {
            collect_members(edge.parent, table, name, accept, true, found, seen);
        }
    }
}

impl PartialEq for StructRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data.entity.id == other.data.entity.id
    }
}

impl Eq for StructRef<'_> {}

impl fmt::Debug for StructRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.data.entity.qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflex_core::{FieldFlags, TypeDesc, args};

    fn static_method<M, F: reflex_core::IntoStaticCallable<M>>(name: &str, f: F) -> StaticMethod {
        StaticMethod::new(name, MethodFlags::PUBLIC, f)
    }

    fn arities(data: &StructData) -> Vec<usize> {
        data.instantiators
            .iter()
            .map(|&pos| data.static_methods.get(pos).map_or(usize::MAX, StaticMethod::parameter_count))
            .collect()
    }

    #[test]
    fn instantiators_ascend_and_stay_stable() {
        let mut data = StructData::default();
        let two = data.static_methods.insert("make", static_method("make", |_: i32, _: i32| 0u8));
        let one_a = data.static_methods.insert("make", static_method("make", |_: i32| 0u8));
        let three = data.static_methods.insert("make", static_method("make", |_: i32, _: i32, _: i32| 0u8));
        let one_b = data.static_methods.insert("make", static_method("make", |_: f32| 0u8));

        for pos in [two, one_a, three, one_b] {
            assert!(!data.add_instantiator(pos));
        }
        assert_eq!(arities(&data), [1, 1, 2, 3]);
        assert_eq!(data.instantiators, [one_a, one_b, two, three]);
    }

    #[test]
    fn default_instantiator_is_replaced() {
        let mut data = StructData::default();
        let one = data.static_methods.insert("make", static_method("make", |_: i32| 0u8));
        let first = data.static_methods.insert("make", static_method("make", || 0u8));
        let second = data.static_methods.insert("create", static_method("create", || 1u8));

        data.add_instantiator(one);
        assert!(!data.add_instantiator(first));
        assert!(data.add_instantiator(second));
        assert_eq!(data.instantiators, [second, one]);
        assert_eq!(arities(&data), [0, 1]);
    }

    #[test]
    fn children_are_a_set() {
        let mut data = StructData::default();
        assert!(data.add_child(ArchetypeIdx(3)));
        assert!(!data.add_child(ArchetypeIdx(3)));
        assert!(data.has_child(ArchetypeIdx(3)));
        assert_eq!(data.children, [ArchetypeIdx(3)]);
    }

    #[test]
    fn get_method_respects_min_flags() {
        use crate::{DatabaseBuilder, Owner};

        struct Player;
        let mut builder = DatabaseBuilder::new();
        let player = builder.add_class(Owner::ROOT, "Player", 0).unwrap();
        builder
            .add_method(player, Method::new("update", MethodFlags::PUBLIC, |_: &mut Player| ()))
            .unwrap();
        builder
            .add_method(
                player,
                Method::new("update", MethodFlags::PUBLIC | MethodFlags::VIRTUAL, |_: &mut Player, _: f32| ()),
            )
            .unwrap();
        builder
            .add_field(player, Field::new("hp", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, 0))
            .unwrap();
        let db = builder.build();
        let player = db.get_class_by_name("Player").unwrap();

        assert_eq!(player.get_method("update", MethodFlags::empty(), false).unwrap().parameter_count(), 0);
        assert_eq!(player.get_method("update", MethodFlags::VIRTUAL, false).unwrap().parameter_count(), 1);
        assert!(player.get_method("update", MethodFlags::STATIC, false).is_none());
        assert_eq!(player.get_methods("update", MethodFlags::PUBLIC, false).len(), 2);
        assert!(player.get_field("hp").is_some());
        assert!(player.get_field("").is_none());
        assert!(player.make_instance::<u8>(args![]).is_err());
    }
}
