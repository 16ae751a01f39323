//! Namespaces and the file-level root scope.
//!
//! A namespace holds nested namespaces, archetypes, variables and functions.
//! Every kind is exposed through the same four operations: by name, first
//! by predicate, all by predicate, and a visitor walk.

use std::fmt;

use reflex_core::{Entity, EntityId, Function, FunctionFlags, Properties, VarFlags, Variable};

use crate::archetype::ArchetypeRef;
use crate::database::Database;
use crate::enumeration::EnumRef;
use crate::lookup::predicate_lookups;
use crate::member_table::MemberTable;
use crate::store::{ArchetypeIdx, NamespaceIdx};
use crate::structure::StructRef;

#[derive(Debug)]
pub(crate) struct NamespaceData {
    pub entity: Entity,
    pub namespaces: MemberTable<NamespaceIdx>,
    pub archetypes: MemberTable<ArchetypeIdx>,
    pub variables: MemberTable<Variable>,
    pub functions: MemberTable<Function>,
}

impl NamespaceData {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            namespaces: MemberTable::default(),
            archetypes: MemberTable::default(),
            variables: MemberTable::default(),
            functions: MemberTable::default(),
        }
    }
}

/// A namespace, or the file-level root scope, in a frozen [`Database`].
#[derive(Clone, Copy)]
pub struct NamespaceRef<'db> {
    db: &'db Database,
    idx: NamespaceIdx,
    data: &'db NamespaceData,
}

impl<'db> NamespaceRef<'db> {
    pub(crate) fn new(db: &'db Database, idx: NamespaceIdx) -> Option<Self> {
        let data = db.store.namespace(idx)?;
        Some(Self::from_data(db, idx, data))
    }

    pub(crate) fn from_data(db: &'db Database, idx: NamespaceIdx, data: &'db NamespaceData) -> Self {
        Self { db, idx, data }
    }

    pub fn entity(&self) -> &'db Entity {
        &self.data.entity
    }

    /// Id of the namespace. Empty for the root scope.
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

    pub fn is_root(&self) -> bool {
        self.idx == NamespaceIdx::ROOT
    }

    /// The enclosing namespace. `None` for top-level namespaces and the root.
    pub fn outer(&self) -> Option<NamespaceRef<'db>> {
        self.db.get_namespace_by_id(self.data.entity.outer?)
    }

    // ==========================================================================
    // Namespaces
    // ==========================================================================

    pub fn get_namespace_by_name(&self, name: &str) -> Option<NamespaceRef<'db>> {
        let &idx = self.data.namespaces.first(name)?;
        NamespaceRef::new(self.db, idx)
    }

    pub fn namespaces(self) -> impl Iterator<Item = NamespaceRef<'db>> + 'db {
        self.data.namespaces.iter().filter_map(move |&idx| NamespaceRef::new(self.db, idx))
    }

    pub fn namespace_count(&self) -> usize {
        self.data.namespaces.len()
    }

    predicate_lookups!("namespace", NamespaceRef<'db>, namespaces,
        get_namespace_by_predicate, get_namespaces_by_predicate, foreach_namespace);

    // ==========================================================================
    // Archetypes
    // ==========================================================================

    /// Archetype of any kind named `name`.
    pub fn get_archetype_by_name(&self, name: &str) -> Option<ArchetypeRef<'db>> {
        let &idx = self.data.archetypes.first(name)?;
        ArchetypeRef::new(self.db, idx)
    }

    pub fn get_struct_by_name(&self, name: &str) -> Option<StructRef<'db>> {
        match self.get_archetype_by_name(name)? {
            ArchetypeRef::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_class_by_name(&self, name: &str) -> Option<StructRef<'db>> {
        match self.get_archetype_by_name(name)? {
            ArchetypeRef::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn get_enum_by_name(&self, name: &str) -> Option<EnumRef<'db>> {
        self.get_archetype_by_name(name)?.as_enum()
    }

    fn archetypes_in_registration_order(self) -> impl Iterator<Item = ArchetypeRef<'db>> + Clone + 'db {
        self.data
            .archetypes
            .iter()
            .filter_map(move |&idx| ArchetypeRef::new(self.db, idx))
    }

    /// Every archetype: structs and classes first, then enums, then
    /// fundamentals, each group in registration order.
    pub fn archetypes(self) -> impl Iterator<Item = ArchetypeRef<'db>> + 'db {
        let all = self.archetypes_in_registration_order();
        all.clone()
            .filter(|a| a.as_struct().is_some())
            .chain(all.clone().filter(ArchetypeRef::is_enum))
            .chain(all.filter(ArchetypeRef::is_fundamental))
    }

    pub fn structs(self) -> impl Iterator<Item = StructRef<'db>> + 'db {
        self.archetypes_in_registration_order().filter_map(|a| match a {
            ArchetypeRef::Struct(s) => Some(s),
            _ => None,
        })
    }

    pub fn classes(self) -> impl Iterator<Item = StructRef<'db>> + 'db {
        self.archetypes_in_registration_order().filter_map(|a| match a {
            ArchetypeRef::Class(c) => Some(c),
            _ => None,
        })
    }

    pub fn enums(self) -> impl Iterator<Item = EnumRef<'db>> + 'db {
        self.archetypes_in_registration_order().filter_map(|a| a.as_enum())
    }

    pub fn archetype_count(&self) -> usize {
        self.data.archetypes.len()
    }

    pub fn struct_count(&self) -> usize {
        self.structs().count()
    }

    pub fn class_count(&self) -> usize {
        self.classes().count()
    }

    pub fn enum_count(&self) -> usize {
        self.enums().count()
    }

    predicate_lookups!("archetype", ArchetypeRef<'db>, archetypes,
        get_archetype_by_predicate, get_archetypes_by_predicate, foreach_archetype);
    predicate_lookups!("struct", StructRef<'db>, structs,
        get_struct_by_predicate, get_structs_by_predicate, foreach_struct);
    predicate_lookups!("class", StructRef<'db>, classes,
        get_class_by_predicate, get_classes_by_predicate, foreach_class);
    predicate_lookups!("enum", EnumRef<'db>, enums,
        get_enum_by_predicate, get_enums_by_predicate, foreach_enum);

    // ==========================================================================
    // Variables
    // ==========================================================================

    /// First variable named `name` carrying at least `min_flags`.
    pub fn get_variable_by_name(&self, name: &str, min_flags: VarFlags) -> Option<&'db Variable> {
        self.data
            .variables
            .named(name)
            .find(|v| v.flags.contains(min_flags))
    }

    pub fn variables(self) -> impl Iterator<Item = &'db Variable> + 'db {
        self.data.variables.iter()
    }

    pub fn variable_count(&self) -> usize {
        self.data.variables.len()
    }

    predicate_lookups!("variable", &'db Variable, variables,
        get_variable_by_predicate, get_variables_by_predicate, foreach_variable);

    // ==========================================================================
    // Functions
    // ==========================================================================

    /// First function named `name` carrying at least `min_flags`.
    pub fn get_function_by_name(&self, name: &str, min_flags: FunctionFlags) -> Option<&'db Function> {
        self.data
            .functions
            .named(name)
            .find(|f| f.has_flags(min_flags))
    }

    /// The overload set named `name`, filtered by `min_flags`.
    pub fn get_functions_by_name(&self, name: &str, min_flags: FunctionFlags) -> Vec<&'db Function> {
        self.data
            .functions
            .named(name)
            .filter(|f| f.has_flags(min_flags))
            .collect()
    }

    pub fn functions(self) -> impl Iterator<Item = &'db Function> + 'db {
        self.data.functions.iter()
    }

    pub fn function_count(&self) -> usize {
        self.data.functions.len()
    }

    predicate_lookups!("function", &'db Function, functions,
        get_function_by_predicate, get_functions_by_predicate, foreach_function);
}

impl PartialEq for NamespaceRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl Eq for NamespaceRef<'_> {}

impl fmt::Debug for NamespaceRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("Namespace(<root>)")
        } else {
            write!(f, "Namespace({})", self.data.entity.qualified_name)
        }
    }
}
