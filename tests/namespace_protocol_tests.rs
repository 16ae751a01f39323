//! Namespace lookups and the predicate/visitor protocol.
//!
//! Every container follows the same rules: an absent callback finds nothing,
//! a fault raised by the callback aborts the call and is returned unchanged,
//! and a visitor returning `false` stops the walk.

use std::convert::Infallible;

use reflex::prelude::*;

#[derive(Debug, PartialEq, Eq)]
struct Boom(&'static str);

type NoNamespacePredicate = fn(NamespaceRef<'_>) -> Result<bool, Infallible>;
type NoArchetypePredicate = fn(ArchetypeRef<'_>) -> Result<bool, Infallible>;
type NoVariablePredicate = fn(&Variable) -> Result<bool, Infallible>;

static TEST_COUNTER: i32 = 3;

fn database() -> Database {
    let mut builder = DatabaseBuilder::with_fundamentals().unwrap();
    let ns = builder.add_namespace(NamespaceKey::ROOT, "test_namespace").unwrap();
    builder.add_namespace(ns, "nested_namespace").unwrap();
    builder.add_namespace(ns, "nested_namespace2").unwrap();
    builder.add_namespace(ns, "other").unwrap();

    builder.add_struct(ns, "NamespaceStruct", 4).unwrap();
    builder.add_class(ns, "NamespaceClass", 8).unwrap();
    builder.add_enum(ns, "NamespaceEnum", TypeDesc::of::<u8>()).unwrap();

    builder
        .add_variable(
            ns,
            Variable::new("counter", TypeDesc::of::<i32>(), VarFlags::CONST, StaticAddress::read_only(&TEST_COUNTER)),
        )
        .unwrap();
    builder
        .add_function(ns, Function::new("add", FunctionFlags::INLINE, |a: i32, b: i32| a + b))
        .unwrap();
    builder
        .add_function(ns, Function::new("add", FunctionFlags::empty(), |a: f32, b: f32| a + b))
        .unwrap();
    builder.build()
}

fn test_namespace(db: &Database) -> NamespaceRef<'_> {
    db.get_namespace_by_name("test_namespace").unwrap()
}

// ============================================================================
// By-name lookups
// ============================================================================

#[test]
fn test_empty_name_finds_nothing() {
    let db = database();
    assert!(test_namespace(&db).get_namespace_by_name("").is_none());
    assert!(test_namespace(&db).get_struct_by_name("").is_none());
    assert!(db.get_namespace_by_name("").is_none());
}

#[test]
fn test_existing_namespace_name() {
    let db = database();
    let nested = test_namespace(&db).get_namespace_by_name("nested_namespace").unwrap();
    assert_eq!(nested.qualified_name(), "test_namespace::nested_namespace");
    assert_eq!(nested.outer(), Some(test_namespace(&db)));
}

#[test]
fn test_missing_namespace_name() {
    let db = database();
    assert!(test_namespace(&db).get_namespace_by_name("inexistant_namespace").is_none());
}

#[test]
fn test_nested_path_lookup() {
    let db = database();
    let nested = db.get_namespace_by_name("test_namespace::nested_namespace2").unwrap();
    assert_eq!(nested.name(), "nested_namespace2");
    assert!(db.get_namespace_by_name("test_namespace::missing").is_none());
}

#[test]
fn test_archetype_lookup_by_kind() {
    let db = database();
    let ns = test_namespace(&db);

    assert!(ns.get_struct_by_name("NamespaceStruct").is_some());
    assert!(ns.get_struct_by_name("NamespaceClass").is_none());
    assert!(ns.get_class_by_name("NamespaceClass").is_some());
    assert!(ns.get_enum_by_name("NamespaceEnum").is_some());
    assert_eq!(ns.get_archetype_by_name("NamespaceClass").unwrap().kind(), EntityKind::Class);
    assert_eq!(ns.archetype_count(), 3);
}

#[test]
fn test_variable_min_flags() {
    let db = database();
    let ns = test_namespace(&db);
    assert!(ns.get_variable_by_name("counter", VarFlags::CONST).is_some());
    assert!(ns.get_variable_by_name("counter", VarFlags::STATIC).is_none());

    let counter = ns.get_variable_by_name("counter", VarFlags::empty()).unwrap();
    assert_eq!(unsafe { counter.get::<i32>() }, Ok(3));
}

#[test]
fn test_function_overloads() {
    let db = database();
    let ns = test_namespace(&db);
    assert_eq!(ns.get_functions_by_name("add", FunctionFlags::empty()).len(), 2);
    assert_eq!(ns.get_functions_by_name("add", FunctionFlags::INLINE).len(), 1);

    let add = ns.get_function_by_name("add", FunctionFlags::INLINE).unwrap();
    let sum = add.invoke(args![2i32, 3i32]).unwrap();
    assert_eq!(*sum.downcast::<i32>().unwrap(), 5);
}

// ============================================================================
// get_namespace_by_predicate
// ============================================================================

#[test]
fn test_absent_predicate_finds_nothing() {
    let db = database();
    let found = test_namespace(&db).get_namespace_by_predicate(None::<NoNamespacePredicate>);
    assert_eq!(found, Ok(None));
}

#[test]
fn test_finding_predicate() {
    let db = database();
    let first_letter = 'n';
    let found = test_namespace(&db)
        .get_namespace_by_predicate(Some(|ns: NamespaceRef<'_>| {
            Ok::<_, Infallible>(ns.name().starts_with(first_letter))
        }))
        .unwrap();
    assert_eq!(found.map(|ns| ns.name()), Some("nested_namespace"));
}

#[test]
fn test_not_finding_predicate() {
    let db = database();
    let found = test_namespace(&db)
        .get_namespace_by_predicate(Some(|ns: NamespaceRef<'_>| Ok::<_, Infallible>(ns.name().starts_with('v'))))
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn test_faulting_predicate() {
    let db = database();
    let result = test_namespace(&db).get_namespace_by_predicate(Some(|_: NamespaceRef<'_>| Err(Boom("predicate"))));
    assert_eq!(result.unwrap_err(), Boom("predicate"));
}

// ============================================================================
// get_namespaces_by_predicate
// ============================================================================

#[test]
fn test_plural_absent_predicate() {
    let db = database();
    let found = test_namespace(&db).get_namespaces_by_predicate(None::<NoNamespacePredicate>);
    assert_eq!(found.map(|v| v.len()), Ok(0));
}

#[test]
fn test_plural_finding_predicate() {
    let db = database();
    let found = test_namespace(&db)
        .get_namespaces_by_predicate(Some(|ns: NamespaceRef<'_>| Ok::<_, Infallible>(ns.name().starts_with('n'))))
        .unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn test_plural_not_finding_predicate() {
    let db = database();
    let found = test_namespace(&db)
        .get_namespaces_by_predicate(Some(|ns: NamespaceRef<'_>| Ok::<_, Infallible>(ns.name().starts_with('v'))))
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_plural_faulting_predicate() {
    let db = database();
    let mut calls = 0;
    let result = test_namespace(&db).get_namespaces_by_predicate(Some(|_: NamespaceRef<'_>| {
        calls += 1;
        Err(Boom("plural"))
    }));
    assert_eq!(result.unwrap_err(), Boom("plural"));
    assert_eq!(calls, 1);
}

// ============================================================================
// foreach_namespace
// ============================================================================

#[test]
fn test_absent_visitor() {
    let db = database();
    assert_eq!(test_namespace(&db).foreach_namespace(None::<NoNamespacePredicate>), Ok(false));
}

#[test]
fn test_breaking_visitor() {
    let db = database();
    let mut counter = 0;
    let completed = test_namespace(&db)
        .foreach_namespace(Some(|_: NamespaceRef<'_>| {
            counter += 1;
            Ok::<_, Infallible>(false)
        }))
        .unwrap();
    assert!(!completed);
    assert_eq!(counter, 1);
}

#[test]
fn test_non_breaking_visitor() {
    let db = database();
    let ns = test_namespace(&db);
    let mut counter = 0;
    let completed = ns
        .foreach_namespace(Some(|_: NamespaceRef<'_>| {
            counter += 1;
            Ok::<_, Infallible>(true)
        }))
        .unwrap();
    assert!(completed);
    assert_eq!(counter, ns.namespace_count());
}

#[test]
fn test_faulting_visitor() {
    let db = database();
    let result = test_namespace(&db).foreach_namespace(Some(|_: NamespaceRef<'_>| Err(Boom("visitor"))));
    assert_eq!(result, Err(Boom("visitor")));
}

// ============================================================================
// Other containers share the protocol
// ============================================================================

#[test]
fn test_archetype_protocol() {
    let db = database();
    let ns = test_namespace(&db);

    assert_eq!(ns.foreach_archetype(None::<NoArchetypePredicate>), Ok(false));

    let classes = ns
        .get_archetypes_by_predicate(Some(|a: ArchetypeRef<'_>| Ok::<_, Infallible>(a.is_class())))
        .unwrap();
    assert_eq!(classes.len(), 1);

    let mut visited = Vec::new();
    let completed = ns
        .foreach_archetype(Some(|a: ArchetypeRef<'_>| {
            visited.push(a.name().to_string());
            Ok::<_, Infallible>(true)
        }))
        .unwrap();
    assert!(completed);
    assert_eq!(visited.len(), ns.archetype_count());
}

#[test]
fn test_root_holds_fundamentals() {
    let db = database();
    let root = db.root();
    assert!(root.is_root());
    let fundamentals = root
        .get_archetypes_by_predicate(Some(|a: ArchetypeRef<'_>| Ok::<_, Infallible>(a.is_fundamental())))
        .unwrap();
    assert!(fundamentals.iter().any(|a| a.name() == "i32"));
    assert!(db.archetype_of::<f64>().is_some());
}

#[test]
fn test_variable_protocol() {
    let db = database();
    let ns = test_namespace(&db);
    assert_eq!(ns.get_variable_by_predicate(None::<NoVariablePredicate>).map(|v| v.is_none()), Ok(true));

    let found = ns
        .get_variable_by_predicate(Some(|v: &Variable| Ok::<_, Infallible>(v.is_read_only())))
        .unwrap();
    assert_eq!(found.map(|v| v.name()), Some("counter"));
}

#[test]
fn test_function_protocol_fault_stops_walk() {
    let db = database();
    let ns = test_namespace(&db);
    let mut seen = 0;
    let result = ns.foreach_function(Some(|_: &Function| {
        seen += 1;
        if seen == 2 { Err(Boom("second")) } else { Ok(true) }
    }));
    assert_eq!(result, Err(Boom("second")));
    assert_eq!(seen, 2);
}
