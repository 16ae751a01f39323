//! Properties, identity and the id index.

use reflex::prelude::*;

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_member_properties_attached_before_registration() {
    let mut builder = DatabaseBuilder::new();
    let player = builder.add_struct(NamespaceKey::ROOT, "Player", 4).unwrap();
    builder
        .add_field(
            player,
            Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, 0)
                .with_property("Serialize")
                .with_complex_property(ComplexProperty::new("Range", ["0", "100"])),
        )
        .unwrap();
    let db = builder.build();

    let health = db.get_struct_by_name("Player").unwrap().get_field("health").unwrap();
    let props = health.properties();
    assert!(props.has_simple("Serialize"));
    let range: Vec<_> = props.complex("Range").collect();
    assert_eq!(range.len(), 1);
    assert_eq!(range[0].sub_properties, vec!["0", "100"]);
}

#[test]
fn test_inherited_properties_are_a_snapshot() {
    let mut builder = DatabaseBuilder::new();
    let base = builder.add_class(NamespaceKey::ROOT, "Base", 1).unwrap();
    let derived = builder.add_class(NamespaceKey::ROOT, "Derived", 1).unwrap();

    builder.add_simple_property(base.id(), "Component").unwrap();
    builder
        .add_complex_property(base.id(), ComplexProperty::new("Category", ["Gameplay"]))
        .unwrap();
    builder.add_direct_parent(derived, base, AccessSpecifier::Public).unwrap();
    builder.add_simple_property(base.id(), "Late").unwrap();

    let db = builder.build();
    let derived = db.get_class_by_name("Derived").unwrap();
    assert!(derived.properties().has_simple("Component"));
    assert!(derived.properties().has_complex("Category"));
    assert!(!derived.properties().has_simple("Late"));
    assert!(db.get_class_by_name("Base").unwrap().properties().has_simple("Late"));
}

#[test]
fn test_properties_on_namespaces_and_enum_values() {
    let mut builder = DatabaseBuilder::new();
    let ns = builder.add_namespace(NamespaceKey::ROOT, "ui").unwrap();
    builder.add_simple_property(ns.id(), "Module").unwrap();
    let align = builder.add_enum(ns, "Align", TypeDesc::of::<u8>()).unwrap();
    let left = builder.add_enum_value(align, EnumValue::new("Left", 0)).unwrap();
    builder.add_simple_property(left, "Default").unwrap();

    let db = builder.build();
    assert!(db.get_namespace_by_name("ui").unwrap().properties().has_simple("Module"));
    let left = db.get_entity_by_id(left).unwrap();
    assert_eq!(left.kind(), EntityKind::EnumValue);
    assert!(left.properties().has_simple("Default"));
}

#[test]
fn test_property_on_unknown_entity() {
    let mut builder = DatabaseBuilder::new();
    assert!(matches!(
        builder.add_simple_property(EntityId::from_name("nowhere"), "X"),
        Err(RegistrationError::UnknownEntity(_))
    ));
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_ids_follow_qualified_names() {
    let mut builder = DatabaseBuilder::new();
    let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
    let player = builder.add_class(game, "Player", 1).unwrap();
    let db = builder.build();

    assert_eq!(player.id(), EntityId::from_name("game::Player"));
    let entity = db.get_entity_by_name("game::Player").unwrap();
    assert_eq!(entity.id(), player.id());
    assert_eq!(entity.kind(), EntityKind::Class);
    assert_eq!(entity.outer_id(), Some(game.id()));
    assert!(db.get_entity_by_name("").is_none());
    assert!(db.get_entity_by_name("game::Nobody").is_none());
}

#[test]
fn test_duplicate_archetype_in_scope() {
    let mut builder = DatabaseBuilder::new();
    let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
    builder.add_struct(game, "Player", 1).unwrap();
    assert!(matches!(
        builder.add_class(game, "Player", 1),
        Err(RegistrationError::DuplicateArchetype(_))
    ));
    // Same name in another scope is fine.
    builder.add_struct(NamespaceKey::ROOT, "Player", 1).unwrap();
}

#[test]
fn test_reopening_a_namespace() {
    let mut builder = DatabaseBuilder::new();
    let first = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
    let second = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
    assert_eq!(first, second);
    builder.add_struct(first, "A", 1).unwrap();
    builder.add_struct(second, "B", 1).unwrap();

    let db = builder.build();
    let game = db.get_namespace_by_name("game").unwrap();
    assert_eq!(game.struct_count(), 2);
    assert_eq!(db.root().namespace_count(), 1);
}

#[test]
fn test_empty_names_are_rejected() {
    let mut builder = DatabaseBuilder::new();
    assert_eq!(
        builder.add_namespace(NamespaceKey::ROOT, ""),
        Err(RegistrationError::EmptyName)
    );
    assert_eq!(
        builder.add_struct(NamespaceKey::ROOT, "", 1).map(|k| k.id()),
        Err(RegistrationError::EmptyName)
    );
}

#[test]
fn test_nested_archetypes() {
    let mut builder = DatabaseBuilder::new();
    let outer = builder.add_class(NamespaceKey::ROOT, "Outer", 8).unwrap();
    builder
        .add_struct(Owner::Struct(outer, AccessSpecifier::Private), "Node", 4)
        .unwrap();
    let mode = builder
        .add_enum(Owner::Struct(outer, AccessSpecifier::Public), "Mode", TypeDesc::of::<u8>())
        .unwrap();
    builder.add_enum_value(mode, EnumValue::new("On", 1)).unwrap();

    let db = builder.build();
    let outer = db.get_class_by_name("Outer").unwrap();
    assert!(outer.get_nested_struct("Node", AccessSpecifier::Undefined).is_some());
    assert!(outer.get_nested_struct("Node", AccessSpecifier::Public).is_none());

    let mode = outer.get_nested_enum("Mode", AccessSpecifier::Public).unwrap();
    assert_eq!(mode.qualified_name(), "Outer::Mode");
    assert_eq!(mode.get_enum_value(1).map(|v| v.name()), Some("On"));
    assert!(db.get_entity_by_name("Outer::Mode::On").is_some());
}
