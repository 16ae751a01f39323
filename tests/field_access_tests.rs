//! Typed access to instance fields, static fields and variables.

use std::mem::offset_of;
use std::ptr::NonNull;

use reflex::prelude::*;

#[derive(Debug, Default)]
struct Player {
    name: String,
    health: i32,
    level: u8,
}

static MAX_LEVEL: u8 = 60;

fn database(online: NonNull<u32>) -> Database {
    let mut builder = DatabaseBuilder::with_fundamentals().unwrap();
    let game = builder.add_namespace(NamespaceKey::ROOT, "game").unwrap();
    let player = builder.add_class(game, "Player", size_of::<Player>()).unwrap();

    builder
        .add_field(
            player,
            Field::new("name", TypeDesc::opaque::<String>(), FieldFlags::PUBLIC, offset_of!(Player, name)),
        )
        .unwrap();
    builder
        .add_field(
            player,
            Field::new("health", TypeDesc::of::<i32>(), FieldFlags::PUBLIC, offset_of!(Player, health)),
        )
        .unwrap();
    builder
        .add_field(
            player,
            Field::new(
                "level",
                TypeDesc::of::<u8>(),
                FieldFlags::PRIVATE | FieldFlags::CONST,
                offset_of!(Player, level),
            ),
        )
        .unwrap();
    builder
        .add_static_field(
            player,
            StaticField::new(
                "MAX_LEVEL",
                TypeDesc::of::<u8>(),
                FieldFlags::PUBLIC,
                StaticAddress::read_only(&MAX_LEVEL),
            ),
        )
        .unwrap();
    builder
        .add_static_field(
            player,
            StaticField::new("online", TypeDesc::of::<u32>(), FieldFlags::PUBLIC, StaticAddress::mutable(online)),
        )
        .unwrap();
    builder.build()
}

fn leak_counter() -> NonNull<u32> {
    NonNull::from(Box::leak(Box::new(0u32)))
}

// ============================================================================
// Instance fields
// ============================================================================

#[test]
fn test_read_and_write_fields() {
    let db = database(leak_counter());
    let player = db.get_namespace_by_name("game").unwrap().get_class_by_name("Player").unwrap();
    let mut hero = Player {
        name: "hero".into(),
        health: 100,
        level: 3,
    };

    let health = player.get_field("health").unwrap();
    assert_eq!(unsafe { health.get::<i32, _>(&hero) }, Ok(100));
    unsafe { health.set(&mut hero, 42i32) }.unwrap();
    assert_eq!(hero.health, 42);

    let name = player.get_field("name").unwrap();
    unsafe { name.set(&mut hero, String::from("villain")) }.unwrap();
    assert_eq!(unsafe { name.get_ref::<String, _>(&hero) }.map(String::as_str), Ok("villain"));
}

#[test]
fn test_const_field_is_read_only() {
    let db = database(leak_counter());
    assert!(db.get_class_by_name("Player").is_none());
    let player = db.get_namespace_by_name("game").unwrap().get_class_by_name("Player").unwrap();
    let level = player.get_field("level").unwrap();
    let mut hero = Player {
        level: 7,
        ..Player::default()
    };

    assert!(level.is_read_only());
    assert_eq!(level.access(), AccessSpecifier::Private);
    assert_eq!(unsafe { level.get::<u8, _>(&hero) }, Ok(7));
    assert!(matches!(
        unsafe { level.set(&mut hero, 9u8) },
        Err(AccessError::ReadOnly { .. })
    ));
    assert_eq!(hero.level, 7);
}

#[test]
fn test_type_mismatch_is_not_read_only() {
    let db = database(leak_counter());
    let player = db.get_namespace_by_name("game").unwrap().get_class_by_name("Player").unwrap();
    let mut hero = Player::default();
    let health = player.get_field("health").unwrap();
    assert!(matches!(
        unsafe { health.set(&mut hero, 1.5f64) },
        Err(AccessError::TypeMismatch { .. })
    ));
}

#[test]
fn test_field_predicates() {
    let db = database(leak_counter());
    let player = db.get_namespace_by_name("game").unwrap().get_class_by_name("Player").unwrap();
    let public = player
        .get_fields_by_predicate(Some(|f: &Field| {
            Ok::<_, std::convert::Infallible>(f.access() == AccessSpecifier::Public)
        }))
        .unwrap();
    let names: Vec<_> = public.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["name", "health"]);
    assert_eq!(player.field_count(), 3);
    assert_eq!(player.static_field_count(), 2);
}

// ============================================================================
// Static storage
// ============================================================================

#[test]
fn test_static_fields() {
    let online = leak_counter();
    let db = database(online);
    let player = db.get_namespace_by_name("game").unwrap().get_class_by_name("Player").unwrap();

    let max = player.get_static_field("MAX_LEVEL").unwrap();
    assert!(max.is_static());
    assert!(max.is_read_only());
    assert_eq!(unsafe { max.get::<u8>() }, Ok(60));
    assert!(matches!(unsafe { max.set(1u8) }, Err(AccessError::ReadOnly { .. })));

    let counter = player.get_static_field("online").unwrap();
    assert!(!counter.is_read_only());
    unsafe { counter.set(5u32) }.unwrap();
    assert_eq!(unsafe { *online.as_ptr() }, 5);
    assert_eq!(unsafe { counter.get::<u32>() }, Ok(5));

    assert!(player.get_field("online").is_none());
}

#[test]
fn test_static_flag_must_match_registry() {
    let mut builder = DatabaseBuilder::new();
    let player = builder.add_struct(NamespaceKey::ROOT, "Player", 1).unwrap();
    let misplaced = Field::new("count", TypeDesc::of::<u32>(), FieldFlags::STATIC, 0);
    assert!(matches!(
        builder.add_field(player, misplaced),
        Err(RegistrationError::StaticFlagMismatch { expected_static: false, .. })
    ));

    let misplaced = Method::new("tick", MethodFlags::STATIC, |_: &mut u8| ());
    assert!(matches!(
        builder.add_method(player, misplaced),
        Err(RegistrationError::StaticFlagMismatch { .. })
    ));
}
