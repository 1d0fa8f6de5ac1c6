//! Integration tests for type tables
//!
//! Loads realistic tables and checks the resulting registry.

use std::io::Write;

use stresstest_types::{
    Member, Modifiers, TableError, TypeId, TypeKind, TypeRegistry, TypeTable, ROOT_TYPE_NAME,
};

const SHAPES: &str = r#"
[[types]]
name = "Shape"
kind = "interface"
modifiers = ["public"]

[[types.methods]]
name = "area"
returns = "double"
modifiers = ["public", "abstract"]

[[types]]
name = "Base"
modifiers = ["public", "abstract"]
implements = ["Shape"]

[[types.fields]]
name = "x"
type = "int"
modifiers = ["public"]

[[types.fields]]
name = "y"
type = "int"
modifiers = ["private"]

[[types.constructors]]
modifiers = ["protected"]

[[types]]
name = "Derived"
extends = "Base"
modifiers = ["public", "final"]

[[types.fields]]
name = "z"
type = "String"
modifiers = ["public"]

[[types.methods]]
name = "area"
returns = "double"
modifiers = ["public"]

[[types.methods]]
name = "scale"
parameters = ["double", "double"]
modifiers = ["private"]

[[types.constructors]]
parameters = ["int", "int"]
modifiers = ["public"]
"#;

#[test]
fn test_load_shapes_table() {
    let registry = TypeTable::from_str(SHAPES).unwrap().into_registry().unwrap();

    // Root plus three declared types
    assert_eq!(registry.len(), 4);

    let shape = registry.get_by_name("Shape").unwrap();
    assert_eq!(shape.kind(), TypeKind::Interface);
    assert!(shape.modifiers().is_interface());
    assert_eq!(shape.parent(), None);

    let base = registry.get_by_name("Base").unwrap();
    assert_eq!(base.parent(), Some(TypeId::ROOT));
    assert_eq!(base.interfaces(), &[shape.id()]);
    assert!(base.modifiers().is_abstract());

    let derived = registry.get_by_name("Derived").unwrap();
    assert_eq!(derived.parent(), Some(base.id()));
    assert_eq!(
        derived.modifiers(),
        Modifiers::PUBLIC | Modifiers::FINAL
    );

    let scale = &registry.declared_methods(derived.id()).unwrap()[1];
    assert_eq!(scale.parameter_types, vec!["double", "double"]);
    assert_eq!(scale.return_type, "void");
    assert!(scale.modifiers.is_private());
}

#[test]
fn test_loaded_table_answers_queries() {
    let registry = TypeTable::from_str(SHAPES).unwrap().into_registry().unwrap();
    let shape = registry.lookup("Shape").unwrap();
    let base = registry.lookup("Base").unwrap();
    let derived = registry.lookup("Derived").unwrap();

    let public_fields: Vec<_> = registry
        .public_fields(derived)
        .unwrap()
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(public_fields, vec!["z", "x"]);

    // Derived.area overrides Shape.area
    let areas: Vec<_> = registry
        .public_methods(derived)
        .unwrap()
        .into_iter()
        .filter(|m| m.name == "area")
        .collect();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].declaring_type, derived);

    assert!(registry.is_subtype(derived, shape).unwrap());
    assert!(registry.is_subtype(derived, base).unwrap());
    assert!(!registry.is_subtype(base, derived).unwrap());
}

#[test]
fn test_register_into_existing_registry() {
    let mut registry = TypeRegistry::new();
    let ids = TypeTable::from_str(SHAPES)
        .unwrap()
        .register_into(&mut registry)
        .unwrap();

    assert_eq!(ids.len(), 3);
    assert_eq!(registry.get(ids[2]).unwrap().name(), "Derived");

    // A second load collides on names
    let err = TypeTable::from_str(SHAPES)
        .unwrap()
        .register_into(&mut registry)
        .unwrap_err();
    assert!(matches!(err, TableError::Type(_)));
}

#[test]
fn test_extending_root_by_name() {
    let table = format!(
        r#"
[[types]]
name = "Explicit"
extends = "{}"
"#,
        ROOT_TYPE_NAME
    );
    let registry = TypeTable::from_str(&table).unwrap().into_registry().unwrap();
    let explicit = registry.get_by_name("Explicit").unwrap();
    assert_eq!(explicit.parent(), Some(TypeId::ROOT));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SHAPES.as_bytes()).unwrap();

    let table = TypeTable::from_file(file.path()).unwrap();
    assert_eq!(table.types.len(), 3);
    assert_eq!(table.types[2].name, "Derived");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TypeTable::from_file(&dir.path().join("types.toml")).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}
