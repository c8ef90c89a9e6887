use indoc::indoc;

use super::*;
use crate::{IntKind, TypeKind, UnsupportedKind, WellKnown};

#[test]
fn load_minimal_schema() {
    let json = indoc! {r#"
        {
          "prefixes": { "example.org/genesis": "Genesis" },
          "roots": ["genesis.Document"],
          "types": [
            {
              "id": "genesis.Document",
              "namespace": "example.org/genesis",
              "name": "Document",
              "fields": [
                { "name": "Height", "type": "int64", "tag": "json:\"height\"" }
              ]
            }
          ]
        }
    "#};

    let schema = Schema::from_json(json).unwrap();
    assert_eq!(schema.roots, ["genesis.Document"]);
    assert_eq!(
        schema.prefixes.get("example.org/genesis").map(String::as_str),
        Some("Genesis")
    );

    let id = schema.graph.lookup("genesis.Document").unwrap();
    let TypeKind::Struct { named, fields } = schema.graph.kind(id) else {
        panic!("expected struct");
    };
    assert_eq!(named.name, "Document");
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "Height");
    assert_eq!(fields[0].tag, r#"json:"height""#);
    assert_eq!(
        schema.graph.kind(fields[0].ty),
        &TypeKind::Int(IntKind::I64)
    );
}

#[test]
fn id_defaults_to_name() {
    let json = r#"{ "types": [ { "namespace": "ns", "name": "Plain", "fields": [] } ] }"#;
    let schema = Schema::from_json(json).unwrap();
    assert!(schema.graph.lookup("Plain").is_some());
}

#[test]
fn forward_and_self_references() {
    let json = indoc! {r#"
        {
          "types": [
            { "id": "a.Tree", "namespace": "a", "name": "Tree", "fields": [
                { "name": "Children", "type": "[]*a.Tree" },
                { "name": "Leaf", "type": "b.Leaf" }
            ] },
            { "id": "b.Leaf", "namespace": "b", "name": "Leaf", "fields": [] }
          ]
        }
    "#};

    let schema = Schema::from_json(json).unwrap();
    let graph = &schema.graph;
    let tree = graph.lookup("a.Tree").unwrap();
    let TypeKind::Struct { fields, .. } = graph.kind(tree) else {
        panic!("expected struct");
    };
    assert_eq!(graph.display(fields[0].ty), "[]*a.Tree");
    assert_eq!(fields[1].ty, graph.lookup("b.Leaf").unwrap());
}

#[test]
fn structural_types_are_shared() {
    let json = indoc! {r#"
        {
          "types": [
            { "namespace": "a", "name": "A", "fields": [
                { "name": "X", "type": "[]uint8" },
                { "name": "Y", "type": "[]byte" }
            ] }
          ]
        }
    "#};

    let schema = Schema::from_json(json).unwrap();
    let id = schema.graph.lookup("A").unwrap();
    let TypeKind::Struct { fields, .. } = schema.graph.kind(id) else {
        panic!("expected struct");
    };
    assert_eq!(fields[0].ty, fields[1].ty);
}

#[test]
fn embedded_field_takes_type_name() {
    let json = indoc! {r#"
        {
          "types": [
            { "id": "a.Outer", "namespace": "a", "name": "Outer", "fields": [
                { "type": "*b.Inner", "embedded": true }
            ] },
            { "id": "b.Inner", "namespace": "b", "name": "Inner", "fields": [] }
          ]
        }
    "#};

    let schema = Schema::from_json(json).unwrap();
    let id = schema.graph.lookup("a.Outer").unwrap();
    let TypeKind::Struct { fields, .. } = schema.graph.kind(id) else {
        panic!("expected struct");
    };
    assert!(fields[0].embedded);
    assert_eq!(fields[0].name, "Inner");
}

#[test]
fn defined_and_well_known_types() {
    let json = indoc! {r#"
        {
          "types": [
            { "id": "common.Hash", "namespace": "common", "name": "Hash", "underlying": "[32]byte" },
            { "id": "common.Alias", "namespace": "common", "name": "Alias", "underlying": "common.Hash" },
            { "id": "time.Time", "namespace": "time", "name": "Time", "well_known": "timestamp" }
          ]
        }
    "#};

    let schema = Schema::from_json(json).unwrap();
    let graph = &schema.graph;
    let alias = graph.lookup("common.Alias").unwrap();
    assert_eq!(graph.display(graph.underlying(alias)), "[32]uint8");

    let time = graph.lookup("time.Time").unwrap();
    assert!(matches!(
        graph.kind(time),
        TypeKind::WellKnown {
            kind: WellKnown::Timestamp,
            ..
        }
    ));
}

#[test]
fn unsupported_kinds_are_loaded() {
    let json = indoc! {r#"
        {
          "types": [
            { "namespace": "a", "name": "A", "fields": [
                { "name": "C", "type": "chan int" },
                { "name": "F", "type": "func()" },
                { "name": "Z", "type": "complex128" }
            ] }
          ]
        }
    "#};

    let schema = Schema::from_json(json).unwrap();
    let id = schema.graph.lookup("A").unwrap();
    let TypeKind::Struct { fields, .. } = schema.graph.kind(id) else {
        panic!("expected struct");
    };
    let kinds: Vec<_> = fields.iter().map(|f| schema.graph.kind(f.ty)).collect();
    assert_eq!(
        kinds,
        [
            &TypeKind::Unsupported(UnsupportedKind::Chan),
            &TypeKind::Unsupported(UnsupportedKind::Func),
            &TypeKind::Unsupported(UnsupportedKind::Complex128),
        ]
    );
}

fn load_err(json: &str) -> String {
    Schema::from_json(json).unwrap_err().to_string()
}

#[test]
fn error_duplicate_type() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A" },
        { "namespace": "b", "name": "A" }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"duplicate type id `A`");
}

#[test]
fn error_unknown_type() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "fields": [ { "name": "B", "type": "[]b.Missing" } ] }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"field `A.B`: unknown type `b.Missing`");
}

#[test]
fn error_bad_type_expression() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "fields": [ { "name": "B", "type": "map[string" } ] }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"field `A.B`: invalid type expression: expected `]`, got end of input at 10..10 in `map[string`");
}

#[test]
fn error_missing_field_name() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "fields": [ { "type": "int" } ] }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"type `A`: field #0 has no name");
}

#[test]
fn error_embedded_primitive() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "fields": [ { "type": "int", "embedded": true } ] }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"type `A`: embedded field #0 must refer to a declared type");
}

#[test]
fn error_conflicting_kinds() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "fields": [], "underlying": "int" }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"type `A` must declare exactly one of `fields`, `underlying`, `well_known`");
}

#[test]
fn error_unknown_well_known() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "well_known": "duration" }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"type `A`: unknown well-known type `duration`");
}

#[test]
fn error_definition_cycle() {
    let json = r#"{ "types": [
        { "namespace": "a", "name": "A", "underlying": "B" },
        { "namespace": "a", "name": "B", "underlying": "A" }
    ] }"#;
    insta::assert_snapshot!(load_err(json), @"type `A` is defined in terms of itself");
}

#[test]
fn error_definition_through_collections() {
    let slice = r#"{ "types": [
        { "id": "x.A", "namespace": "x", "name": "A", "underlying": "[]x.A" }
    ] }"#;
    insta::assert_snapshot!(load_err(slice), @"type `x.A` is defined in terms of itself");

    let map = r#"{ "types": [
        { "id": "x.M", "namespace": "x", "name": "M", "underlying": "map[string]*x.N" },
        { "id": "x.N", "namespace": "x", "name": "N", "underlying": "[4]x.M" }
    ] }"#;
    insta::assert_snapshot!(load_err(map), @"type `x.M` is defined in terms of itself");
}

#[test]
fn definition_may_recur_through_a_struct() {
    let json = r#"{ "types": [
        { "id": "x.List", "namespace": "x", "name": "List", "underlying": "[]*x.Node" },
        { "id": "x.Node", "namespace": "x", "name": "Node", "fields": [
            { "name": "Children", "type": "x.List" },
            { "name": "Next", "type": "*x.Node" }
        ] }
    ] }"#;
    let schema = Schema::from_json(json).unwrap();
    assert!(schema.graph.lookup("x.List").is_some());
}

#[test]
fn error_unknown_field_in_document() {
    let json = r#"{ "types": [], "extra": true }"#;
    assert!(matches!(
        Schema::from_json(json).unwrap_err(),
        SchemaError::Json(_)
    ));
}
