use crate::{Field, FloatKind, IntKind, TypeGraph, TypeKind, UnsupportedKind, WellKnown};

#[test]
fn structural_types_are_interned() {
    let mut graph = TypeGraph::new();
    let byte = graph.int(IntKind::U8);
    let a = graph.slice(byte);
    let b = graph.slice(byte);
    assert_eq!(a, b);

    let string = graph.string();
    let m1 = graph.map(string, a);
    let m2 = graph.map(string, b);
    assert_eq!(m1, m2);
    assert_eq!(graph.len(), 4);
}

#[test]
fn declared_structs_are_distinct() {
    let mut graph = TypeGraph::new();
    let a = graph.declare_struct("a.Same", "a", "Same");
    let b = graph.declare_struct("b.Same", "b", "Same");
    assert_ne!(a, b);
    assert_eq!(graph.lookup("a.Same"), Some(a));
    assert_eq!(graph.lookup("b.Same"), Some(b));
    assert_eq!(graph.lookup("c.Same"), None);
}

#[test]
fn set_fields_allows_self_reference() {
    let mut graph = TypeGraph::new();
    let node = graph.declare_struct("n.Node", "n", "Node");
    let next = graph.pointer(node);
    graph.set_fields(node, vec![Field::new("Next", next)]);

    let TypeKind::Struct { fields, .. } = graph.kind(node) else {
        panic!("expected struct");
    };
    assert_eq!(fields[0].ty, next);
    assert_eq!(graph.display(next), "*n.Node");
}

#[test]
fn underlying_follows_definitions() {
    let mut graph = TypeGraph::new();
    let byte = graph.int(IntKind::U8);
    let hash = graph.declare_defined("c.Hash", "c", "Hash", byte);
    let key = graph.declare_defined("c.Key", "c", "Key", hash);
    assert_eq!(graph.underlying(key), byte);
    assert_eq!(graph.underlying(byte), byte);
}

#[test]
fn display_composites() {
    let mut graph = TypeGraph::new();
    let f = graph.float(FloatKind::F64);
    let b = graph.bool();
    let arr = graph.array(4, f);
    let m = graph.map(b, arr);
    let chan = graph.unsupported(UnsupportedKind::Chan);
    let time = graph.declare_well_known("time.Time", "time", "Time", WellKnown::Timestamp);
    assert_eq!(graph.display(m), "map[bool][4]float64");
    assert_eq!(graph.display(chan), "chan");
    assert_eq!(graph.display(time), "time.Time");
}

#[test]
fn declared_preserves_order() {
    let mut graph = TypeGraph::new();
    graph.declare_struct("z", "ns", "Z");
    graph.declare_struct("a", "ns", "A");
    let ids: Vec<_> = graph.declared().map(|(name, _)| name).collect();
    assert_eq!(ids, ["z", "a"]);
}

#[test]
fn field_builders() {
    let mut graph = TypeGraph::new();
    let s = graph.string();
    let field = Field::new("Name", s).with_tag(r#"json:"name""#);
    assert!(!field.embedded);
    assert_eq!(field.tag, r#"json:"name""#);
    assert!(Field::embedded("Meta", s).embedded);
}

#[test]
fn well_known_names() {
    assert_eq!(WellKnown::from_name("timestamp"), Some(WellKnown::Timestamp));
    assert_eq!(WellKnown::from_name("quantity"), Some(WellKnown::Quantity));
    assert_eq!(WellKnown::from_name("duration"), None);
}
