use std::fs;

use indexmap::IndexMap;

use super::CommandError;
use super::schema_loader::{SchemaSource, build_namespaces, load_prefixes, select_roots};

fn map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn later_prefix_sources_win() {
    let schema = map(&[("a", "SchemaA"), ("b", "SchemaB")]);
    let file = map(&[("b", "FileB"), ("c", "FileC")]);
    let pairs = vec![("c".to_string(), "ArgC".to_string())];

    let namespaces = build_namespaces(&schema, file, &pairs);
    assert_eq!(namespaces.len(), 3);
    assert_eq!(namespaces.prefix("a"), Some("SchemaA"));
    assert_eq!(namespaces.prefix("b"), Some("FileB"));
    assert_eq!(namespaces.prefix("c"), Some("ArgC"));
}

#[test]
fn explicit_roots_replace_schema_roots() {
    let schema = vec!["a.A".to_string()];
    assert_eq!(select_roots(&schema, &[]).unwrap(), ["a.A"]);
    assert_eq!(
        select_roots(&schema, &["b.B".to_string()]).unwrap(),
        ["b.B"]
    );
    assert!(matches!(select_roots(&[], &[]), Err(CommandError::NoRoots)));
}

#[test]
fn prefix_file_must_be_string_map() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    fs::write(&good, r#"{ "example.org/meta": "Meta", "time": "" }"#).unwrap();
    fs::write(&bad, r#"{ "example.org/meta": 1 }"#).unwrap();

    let loaded = load_prefixes(&good).unwrap();
    assert_eq!(loaded, map(&[("example.org/meta", "Meta"), ("time", "")]));
    assert!(matches!(
        load_prefixes(&bad),
        Err(CommandError::Prefixes { .. })
    ));
}

#[test]
fn schema_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(&path, r#"{ "types": [{ "namespace": "a", "name": "A", "fields": [{ "name": "x", "type": "a.Missing" }] }] }"#).unwrap();

    let source = SchemaSource {
        schema_path: path.clone(),
        roots: vec!["A".to_string()],
        ..SchemaSource::default()
    };
    let err = source.load().unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("{}: field `A.x`: unknown type `a.Missing`", path.display())
    );
}
