use crate::tag::{StructTag, TagError};

#[test]
fn parse_empty() {
    let tag = StructTag::parse("").unwrap();
    assert!(tag.is_empty());
    assert_eq!(tag.get("json"), None);
}

#[test]
fn parse_single_entry() {
    let tag = StructTag::parse(r#"json:"height""#).unwrap();
    assert_eq!(tag.get("json"), Some("height"));
    assert_eq!(tag.get("cbor"), None);
}

#[test]
fn parse_multiple_entries() {
    let tag = StructTag::parse(r#"json:"extra,omitempty"  cbor:",toarray""#).unwrap();
    assert_eq!(tag.get("json"), Some("extra,omitempty"));
    assert_eq!(tag.get("cbor"), Some(",toarray"));
    let keys: Vec<_> = tag.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["json", "cbor"]);
}

#[test]
fn first_entry_wins() {
    let tag = StructTag::parse(r#"json:"a" json:"b""#).unwrap();
    assert_eq!(tag.get("json"), Some("a"));
}

#[test]
fn empty_value() {
    let tag = StructTag::parse(r#"json:"""#).unwrap();
    assert_eq!(tag.get("json"), Some(""));
}

#[test]
fn escaped_quote_in_value() {
    let tag = StructTag::parse(r#"doc:"say \"hi\"" json:"x""#).unwrap();
    assert_eq!(tag.get("doc"), Some(r#"say "hi""#));
    assert_eq!(tag.get("json"), Some("x"));
}

#[test]
fn missing_quote_is_malformed() {
    let err = StructTag::parse("json:height").unwrap_err();
    assert_eq!(
        err,
        TagError::Malformed {
            tag: "json:height".to_string(),
            offset: 4,
        }
    );
}

#[test]
fn missing_key_is_malformed() {
    let err = StructTag::parse(r#":"x""#).unwrap_err();
    assert!(matches!(err, TagError::Malformed { offset: 0, .. }));
}

#[test]
fn unterminated_value() {
    let err = StructTag::parse(r#"json:"height"#).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"malformed tag `json:"height`: unterminated value for key `json`"#);
}

#[test]
fn invalid_escape() {
    let err = StructTag::parse(r#"json:"a\qb""#).unwrap_err();
    assert!(matches!(err, TagError::InvalidEscape { escape: 'q', .. }));
}
