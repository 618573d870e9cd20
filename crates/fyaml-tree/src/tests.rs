use super::*;
use facet_testhelpers::test;

#[test]
fn test_parse_simple() {
    let doc = parse("name: Alice\nage: 30").unwrap();
    let name = doc.get(&["name"]).and_then(|id| doc.scalar(id));
    assert_eq!(name.map(|s| s.text.as_str()), Some("Alice"));
    let age = doc.get(&["age"]).and_then(|id| doc.scalar(id)).unwrap();
    assert_eq!(age.kind(), ScalarKind::Integer);
}

#[test]
fn test_parse_empty() {
    let doc = parse("").unwrap();
    assert!(doc.root().is_none());
    assert!(doc.is_empty());
}

#[test]
fn test_get_follows_aliases() {
    let doc = parse("defaults: &d\n  retries: 3\njob: *d").unwrap();
    let retries = doc.get(&["job", "retries"]).and_then(|id| doc.scalar(id));
    assert_eq!(retries.map(|s| s.text.as_str()), Some("3"));
}

#[test]
fn test_get_missing_path() {
    let doc = parse("a:\n  b: 1").unwrap();
    assert!(doc.get(&["a", "c"]).is_none());
    assert!(doc.get(&["a", "b", "c"]).is_none());
}

#[test]
fn test_spans_cover_the_source() {
    let source = "outer:\n  inner: value\n";
    let doc = parse(source).unwrap();
    let inner = doc.get(&["outer"]).unwrap();
    assert_eq!(doc.node(inner).span.slice(source), "inner: value");
    let value = doc.get(&["outer", "inner"]).unwrap();
    assert_eq!(doc.node(value).span.slice(source), "value");
}

#[test]
fn test_parse_with_options() {
    let options = ParseOptions::new().max_depth(1).verbose(true);
    assert!(parse_with("a: 1", options.clone()).is_ok());
    assert!(parse_with("a:\n  b: 1", options).is_err());
}

#[test]
fn test_build_error_display() {
    let err = parse("a: *nope").unwrap_err();
    assert_eq!(
        err.to_string(),
        "anchor error: undefined anchor 'nope' at line 1, column 4"
    );
    assert_eq!(err.position(), Position::new(1, 3));
}
