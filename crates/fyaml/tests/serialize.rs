//! Serialization tests.

use facet_testhelpers::test;
use fyaml::{ConfigStore, FormatOptions, Scalar};

fn store(source: &str) -> ConfigStore {
    ConfigStore::parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"))
}

/// Serialize, parse the output again, and check every value survived.
fn reparse(store: &ConfigStore) -> String {
    let output = store.serialize();
    let reparsed = ConfigStore::parse(&output)
        .unwrap_or_else(|e| panic!("output does not parse: {e}\n{output}"));
    assert_eq!(reparsed.len(), store.len(), "{output}");
    for entry in store.entries() {
        let value = reparsed
            .get_entry(entry.path())
            .unwrap_or_else(|| panic!("{} missing from\n{output}", entry.path()))
            .value();
        assert_eq!(value, entry.value(), "{}\n{output}", entry.path());
    }
    output
}

#[test]
fn test_serialize_parsed_document() {
    let store = store(
        "model:\n  name: ocean\n  dt: 0.5\n  levels: [1, 2, 3]\noutput:\n  formats:\n    - netcdf\n    - csv\n",
    );
    insta::assert_snapshot!(reparse(&store), @r"
    model:
      name: ocean
      dt: 0.5
      levels: [1, 2, 3]
    output:
      formats: [netcdf, csv]
    ");
}

#[test]
fn test_serialize_built_store() {
    let mut store = ConfigStore::new();
    store.add("run%name", "test case", Some("Run label")).unwrap();
    store.add("run%id", "0042", None).unwrap();
    store.add("run%flag", true, None).unwrap();
    store.add("run%ratio", 1.0, None).unwrap();
    store.add("run%empty", "", None).unwrap();
    store.add("grid%size", vec![10i64, 20], None).unwrap();
    store.add("grid%missing", Scalar::null(), None).unwrap();
    store.add("run%tag", "key: value", None).unwrap();
    insta::assert_snapshot!(reparse(&store), @r#"
    run:
      # Run label
      name: test case
      id: "0042"
      flag: true
      ratio: 1.0
      empty: ""
      tag: "key: value"
    grid:
      size: [10, 20]
      missing: null
    "#);
}

#[test]
fn test_serialize_multiline_strings() {
    let mut store = ConfigStore::new();
    store.add("text%clip", "line one\nline two\n", None).unwrap();
    store.add("text%strip", "a\nb", None).unwrap();
    store.add("text%keep", "a\n\n", None).unwrap();
    store.add("text%indented", "  starts with spaces\nx", None).unwrap();
    insta::assert_snapshot!(reparse(&store), @r#"
    text:
      clip: |
        line one
        line two
      strip: |-
        a
        b
      keep: |+
        a

      indented: "  starts with spaces\nx"
    "#);
}

#[test]
fn test_serialize_sequences_of_mappings() {
    let store = store(
        "servers:\n  - host: a\n    port: 1\n  - host: b\n    port: 2\nitems:\n  - 1\n  - [2, 3]\n  - k: v\n",
    );
    insta::assert_snapshot!(reparse(&store), @r"
    servers:
      - host: a
        port: 1
      - host: b
        port: 2
    items:
      - 1
      - [2, 3]
      - k: v
    ");
}

#[test]
fn test_serialize_expands_merges_and_aliases() {
    let store = store("base: &b\n  a: 1\nsvc:\n  <<: *b\n  c: 2\ncopy: *b\n");
    insta::assert_snapshot!(reparse(&store), @r"
    base:
      a: 1
    svc:
      a: 1
      c: 2
    copy:
      a: 1
    ");
}

#[test]
fn test_serialize_with_options() {
    let mut store = ConfigStore::new();
    store.add("a%b%c", 1i64, Some("Deep")).unwrap();
    store.add("a%list", vec!["x", "y", "z"], None).unwrap();
    let options = FormatOptions::new()
        .indent(4)
        .inline_sequence_threshold(2)
        .without_descriptions();
    insta::assert_snapshot!(store.serialize_with(&options), @r"
    a:
        b:
            c: 1
        list:
            - x
            - y
            - z
    ");
}

#[test]
fn test_quoted_keys() {
    let mut store = ConfigStore::new();
    store.add("\"odd\"%key: with colon", 1i64, None).unwrap();
    store.add("<<%x", 2i64, None).unwrap();
    insta::assert_snapshot!(reparse(&store), @r#"
    "\"odd\"":
      "key: with colon": 1
    "<<":
      x: 2
    "#);
}

#[test]
fn test_write_to() {
    let store = store("a:\n  b: [1, 2]\n");
    let mut out = Vec::new();
    store.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), store.serialize());
}

#[test]
fn test_empty_store_serializes_to_nothing() {
    assert_eq!(ConfigStore::new().serialize(), "");
}

#[test]
fn test_reals_keep_their_kind() {
    let mut store = ConfigStore::new();
    store.add("a", 2.0, None).unwrap();
    store.add("b", f64::INFINITY, None).unwrap();
    store.add("c", 1e-9, None).unwrap();
    let output = reparse(&store);
    assert!(output.contains("a: 2.0\n"), "{output}");
    assert!(output.contains("b: .inf\n"), "{output}");
}
