//! Access API tests for the configuration store.

use facet_testhelpers::test;
use fyaml::{
    ConfigStore, Error, KeyErrorKind, LoadOptions, ScalarKind, TypeErrorKind, Value, ValueType,
};
use fyaml_tree::{AnchorErrorKind, ParseErrorKind};

fn store(source: &str) -> ConfigStore {
    ConfigStore::parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"))
}

fn key_error(err: Error) -> KeyErrorKind {
    match err {
        Error::Key(e) => e.kind,
        other => panic!("expected a key error, got {other}"),
    }
}

fn type_error(err: Error) -> (Option<usize>, TypeErrorKind) {
    match err {
        Error::Type(e) => (e.index, e.kind),
        other => panic!("expected a type error, got {other}"),
    }
}

const MODEL: &str = "\
model:
  name: ocean
  dt: 0.5
  steps: 100
  enabled: yes
  levels: [1, 2, 3]
  mask: 0xFF
output:
  dir: /tmp/out
  formats:
    - netcdf
    - csv
";

#[test]
fn test_flattened_paths() {
    let store = store(MODEL);
    let paths: Vec<_> = store.entries().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        [
            "model%name",
            "model%dt",
            "model%steps",
            "model%enabled",
            "model%levels",
            "model%mask",
            "output%dir",
            "output%formats",
        ]
    );
    assert_eq!(store.len(), 8);
}

#[test]
fn test_typed_reads() {
    let store = store(MODEL);
    assert_eq!(store.get::<String>("model%name").unwrap(), "ocean");
    assert_eq!(store.get::<f64>("model%dt").unwrap(), 0.5);
    assert_eq!(store.get::<i64>("model%steps").unwrap(), 100);
    assert_eq!(store.get::<i32>("model%steps").unwrap(), 100);
    assert!(store.get::<bool>("model%enabled").unwrap());
    assert_eq!(store.get::<i64>("model%mask").unwrap(), 255);
    assert_eq!(store.get::<Vec<i64>>("model%levels").unwrap(), vec![1, 2, 3]);
    assert_eq!(
        store.get::<Vec<String>>("output%formats").unwrap(),
        vec!["netcdf", "csv"]
    );
}

#[test]
fn test_scalar_literals() {
    let store = store("a: true\nb: Yes\nc: on\nd: .inf\ne: -.inf\nf: 0o17\ng: 0b101\nh: ~\n");
    for path in ["a", "b", "c"] {
        assert!(store.get::<bool>(path).unwrap(), "{path}");
    }
    assert_eq!(store.get::<f64>("d").unwrap(), f64::INFINITY);
    assert_eq!(store.get::<f64>("e").unwrap(), f64::NEG_INFINITY);
    assert_eq!(store.get::<i64>("f").unwrap(), 15);
    assert_eq!(store.get::<i64>("g").unwrap(), 5);
    assert_eq!(store.get::<Option<i64>>("h").unwrap(), None);
}

#[test]
fn test_type_mismatch() {
    let store = store(MODEL);
    let (index, kind) = type_error(store.get::<i64>("model%name").unwrap_err());
    assert_eq!(index, None);
    assert_eq!(
        kind,
        TypeErrorKind::Mismatch {
            expected: ValueType::Scalar(ScalarKind::Integer),
            found: ValueType::Scalar(ScalarKind::String),
        }
    );
    let (_, kind) = type_error(store.get::<i64>("model%levels").unwrap_err());
    assert!(matches!(
        kind,
        TypeErrorKind::Mismatch {
            found: ValueType::Array,
            ..
        }
    ));
}

#[test]
fn test_integer_out_of_range_is_a_type_error() {
    let store = store("big: 99999999999999999999\n");
    let (_, kind) = type_error(store.get::<i64>("big").unwrap_err());
    assert_eq!(kind, TypeErrorKind::OutOfRange { target: "i64" });
}

#[test]
fn test_large_integers_read_as_reals() {
    let store = store("n: 100000000000000000000
list: [1, 100000000000000000000]
");
    assert_eq!(store.get::<f64>("n").unwrap(), 1e20);
    assert_eq!(store.get::<Vec<f64>>("list").unwrap(), vec![1.0, 1e20]);
}

#[test]
fn test_quoted_digits_read_as_numbers_on_request() {
    let store = store("id: \"0042\"\nname: 'abc'\n");
    assert_eq!(store.get::<String>("id").unwrap(), "0042");
    assert_eq!(store.get::<i64>("id").unwrap(), 42);
    assert!(store.get::<i64>("name").is_err());
}

#[test]
fn test_arrays_are_checked_per_element() {
    let store = store("mixed: [1, 2, three, 4]\n");
    assert_eq!(store.get_size("mixed").unwrap(), 4);
    assert_eq!(store.get_element::<i64>("mixed", 1).unwrap(), 2);
    assert_eq!(store.get_element::<String>("mixed", 2).unwrap(), "three");
    let (index, _) = type_error(store.get::<Vec<i64>>("mixed").unwrap_err());
    assert_eq!(index, Some(2));
    let (index, _) = type_error(store.get_element::<i64>("mixed", 2).unwrap_err());
    assert_eq!(index, Some(2));
}

#[test]
fn test_get_element_bounds() {
    let store = store("list: [a, b]\nscalar: 7\n");
    match store.get_element::<String>("list", 2).unwrap_err() {
        Error::Bounds(e) => {
            assert_eq!(e.index, 2);
            assert_eq!(e.len, 2);
        }
        other => panic!("expected a bounds error, got {other}"),
    }
    assert_eq!(store.get_element::<i64>("scalar", 0).unwrap(), 7);
    assert!(matches!(
        store.get_element::<i64>("scalar", 1),
        Err(Error::Bounds(_))
    ));
}

#[test]
fn test_get_size_of_scalar_is_one() {
    let store = store(MODEL);
    assert_eq!(store.get_size("model%dt").unwrap(), 1);
    assert_eq!(store.get_size("model%levels").unwrap(), 3);
    let empty = self::store("list: []\n");
    assert_eq!(empty.get_size("list").unwrap(), 0);
}

#[test]
fn test_get_kind() {
    let store = store("n: 3\ns: \"12\"\nlist: [1, 2.5]\n");
    assert_eq!(store.get_kind("n", ScalarKind::Real).unwrap().to_string(), "3.0");
    assert_eq!(store.get_kind("s", ScalarKind::Integer).unwrap().to_string(), "12");
    assert_eq!(
        store.get_kind("list", ScalarKind::Real).unwrap().to_string(),
        "[1.0, 2.5]"
    );
    let (index, _) = type_error(store.get_kind("list", ScalarKind::Integer).unwrap_err());
    assert_eq!(index, Some(1));
}

#[test]
fn test_check_matches_not_found() {
    let store = store(MODEL);
    for path in [
        "model%dt",
        " model % dt ",
        "model",
        "nope",
        "model%dt%x",
        "",
        "  ",
        "model%%dt",
        "%model",
        "model%dt%",
    ] {
        let not_found = matches!(
            store.get::<Value>(path),
            Err(Error::Key(ref e)) if e.kind == KeyErrorKind::NotFound
        );
        assert_eq!(store.check(path), !not_found, "{path:?}");
    }
}

#[test]
fn test_missing_path() {
    let store = store(MODEL);
    assert_eq!(
        key_error(store.get::<i64>("model%missing").unwrap_err()),
        KeyErrorKind::NotFound
    );
    assert_eq!(
        key_error(store.get::<i64>("model%%dt").unwrap_err()),
        KeyErrorKind::NotFound
    );
}

#[test]
fn test_malformed_paths_name_no_entry() {
    let mut store = store(MODEL);
    assert_eq!(key_error(store.update("%model", 1i64).unwrap_err()), KeyErrorKind::NotFound);
    assert_eq!(key_error(store.describe("", "x").unwrap_err()), KeyErrorKind::NotFound);
    assert_eq!(key_error(store.get_size("model%").unwrap_err()), KeyErrorKind::NotFound);
    assert!(matches!(
        key_error(store.add("model%%dt", 1i64, None).unwrap_err()),
        KeyErrorKind::Invalid(_)
    ));
}

#[test]
fn test_add() {
    let mut store = store(MODEL);
    store
        .add("model%restart%enabled", false, Some("Write restart files"))
        .unwrap();
    assert!(!store.get::<bool>("model%restart%enabled").unwrap());
    assert_eq!(
        store.get_entry("model%restart%enabled").unwrap().description(),
        Some("Write restart files")
    );
    assert_eq!(
        key_error(store.add("model%dt", 1.0, None).unwrap_err()),
        KeyErrorKind::AlreadyExists
    );
}

#[test]
fn test_add_conflicts() {
    let mut store = store(MODEL);
    // A leaf where a category is.
    assert_eq!(
        key_error(store.add("model", 1i64, None).unwrap_err()),
        KeyErrorKind::Conflict {
            existing: "model%name".to_string()
        }
    );
    // A category where a leaf is.
    assert_eq!(
        key_error(store.add("model%dt%units", "s", None).unwrap_err()),
        KeyErrorKind::Conflict {
            existing: "model%dt".to_string()
        }
    );
    assert_eq!(store.len(), 8);
}

#[test]
fn test_update() {
    let mut store = store(MODEL);
    store.update("model%steps", 200i64).unwrap();
    assert_eq!(store.get::<i64>("model%steps").unwrap(), 200);

    // Integer to real is allowed, and an integer over a real is widened.
    store.update("model%steps", 2.5).unwrap();
    assert_eq!(store.get::<f64>("model%steps").unwrap(), 2.5);
    store.update("model%dt", 1i64).unwrap();
    assert_eq!(
        store.get_entry("model%dt").unwrap().value().to_string(),
        "1.0"
    );

    // Anything to null and null to anything.
    store.update("model%name", Value::from(fyaml::Scalar::null())).unwrap();
    store.update("model%name", 3i64).unwrap();
    assert_eq!(store.get::<i64>("model%name").unwrap(), 3);

    // Position is kept.
    assert_eq!(store.entries().nth(2).unwrap().path(), "model%steps");
}

#[test]
fn test_update_errors() {
    let mut store = store(MODEL);
    assert_eq!(
        key_error(store.update("model%missing", 1i64).unwrap_err()),
        KeyErrorKind::NotFound
    );
    let (_, kind) = type_error(store.update("model%enabled", "maybe").unwrap_err());
    assert_eq!(
        kind,
        TypeErrorKind::Mismatch {
            expected: ValueType::Scalar(ScalarKind::Boolean),
            found: ValueType::Scalar(ScalarKind::String),
        }
    );
    let (_, kind) = type_error(store.update("model%dt", vec![1.0, 2.0]).unwrap_err());
    assert_eq!(
        kind,
        TypeErrorKind::Mismatch {
            expected: ValueType::Scalar(ScalarKind::Real),
            found: ValueType::Array,
        }
    );
    assert!(store.update("model%levels", "flat").is_err());
    assert!(store.update("model%steps", 0.5).is_ok());
}

#[test]
fn test_update_arrays() {
    let mut store = store(MODEL);
    store.update("model%levels", vec![4i64, 5]).unwrap();
    assert_eq!(store.get::<Vec<i64>>("model%levels").unwrap(), vec![4, 5]);
    assert!(store.update("model%levels", vec!["a", "b"]).is_err());
    store.update("model%levels", Vec::<i64>::new()).unwrap();
    assert_eq!(store.get_size("model%levels").unwrap(), 0);
}

#[test]
fn test_get_or_add() {
    let mut store = store(MODEL);
    assert_eq!(store.get_or_add("model%steps", 5i64, None).unwrap(), 100);
    assert_eq!(
        store
            .get_or_add("model%threads", 4i64, Some("Worker threads"))
            .unwrap(),
        4
    );
    assert!(store.check("model%threads"));
    assert_eq!(store.len(), 9);
}

#[test]
fn test_merge_other_wins() {
    let mut base = store("a:\n  x: 1\n  y: 2\nb: old\n");
    let overlay = store("a:\n  y: 20\nc: new\n");
    base.merge(overlay).unwrap();
    let paths: Vec<_> = base.entries().map(|e| e.path()).collect();
    assert_eq!(paths, ["a%x", "a%y", "b", "c"]);
    assert_eq!(base.get::<i64>("a%y").unwrap(), 20);
    assert_eq!(base.get::<String>("c").unwrap(), "new");
}

#[test]
fn test_merge_across_separators() {
    let mut base = ConfigStore::new();
    base.add("a%x", 1i64, None).unwrap();
    let options = LoadOptions::new().separator('/');
    let overlay = ConfigStore::parse_with("a:\n  x: 2\n  z: 3\n", options).unwrap();
    assert!(overlay.check("a/z"));
    base.merge(overlay).unwrap();
    assert_eq!(base.get::<i64>("a%x").unwrap(), 2);
    assert_eq!(base.get::<i64>("a%z").unwrap(), 3);
}

#[test]
fn test_merge_type_conflict() {
    let mut base = store("a: 1\n");
    let overlay = store("a: text\n");
    assert!(matches!(base.merge(overlay), Err(Error::Type(_))));
}

#[test]
fn test_find_depth_and_sub_categories() {
    let store = store("a:\n  b:\n    c: 1\n  d: 2\ne: 3\nf:\n  g: 4\n");
    assert_eq!(store.find_depth("a%b%c"), 3);
    assert_eq!(store.find_depth("e"), 1);
    assert_eq!(store.find_depth(""), 0);
    assert_eq!(store.sub_categories(""), ["a", "f"]);
    assert_eq!(store.sub_categories("a"), ["b"]);
    assert!(store.sub_categories("a%b").is_empty());
}

#[test]
fn test_describe() {
    let mut store = store(MODEL);
    store.describe("model%dt", "Time step in seconds").unwrap();
    assert_eq!(
        store.get_entry("model%dt").unwrap().description(),
        Some("Time step in seconds")
    );
    assert_eq!(
        key_error(store.describe("model%nope", "x").unwrap_err()),
        KeyErrorKind::NotFound
    );
}

#[test]
fn test_merge_keys() {
    let store = store(
        "base: &base\n  a: 1\n  b: 2\nsvc:\n  <<: *base\n  b: 3\n",
    );
    assert_eq!(store.get::<i64>("svc%a").unwrap(), 1);
    assert_eq!(store.get::<i64>("svc%b").unwrap(), 3);
}

#[test]
fn test_later_merge_source_wins() {
    let store = store(
        "one: &one\n  v: 1\ntwo: &two\n  v: 2\nsvc:\n  <<: [*one, *two]\n",
    );
    assert_eq!(store.get::<i64>("svc%v").unwrap(), 2);
}

#[test]
fn test_aliases_are_expanded() {
    let store = store("defaults: &d\n  retries: 3\njob: *d\nlist: &l [1, 2]\ncopy: *l\n");
    assert_eq!(store.get::<i64>("job%retries").unwrap(), 3);
    assert_eq!(store.get::<Vec<i64>>("copy").unwrap(), vec![1, 2]);
}

#[test]
fn test_alias_cycle() {
    match ConfigStore::parse("a: &a\n  b: *a\n").unwrap_err() {
        Error::Anchor(e) => assert!(matches!(e.kind, AnchorErrorKind::Cycle(_))),
        other => panic!("expected an anchor error, got {other}"),
    }
}

#[test]
fn test_flow_and_block_give_the_same_store() {
    let block = store("a:\n  b: 1\n  c:\n    - x\n    - y\nd: true\n");
    let flow = store("{a: {b: 1, c: [x, y]}, d: true}");
    let block: Vec<_> = block.entries().cloned().collect();
    let flow: Vec<_> = flow.entries().cloned().collect();
    assert_eq!(block, flow);
}

#[test]
fn test_sequences_of_mappings_are_indexed() {
    let store = store(
        "servers:\n  - host: a\n    port: 1\n  - host: b\n    port: 2\n",
    );
    assert_eq!(store.get::<String>("servers%0%host").unwrap(), "a");
    assert_eq!(store.get::<i64>("servers%1%port").unwrap(), 2);
    assert_eq!(store.sub_categories("servers"), ["0", "1"]);
}

#[test]
fn test_mixed_sequences_are_indexed() {
    let store = store("items:\n  - 1\n  - [2, 3]\n  - k: v\n");
    assert_eq!(store.get::<i64>("items%0").unwrap(), 1);
    assert_eq!(store.get::<Vec<i64>>("items%1").unwrap(), vec![2, 3]);
    assert_eq!(store.get::<String>("items%2%k").unwrap(), "v");
}

#[test]
fn test_empty_mappings_leave_no_entries() {
    let store = store("a: {}\nb: 1\n");
    assert!(!store.check("a"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_empty_documents() {
    assert!(store("").is_empty());
    assert!(store("# only a comment\n").is_empty());
    assert!(store("---\n...\n").is_empty());
}

#[test]
fn test_root_must_be_a_mapping() {
    for source in ["- a\n- b\n", "just text\n", "[1, 2]"] {
        match ConfigStore::parse(source).unwrap_err() {
            Error::Parse(e) => assert_eq!(e.kind, ParseErrorKind::NonMappingRoot, "{source:?}"),
            other => panic!("expected a parse error for {source:?}, got {other}"),
        }
    }
}

#[test]
fn test_keys_with_the_separator_are_rejected() {
    let err = ConfigStore::parse("\"a%b\": 1\n").unwrap_err();
    assert!(matches!(key_error(err), KeyErrorKind::Invalid(_)));
    let options = LoadOptions::new().separator('.');
    let store = ConfigStore::parse_with("\"a%b\": 1\n", options).unwrap();
    assert_eq!(store.get::<i64>("a%b").unwrap(), 1);
}

#[test]
fn test_leading_bom() {
    let store = store("\u{feff}model:\n  dt: 0.5\n");
    assert_eq!(store.get::<f64>("model%dt").unwrap(), 0.5);
    assert_eq!(store.sub_categories(""), vec!["model"]);
}

#[test]
fn test_load_options_reach_the_parser() {
    let options = LoadOptions::new().separator('/').max_depth(1);
    assert!(ConfigStore::parse_with("a:\n  b: 1\n", options.clone()).is_err());
    let store = ConfigStore::parse_with("a: 1\n", options.verbose(true)).unwrap();
    assert_eq!(store.separator(), '/');
    assert_eq!(store.get::<i64>("a").unwrap(), 1);
}

#[test]
fn test_custom_separator() {
    let options = LoadOptions::new().separator('.');
    let store = ConfigStore::parse_with(MODEL, options).unwrap();
    assert_eq!(store.separator(), '.');
    assert_eq!(store.get::<f64>("model.dt").unwrap(), 0.5);
    assert!(!store.check("model%dt"));
}

#[test]
fn test_parse_errors_carry_positions() {
    let err = ConfigStore::parse("a: 1\nb: [1, 2\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)), "{err}");
    assert!(err.position().is_some());
    let rendered = err.render("config.yaml", "a: 1\nb: [1, 2\n");
    assert!(rendered.contains("unterminated flow collection"), "{rendered}");

    let err = ConfigStore::new().get::<i64>("x").unwrap_err();
    assert!(err.position().is_none());
    assert_eq!(err.render("config.yaml", ""), err.to_string());
}

#[test]
fn test_error_display() {
    let store = store("list: [1, x]\n");
    let err = store.get::<Vec<i64>>("list").unwrap_err();
    assert_eq!(
        err.to_string(),
        "type error: expected integer, found string at 'list' (element 1)"
    );
    let err = store.get::<i64>("nope").unwrap_err();
    assert_eq!(err.to_string(), "key error: no entry at 'nope'");
}

#[test]
fn test_destroy() {
    let store = store(MODEL);
    store.destroy();
}
