//! FYAML: a configuration store backed by YAML.
//!
//! A document is parsed into a tree, then flattened so that every leaf is
//! addressed by the keys leading to it, joined with a separator:
//!
//! ```
//! use fyaml::ConfigStore;
//!
//! let store = ConfigStore::parse("model:\n  dt: 0.5\n  levels: [1, 2, 3]\n")?;
//! assert_eq!(store.get::<f64>("model%dt")?, 0.5);
//! assert_eq!(store.get::<Vec<i64>>("model%levels")?, vec![1, 2, 3]);
//! # Ok::<(), fyaml::Error>(())
//! ```
//!
//! The store can be changed with [`ConfigStore::add`] and
//! [`ConfigStore::update`] and written back out as YAML.

mod entry;
mod error;
mod flatten;
mod options;
mod path;
mod scalar;
mod store;
mod value;
mod writer;

pub use entry::ConfigEntry;
pub use error::{
    BoundsError, Error, KeyError, KeyErrorKind, Result, TypeError, TypeErrorKind, ValueType,
};
pub use fyaml_tree::{ParseOptions, ScalarKind};
pub use options::{FormatOptions, LoadOptions};
pub use scalar::{can_be_plain, can_be_plain_key, escape_quoted};
pub use store::{ConfigStore, DEFAULT_SEPARATOR};
pub use value::{FromScalar, FromValue, Scalar, Value};
pub use writer::YamlWriter;
