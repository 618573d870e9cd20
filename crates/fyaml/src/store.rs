//! The path-addressed configuration store.

use std::io;

use fyaml_tree::ScalarKind;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::entry::ConfigEntry;
use crate::error::{
    BoundsError, KeyError, KeyErrorKind, Result, TypeError, TypeErrorKind, ValueType,
};
use crate::flatten::flatten;
use crate::options::{FormatOptions, LoadOptions};
use crate::path;
use crate::value::{FromScalar, FromValue, Scalar, Value};
use crate::writer::write_store;

/// Separator used when none is given.
pub const DEFAULT_SEPARATOR: char = '%';

/// Flattened configuration: every leaf of a YAML mapping tree, keyed by its
/// full path.
///
/// Entries keep the order they were parsed or added in. Intermediate
/// mappings are not stored as entries; they exist only as path prefixes
/// ("categories").
#[derive(Debug, Clone)]
pub struct ConfigStore {
    entries: IndexMap<String, ConfigEntry>,
    categories: IndexSet<String>,
    separator: char,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create an empty store using `%` as path separator.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create an empty store with a custom path separator.
    pub fn with_separator(separator: char) -> Self {
        Self {
            entries: IndexMap::new(),
            categories: IndexSet::new(),
            separator,
        }
    }

    /// Parse a configuration document with default options.
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with(source, LoadOptions::default())
    }

    /// Parse a configuration document.
    ///
    /// The document root must be a mapping; an empty document gives an empty
    /// store.
    pub fn parse_with(source: &str, options: LoadOptions) -> Result<Self> {
        let LoadOptions { separator, parse } = options;
        let verbose = parse.verbose;
        let document = fyaml_tree::parse_with(source, parse)?;
        let mut store = Self::with_separator(separator);
        flatten(&document, source, &mut store, verbose)?;
        debug!("Parsed {} entries", store.len());
        Ok(store)
    }

    /// The path separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    /// The entry at `path`, if any.
    pub fn get_entry(&self, path: &str) -> Option<&ConfigEntry> {
        let path = path::normalize(path, self.separator).ok()?;
        self.entries.get(&path)
    }

    /// Whether an entry exists at `path`.
    pub fn check(&self, path: &str) -> bool {
        self.get_entry(path).is_some()
    }

    /// Normalize a path naming an existing entry. A malformed path names no
    /// entry.
    fn existing_key(&self, path: &str) -> Result<String, KeyError> {
        path::normalize(path, self.separator)
            .map_err(|_| KeyError::new(KeyErrorKind::NotFound, path))
    }

    fn lookup(&self, path: &str) -> Result<&ConfigEntry> {
        let normalized = self.existing_key(path)?;
        match self.entries.get(&normalized) {
            Some(entry) => Ok(entry),
            None => Err(KeyError::new(KeyErrorKind::NotFound, normalized).into()),
        }
    }

    /// Read the value at `path` as `T`.
    ///
    /// Arrays are checked element by element; the error names the first
    /// element that does not convert.
    pub fn get<T: FromValue>(&self, path: &str) -> Result<T> {
        let entry = self.lookup(path)?;
        Ok(T::from_value(entry.value(), entry.path())?)
    }

    /// Read the value at `path` converted to `kind`.
    pub fn get_kind(&self, path: &str, kind: ScalarKind) -> Result<Value> {
        let entry = self.lookup(path)?;
        let convert = |scalar: &Scalar| {
            scalar.coerce(kind).map_err(|_| {
                TypeError::new(
                    entry.path(),
                    TypeErrorKind::Mismatch {
                        expected: ValueType::Scalar(kind),
                        found: ValueType::Scalar(scalar.kind()),
                    },
                )
            })
        };
        match entry.value() {
            Value::Scalar(scalar) => Ok(Value::Scalar(convert(scalar)?)),
            Value::Array(items) => {
                let mut converted = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    converted.push(convert(item).map_err(|e| e.at_index(index))?);
                }
                Ok(Value::Array(converted))
            }
        }
    }

    /// Read one element of the array at `path`.
    ///
    /// A scalar entry behaves as a one-element array.
    pub fn get_element<T: FromScalar>(&self, path: &str, index: usize) -> Result<T> {
        let entry = self.lookup(path)?;
        let element = match entry.value() {
            Value::Scalar(scalar) if index == 0 => scalar,
            Value::Array(items) if index < items.len() => &items[index],
            value => {
                return Err(BoundsError {
                    path: entry.path().to_string(),
                    index,
                    len: value.len(),
                }
                .into());
            }
        };
        T::from_scalar(element).map_err(|kind| {
            let err = TypeError::new(entry.path(), kind);
            match entry.value() {
                Value::Array(_) => err.at_index(index).into(),
                Value::Scalar(_) => err.into(),
            }
        })
    }

    /// Number of elements at `path`; a scalar counts as one.
    pub fn get_size(&self, path: &str) -> Result<usize> {
        Ok(self.lookup(path)?.len())
    }

    /// Add a new entry.
    ///
    /// Fails if the path exists, or if it would put a leaf where a category
    /// is or a category where a leaf is.
    pub fn add(
        &mut self,
        path: &str,
        value: impl Into<Value>,
        description: Option<&str>,
    ) -> Result<()> {
        let path = path::normalize(path, self.separator)?;
        self.insert(path, value.into(), description.map(str::to_string))?;
        Ok(())
    }

    pub(crate) fn insert(
        &mut self,
        path: String,
        value: Value,
        description: Option<String>,
    ) -> Result<(), KeyError> {
        if self.entries.contains_key(&path) {
            return Err(KeyError::new(KeyErrorKind::AlreadyExists, path));
        }
        if self.categories.contains(&path) {
            let existing = self.first_below(&path).unwrap_or_default();
            return Err(KeyError::new(KeyErrorKind::Conflict { existing }, path));
        }
        let leaf = path::ancestors(&path, self.separator)
            .find(|prefix| self.entries.contains_key(*prefix))
            .map(str::to_string);
        if let Some(existing) = leaf {
            return Err(KeyError::new(KeyErrorKind::Conflict { existing }, path));
        }

        for prefix in path::ancestors(&path, self.separator) {
            if !self.categories.contains(prefix) {
                self.categories.insert(prefix.to_string());
            }
        }
        trace!("Adding {} = {}", path, value);
        self.entries
            .insert(path.clone(), ConfigEntry::new(path, value, description));
        Ok(())
    }

    fn first_below(&self, category: &str) -> Option<String> {
        self.entries
            .keys()
            .find(|path| {
                path.strip_prefix(category)
                    .is_some_and(|rest| rest.starts_with(self.separator))
            })
            .cloned()
    }

    /// Replace the value of an existing entry, keeping its position.
    ///
    /// The kind may only change from null, to null, or from integer to real.
    /// An integer written over a real is stored as a real.
    pub fn update(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let normalized = self.existing_key(path)?;
        let Some(entry) = self.entries.get_mut(&normalized) else {
            return Err(KeyError::new(KeyErrorKind::NotFound, normalized).into());
        };
        let value = compatible(entry.path(), entry.value(), value.into())?;
        trace!("Updating {} = {}", normalized, value);
        entry.set_value(value);
        Ok(())
    }

    /// Set the description of an existing entry.
    pub fn describe(&mut self, path: &str, description: impl Into<String>) -> Result<()> {
        let normalized = self.existing_key(path)?;
        match self.entries.get_mut(&normalized) {
            Some(entry) => {
                entry.set_description(Some(description.into()));
                Ok(())
            }
            None => Err(KeyError::new(KeyErrorKind::NotFound, normalized).into()),
        }
    }

    /// Read `path`, adding `default` first if it does not exist.
    pub fn get_or_add<T>(&mut self, path: &str, default: T, description: Option<&str>) -> Result<T>
    where
        T: FromValue + Into<Value>,
    {
        if !self.check(path) {
            self.add(path, default, description)?;
        }
        self.get(path)
    }

    /// Fold `other` into this store.
    ///
    /// Entries of `other` that exist here replace the value through
    /// [`update`](Self::update) and keep their position; new ones are
    /// appended. A description from `other` replaces the existing one.
    /// Stops at the first entry that cannot be merged, leaving the entries
    /// before it applied.
    pub fn merge(&mut self, other: ConfigStore) -> Result<()> {
        let same_separator = other.separator == self.separator;
        for (_, entry) in other.entries {
            let (path, value, description) = entry.into_parts();
            let path = if same_separator {
                path
            } else {
                let segments: Vec<&str> = path.split(other.separator).collect();
                let joined = segments.join(&self.separator.to_string());
                path::normalize(&joined, self.separator)?
            };

            match self.entries.get_mut(&path) {
                Some(existing) => {
                    let value = compatible(existing.path(), existing.value(), value)?;
                    existing.set_value(value);
                    if description.is_some() {
                        existing.set_description(description);
                    }
                }
                None => self.insert(path, value, description)?,
            }
        }
        Ok(())
    }

    /// Number of segments in `path`.
    pub fn find_depth(&self, path: &str) -> usize {
        if path.trim().is_empty() {
            0
        } else {
            path.split(self.separator).count()
        }
    }

    /// Names of the categories directly below `prefix`, in first-seen order.
    ///
    /// An empty prefix lists the top-level categories.
    pub fn sub_categories(&self, prefix: &str) -> Vec<&str> {
        let prefix = if prefix.trim().is_empty() {
            String::new()
        } else {
            match path::normalize(prefix, self.separator) {
                Ok(prefix) => prefix,
                Err(_) => return Vec::new(),
            }
        };
        self.categories
            .iter()
            .filter(|category| path::parent(category, self.separator) == prefix)
            .map(|category| path::leaf(category, self.separator))
            .collect()
    }

    /// Serialize to YAML with default formatting.
    pub fn serialize(&self) -> String {
        self.serialize_with(&FormatOptions::default())
    }

    /// Serialize to YAML.
    pub fn serialize_with(&self, options: &FormatOptions) -> String {
        write_store(self, options)
    }

    /// Write the serialized YAML to `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.serialize().as_bytes())
    }

    /// Release the store.
    pub fn destroy(self) {
        trace!("Destroying store with {} entries", self.len());
    }
}

/// Check that `new` may replace `old`, widening integers written over reals.
fn compatible(path: &str, old: &Value, new: Value) -> Result<Value, TypeError> {
    let mismatch = |expected: ValueType, found: ValueType| {
        TypeError::new(path, TypeErrorKind::Mismatch { expected, found })
    };

    match (old, new) {
        (_, Value::Scalar(new)) if new.is_null() => Ok(Value::Scalar(new)),
        (Value::Scalar(old), new) if old.is_null() => Ok(new),
        (Value::Scalar(old), Value::Scalar(new)) => {
            if needs_widening(old.kind(), new.kind())
                .ok_or_else(|| mismatch(ValueType::Scalar(old.kind()), ValueType::Scalar(new.kind())))?
            {
                Ok(Value::Scalar(widen(path, &new)?))
            } else {
                Ok(Value::Scalar(new))
            }
        }
        (Value::Array(old), Value::Array(new)) => {
            let (Some(old_kind), Some(new_kind)) =
                (Value::element_kind(old), Value::element_kind(&new))
            else {
                return Ok(Value::Array(new));
            };
            let widening = needs_widening(old_kind, new_kind)
                .ok_or_else(|| mismatch(ValueType::Scalar(old_kind), ValueType::Scalar(new_kind)))?;
            if !widening {
                return Ok(Value::Array(new));
            }
            let mut widened = Vec::with_capacity(new.len());
            for (index, item) in new.iter().enumerate() {
                if item.is_null() {
                    widened.push(item.clone());
                } else {
                    widened.push(widen(path, item).map_err(|e| e.at_index(index))?);
                }
            }
            Ok(Value::Array(widened))
        }
        (old, new) => Err(mismatch(old.value_type(), new.value_type())),
    }
}

/// `Some(true)` when `new` must be widened to fit `old`, `None` when the
/// kinds are incompatible.
fn needs_widening(old: ScalarKind, new: ScalarKind) -> Option<bool> {
    match (old, new) {
        (ScalarKind::Real, ScalarKind::Integer) => Some(true),
        (ScalarKind::Integer, ScalarKind::Real) => Some(false),
        (old, new) if old == new => Some(false),
        _ => None,
    }
}

fn widen(path: &str, scalar: &Scalar) -> Result<Scalar, TypeError> {
    scalar
        .to_f64()
        .map(Scalar::from)
        .map_err(|_| TypeError::new(path, TypeErrorKind::OutOfRange { target: "f64" }))
}
