//! Stored values and typed reads.
//!
//! A [`Value`] keeps each scalar's text together with the kind it was
//! classified as. Conversion to Rust types happens when a value is read, so
//! an array only fails on the element that does not fit.

use std::fmt;

use fyaml_tree::coerce::{is_numeric_string, parse_bool, parse_int, parse_real};
use fyaml_tree::{CoerceError, ScalarKind, classify};

use crate::error::{TypeError, TypeErrorKind, ValueType};

/// A single stored scalar.
#[derive(Debug, Clone)]
pub struct Scalar {
    text: String,
    kind: ScalarKind,
}

impl Scalar {
    /// The null scalar.
    pub fn null() -> Self {
        Self {
            text: String::new(),
            kind: ScalarKind::Null,
        }
    }

    /// A string scalar, whatever its text looks like.
    pub fn string(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ScalarKind::String,
        }
    }

    /// A scalar typed the way an unquoted scalar with this text would be.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }

    pub(crate) fn from_node(scalar: &fyaml_tree::Scalar) -> Self {
        Self {
            text: scalar.text.clone(),
            kind: scalar.kind(),
        }
    }

    /// The scalar's text as written.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The scalar's kind.
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Whether this is the null scalar.
    pub fn is_null(&self) -> bool {
        self.kind == ScalarKind::Null
    }

    /// Read as an integer.
    ///
    /// A string made only of ASCII digits is accepted too.
    pub fn to_i64(&self) -> Result<i64, CoerceError> {
        match self.kind {
            ScalarKind::Integer => parse_int(&self.text),
            ScalarKind::String if is_numeric_string(&self.text) => parse_int(&self.text),
            found => Err(mismatch(ScalarKind::Integer, found)),
        }
    }

    /// Read as a real. Integers are widened.
    pub fn to_f64(&self) -> Result<f64, CoerceError> {
        match self.kind {
            ScalarKind::Real | ScalarKind::Integer => parse_real(&self.text),
            ScalarKind::String if is_numeric_string(&self.text) => parse_real(&self.text),
            found => Err(mismatch(ScalarKind::Real, found)),
        }
    }

    /// Read as a boolean.
    pub fn to_bool(&self) -> Result<bool, CoerceError> {
        match self.kind {
            ScalarKind::Boolean => {
                parse_bool(&self.text).ok_or(mismatch(ScalarKind::Boolean, ScalarKind::String))
            }
            found => Err(mismatch(ScalarKind::Boolean, found)),
        }
    }

    /// Read as text. Any scalar but null has one.
    pub fn as_str(&self) -> Result<&str, CoerceError> {
        match self.kind {
            ScalarKind::Null => Err(mismatch(ScalarKind::String, ScalarKind::Null)),
            _ => Ok(&self.text),
        }
    }

    /// Convert to a scalar of `kind`, canonicalizing the text.
    pub(crate) fn coerce(&self, kind: ScalarKind) -> Result<Scalar, CoerceError> {
        match kind {
            ScalarKind::Integer => self.to_i64().map(Scalar::from),
            ScalarKind::Real => self.to_f64().map(Scalar::from),
            ScalarKind::Boolean => self.to_bool().map(Scalar::from),
            ScalarKind::String => self.as_str().map(Scalar::string),
            ScalarKind::Null if self.is_null() => Ok(self.clone()),
            ScalarKind::Null => Err(mismatch(ScalarKind::Null, self.kind)),
        }
    }
}

fn mismatch(expected: ScalarKind, found: ScalarKind) -> CoerceError {
    CoerceError::Mismatch { expected, found }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        // `~`, `null` and an empty value all mean the same thing.
        self.kind == other.kind && (self.is_null() || self.text == other.text)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() && self.text.is_empty() {
            f.write_str("null")
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Format a real so that it reads back as a real.
pub(crate) fn format_real(value: f64) -> String {
    if value.is_nan() {
        ".nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { ".inf" } else { "-.inf" }.to_string()
    } else {
        // Debug output always carries a fraction or an exponent.
        format!("{:?}", value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self {
            text: value.to_string(),
            kind: ScalarKind::Integer,
        }
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::from(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::from(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self {
            text: format_real(value),
            kind: ScalarKind::Real,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self {
            text: value.to_string(),
            kind: ScalarKind::Boolean,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::string(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::string(value)
    }
}

/// The value of a configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single scalar.
    Scalar(Scalar),
    /// A sequence of scalars.
    Array(Vec<Scalar>),
}

impl Value {
    /// Number of elements. A scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Array(items) => items.len(),
        }
    }

    /// Whether this is an empty array.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The scalar, if this is one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Array(_) => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Scalar]> {
        match self {
            Value::Scalar(_) => None,
            Value::Array(items) => Some(items),
        }
    }

    /// Shape of the value for error reporting.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Scalar(scalar) => ValueType::Scalar(scalar.kind()),
            Value::Array(_) => ValueType::Array,
        }
    }

    /// The common kind of an array's non-null elements.
    ///
    /// Integers mixed with reals count as reals. Returns `None` for an array
    /// with no non-null elements or with unrelated kinds.
    pub(crate) fn element_kind(items: &[Scalar]) -> Option<ScalarKind> {
        let mut common = None;
        for item in items.iter().filter(|item| !item.is_null()) {
            common = match (common, item.kind()) {
                (None, kind) => Some(kind),
                (Some(a), b) if a == b => Some(a),
                (Some(ScalarKind::Integer), ScalarKind::Real)
                | (Some(ScalarKind::Real), ScalarKind::Integer) => Some(ScalarKind::Real),
                _ => return None,
            };
        }
        common
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(scalar) => write!(f, "{}", scalar),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_value_from_scalar {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Scalar(Scalar::from(value))
            }
        }
    )*};
}

impl_value_from_scalar!(i64, i32, u32, f64, bool, &str, String);

/// Rust types a single scalar can be read as.
pub trait FromScalar: Sized {
    /// The kind this type expects.
    const KIND: ScalarKind;

    /// Convert the scalar.
    fn from_scalar(scalar: &Scalar) -> Result<Self, TypeErrorKind>;
}

fn type_error_kind(err: CoerceError, target: &'static str) -> TypeErrorKind {
    match err {
        CoerceError::Mismatch { expected, found } => TypeErrorKind::Mismatch {
            expected: ValueType::Scalar(expected),
            found: ValueType::Scalar(found),
        },
        CoerceError::OutOfRange => TypeErrorKind::OutOfRange { target },
    }
}

impl FromScalar for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn from_scalar(scalar: &Scalar) -> Result<Self, TypeErrorKind> {
        scalar.to_i64().map_err(|e| type_error_kind(e, "i64"))
    }
}

impl FromScalar for i32 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn from_scalar(scalar: &Scalar) -> Result<Self, TypeErrorKind> {
        let value = scalar.to_i64().map_err(|e| type_error_kind(e, "i32"))?;
        i32::try_from(value).map_err(|_| TypeErrorKind::OutOfRange { target: "i32" })
    }
}

impl FromScalar for f64 {
    const KIND: ScalarKind = ScalarKind::Real;

    fn from_scalar(scalar: &Scalar) -> Result<Self, TypeErrorKind> {
        scalar.to_f64().map_err(|e| type_error_kind(e, "f64"))
    }
}

impl FromScalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn from_scalar(scalar: &Scalar) -> Result<Self, TypeErrorKind> {
        scalar.to_bool().map_err(|e| type_error_kind(e, "bool"))
    }
}

impl FromScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_scalar(scalar: &Scalar) -> Result<Self, TypeErrorKind> {
        scalar
            .as_str()
            .map(str::to_string)
            .map_err(|e| type_error_kind(e, "String"))
    }
}

/// Rust types a whole entry can be read as.
pub trait FromValue: Sized {
    /// Convert the value stored at `path`.
    fn from_value(value: &Value, path: &str) -> Result<Self, TypeError>;
}

macro_rules! impl_from_value {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value, path: &str) -> Result<Self, TypeError> {
                match value {
                    Value::Scalar(scalar) => {
                        <$ty>::from_scalar(scalar).map_err(|kind| TypeError::new(path, kind))
                    }
                    Value::Array(_) => Err(TypeError::new(
                        path,
                        TypeErrorKind::Mismatch {
                            expected: ValueType::Scalar(<$ty as FromScalar>::KIND),
                            found: ValueType::Array,
                        },
                    )),
                }
            }
        }

        impl FromValue for Vec<$ty> {
            fn from_value(value: &Value, path: &str) -> Result<Self, TypeError> {
                match value {
                    Value::Scalar(scalar) => <$ty>::from_scalar(scalar)
                        .map(|item| vec![item])
                        .map_err(|kind| TypeError::new(path, kind)),
                    Value::Array(items) => items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            <$ty>::from_scalar(item)
                                .map_err(|kind| TypeError::new(path, kind).at_index(index))
                        })
                        .collect(),
                }
            }
        }
    )*};
}

impl_from_value!(i64, i32, f64, bool, String);

impl<T: FromScalar> FromValue for Option<T> {
    fn from_value(value: &Value, path: &str) -> Result<Self, TypeError> {
        match value {
            Value::Scalar(scalar) if scalar.is_null() => Ok(None),
            Value::Scalar(scalar) => T::from_scalar(scalar)
                .map(Some)
                .map_err(|kind| TypeError::new(path, kind)),
            Value::Array(_) => Err(TypeError::new(
                path,
                TypeErrorKind::Mismatch {
                    expected: ValueType::Scalar(T::KIND),
                    found: ValueType::Array,
                },
            )),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value, _path: &str) -> Result<Self, TypeError> {
        Ok(value.clone())
    }
}
