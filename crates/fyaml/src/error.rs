//! Errors produced by the configuration store.

use std::fmt;

use fyaml_tokenizer::{LexError, Position, Span};
use fyaml_tree::{AnchorError, BuildError, ParseError, ScalarKind};

/// Result alias for store operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error the store can report.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The text could not be tokenized.
    Lex(LexError),
    /// The token stream is not a valid configuration document.
    Parse(ParseError),
    /// An alias could not be resolved.
    Anchor(AnchorError),
    /// A value is not of the requested or existing kind.
    Type(TypeError),
    /// A path is missing, taken, or malformed.
    Key(KeyError),
    /// An element index past the end of an array.
    Bounds(BoundsError),
}

impl Error {
    /// Source location, for errors that come from parsing.
    pub fn span(&self) -> Option<Span> {
        self.as_build_error().map(|e| e.span())
    }

    /// Line/column, for errors that come from parsing.
    pub fn position(&self) -> Option<Position> {
        self.as_build_error().map(|e| e.position())
    }

    /// Render this error against the source it came from.
    ///
    /// Parse-time errors get an ariadne report; the rest fall back to their
    /// `Display` output.
    pub fn render(&self, filename: &str, source: &str) -> String {
        match self.as_build_error() {
            Some(e) => e.render(filename, source),
            None => self.to_string(),
        }
    }

    fn as_build_error(&self) -> Option<BuildError> {
        match self {
            Error::Lex(e) => Some(BuildError::Lex(e.clone())),
            Error::Parse(e) => Some(BuildError::Parse(e.clone())),
            Error::Anchor(e) => Some(BuildError::Anchor(e.clone())),
            Error::Type(_) | Error::Key(_) | Error::Bounds(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "syntax error: {}", e),
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Anchor(e) => write!(f, "anchor error: {}", e),
            Error::Type(e) => write!(f, "type error: {}", e),
            Error::Key(e) => write!(f, "key error: {}", e),
            Error::Bounds(e) => write!(f, "bounds error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Anchor(e) => Some(e),
            Error::Type(e) => Some(e),
            Error::Key(e) => Some(e),
            Error::Bounds(e) => Some(e),
        }
    }
}

impl From<BuildError> for Error {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Lex(e) => Error::Lex(e),
            BuildError::Parse(e) => Error::Parse(e),
            BuildError::Anchor(e) => Error::Anchor(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<TypeError> for Error {
    fn from(e: TypeError) -> Self {
        Error::Type(e)
    }
}

impl From<KeyError> for Error {
    fn from(e: KeyError) -> Self {
        Error::Key(e)
    }
}

impl From<BoundsError> for Error {
    fn from(e: BoundsError) -> Self {
        Error::Bounds(e)
    }
}

/// The shape of a stored value, as far as type checks are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// A single scalar of the given kind.
    Scalar(ScalarKind),
    /// An array of scalars.
    Array,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Scalar(kind) => write!(f, "{}", kind),
            ValueType::Array => f.write_str("array"),
        }
    }
}

/// A value read or written as the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    /// Path of the entry.
    pub path: String,
    /// Array element at fault, if any.
    pub index: Option<usize>,
    /// What went wrong.
    pub kind: TypeErrorKind,
}

/// Kind of type error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeErrorKind {
    /// The value has a different kind than the one requested.
    Mismatch {
        /// Requested kind.
        expected: ValueType,
        /// Stored kind.
        found: ValueType,
    },
    /// An integer that does not fit the requested width.
    OutOfRange {
        /// Name of the target type.
        target: &'static str,
    },
}

impl TypeError {
    /// Create a new type error.
    pub fn new(path: impl Into<String>, kind: TypeErrorKind) -> Self {
        Self {
            path: path.into(),
            index: None,
            kind,
        }
    }

    /// Point the error at an array element.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeErrorKind::Mismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)?
            }
            TypeErrorKind::OutOfRange { target } => {
                write!(f, "integer does not fit in {}", target)?
            }
        }
        write!(f, " at '{}'", self.path)?;
        if let Some(index) = self.index {
            write!(f, " (element {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for TypeError {}

/// A path that cannot be used for the requested operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyError {
    /// What went wrong.
    pub kind: KeyErrorKind,
    /// The offending path.
    pub path: String,
}

/// Kind of key error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyErrorKind {
    /// No entry at this path.
    NotFound,
    /// An entry already exists at this path.
    AlreadyExists,
    /// The path would turn an existing leaf into a category, or the reverse.
    Conflict {
        /// The existing path it collides with.
        existing: String,
    },
    /// The path or key is malformed.
    Invalid(&'static str),
}

impl KeyError {
    /// Create a new key error.
    pub fn new(kind: KeyErrorKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            KeyErrorKind::NotFound => write!(f, "no entry at '{}'", self.path),
            KeyErrorKind::AlreadyExists => write!(f, "'{}' already exists", self.path),
            KeyErrorKind::Conflict { existing } => {
                write!(f, "'{}' conflicts with existing '{}'", self.path, existing)
            }
            KeyErrorKind::Invalid(reason) => write!(f, "invalid path '{}': {}", self.path, reason),
        }
    }
}

impl std::error::Error for KeyError {}

/// An array index past the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsError {
    /// Path of the array.
    pub path: String,
    /// Requested index.
    pub index: usize,
    /// Array length.
    pub len: usize,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of bounds for '{}' with {} elements",
            self.index, self.path, self.len
        )
    }
}

impl std::error::Error for BoundsError {}
