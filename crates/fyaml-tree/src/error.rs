//! Errors produced while building a document.

use std::fmt;

use fyaml_tokenizer::{LexError, Position, Span};

/// A structural error found by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
    /// Line/column of `span.start`.
    pub pos: Position,
}

/// Kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Content at a column that belongs to no open block.
    IndentationMismatch {
        /// Column of the enclosing block.
        expected: u32,
        /// Column the content was found at.
        found: u32,
    },
    /// A `[` or `{` that is never closed.
    UnterminatedFlow,
    /// A key that appears twice in one mapping.
    DuplicateKey {
        /// The repeated key.
        key: String,
        /// Where it was first defined.
        first: Span,
    },
    /// A token that cannot appear here.
    UnexpectedToken(String),
    /// A mapping key that is not a scalar.
    InvalidKey,
    /// A second document in the stream.
    MultipleDocuments,
    /// A `<<` value that is not a mapping or a sequence of mappings.
    InvalidMergeValue,
    /// Collections nested deeper than the configured limit.
    NestingTooDeep(usize),
    /// Two anchors on the same node.
    DuplicateAnchor,
    /// A document whose root is a scalar or a sequence.
    NonMappingRoot,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span, pos: Position) -> Self {
        Self { kind, span, pos }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::IndentationMismatch { expected, found } => write!(
                f,
                "content at column {} does not line up with the block at column {}",
                found + 1,
                expected + 1
            ),
            ParseErrorKind::UnterminatedFlow => write!(f, "unterminated flow collection"),
            ParseErrorKind::DuplicateKey { key, .. } => write!(f, "duplicate key '{}'", key),
            ParseErrorKind::UnexpectedToken(what) => write!(f, "unexpected {}", what),
            ParseErrorKind::InvalidKey => write!(f, "mapping keys must be scalars"),
            ParseErrorKind::MultipleDocuments => {
                write!(f, "only a single document is supported")
            }
            ParseErrorKind::InvalidMergeValue => write!(
                f,
                "merge key value must be a mapping or a sequence of mappings"
            ),
            ParseErrorKind::NestingTooDeep(max) => {
                write!(f, "collections nested deeper than {} levels", max)
            }
            ParseErrorKind::DuplicateAnchor => write!(f, "node already has an anchor"),
            ParseErrorKind::NonMappingRoot => {
                write!(f, "the document root must be a mapping")
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}

impl std::error::Error for ParseError {}

/// An alias that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorError {
    /// The kind of error.
    pub kind: AnchorErrorKind,
    /// Span of the `*alias`.
    pub span: Span,
    /// Line/column of `span.start`.
    pub pos: Position,
}

/// Kind of anchor error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorErrorKind {
    /// No anchor with this name has been declared before the alias.
    Undefined(String),
    /// The alias refers to an anchor whose node contains the alias.
    Cycle(String),
}

impl AnchorError {
    /// Create a new anchor error.
    pub fn new(kind: AnchorErrorKind, span: Span, pos: Position) -> Self {
        Self { kind, span, pos }
    }

    /// The anchor name involved.
    pub fn name(&self) -> &str {
        match &self.kind {
            AnchorErrorKind::Undefined(name) | AnchorErrorKind::Cycle(name) => name,
        }
    }
}

impl fmt::Display for AnchorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorErrorKind::Undefined(name) => write!(f, "undefined anchor '{}'", name),
            AnchorErrorKind::Cycle(name) => {
                write!(f, "alias '{}' refers to a node that contains it", name)
            }
        }
    }
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}

impl std::error::Error for AnchorError {}

/// Any error that stops a document from being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The text could not be tokenized.
    Lex(LexError),
    /// The tokens do not form a valid document.
    Parse(ParseError),
    /// An alias could not be resolved.
    Anchor(AnchorError),
}

impl BuildError {
    /// Source span of the error.
    pub fn span(&self) -> Span {
        match self {
            BuildError::Lex(e) => e.span,
            BuildError::Parse(e) => e.span,
            BuildError::Anchor(e) => e.span,
        }
    }

    /// Line/column of the error.
    pub fn position(&self) -> Position {
        match self {
            BuildError::Lex(e) => e.pos,
            BuildError::Parse(e) => e.pos,
            BuildError::Anchor(e) => e.pos,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Lex(e) => write!(f, "syntax error: {}", e),
            BuildError::Parse(e) => write!(f, "parse error: {}", e),
            BuildError::Anchor(e) => write!(f, "anchor error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Lex(e) => Some(e),
            BuildError::Parse(e) => Some(e),
            BuildError::Anchor(e) => Some(e),
        }
    }
}

impl From<LexError> for BuildError {
    fn from(e: LexError) -> Self {
        BuildError::Lex(e)
    }
}

impl From<ParseError> for BuildError {
    fn from(e: ParseError) -> Self {
        BuildError::Parse(e)
    }
}

impl From<AnchorError> for BuildError {
    fn from(e: AnchorError) -> Self {
        BuildError::Anchor(e)
    }
}
