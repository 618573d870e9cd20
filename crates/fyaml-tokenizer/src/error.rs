//! Lexical errors.

use std::fmt;

use crate::{Position, Span};

/// A tokenizer failure with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Where it went wrong.
    pub span: Span,
    /// Line/column of `span.start`.
    pub pos: Position,
}

/// Kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A tab character inside block indentation.
    TabIndentation,
    /// A line dedents to a column that matches no open indentation level.
    InconsistentIndentation {
        /// Indentation of the offending line.
        found: u32,
        /// Nearest enclosing level that was still open.
        expected: u32,
    },
    /// A quoted scalar runs to end of input.
    UnterminatedQuote {
        /// `true` for `"..."`, `false` for `'...'`.
        double: bool,
    },
    /// Unknown escape in a double-quoted scalar.
    InvalidEscape(String),
    /// Malformed `|`/`>` header.
    InvalidBlockHeader,
    /// `&` or `*` not followed by a name.
    EmptyAnchorName,
    /// A character that cannot start any token here.
    UnexpectedCharacter(char),
}

impl LexError {
    /// Create a new lexical error.
    pub fn new(kind: LexErrorKind, span: Span, pos: Position) -> Self {
        Self { kind, span, pos }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::TabIndentation => write!(f, "tab character used for indentation"),
            LexErrorKind::InconsistentIndentation { found, expected } => write!(
                f,
                "inconsistent indentation: {} spaces does not match enclosing level of {}",
                found, expected
            ),
            LexErrorKind::UnterminatedQuote { double: true } => {
                write!(f, "unterminated double-quoted scalar")
            }
            LexErrorKind::UnterminatedQuote { double: false } => {
                write!(f, "unterminated single-quoted scalar")
            }
            LexErrorKind::InvalidEscape(seq) => write!(f, "invalid escape sequence '{}'", seq),
            LexErrorKind::InvalidBlockHeader => write!(f, "invalid block scalar header"),
            LexErrorKind::EmptyAnchorName => write!(f, "missing anchor or alias name"),
            LexErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {:?}", c),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}

impl std::error::Error for LexError {}
