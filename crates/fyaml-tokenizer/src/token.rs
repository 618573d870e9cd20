//! Token types for the FYAML tokenizer.

use std::borrow::Cow;

use crate::{Position, Span};

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Layout tokens
    /// A block-context line indented deeper than the enclosing level.
    /// Carries the new indentation in spaces.
    Indent(u32),
    /// One enclosing indentation level was closed.
    Dedent,
    /// Line break (`\n` or `\r\n`).
    Newline,

    // Scalar tokens
    /// Scalar of the given style. The decoded text is in [`Token::value`].
    Scalar(ScalarStyle),

    // Structural tokens
    /// `:` mapping value indicator
    MappingKey,
    /// `-` block sequence entry
    SequenceItem,
    /// `[`
    FlowSequenceStart,
    /// `]`
    FlowSequenceEnd,
    /// `{`
    FlowMappingStart,
    /// `}`
    FlowMappingEnd,
    /// `,` (flow context only)
    Comma,

    // Node properties
    /// `&name`
    Anchor,
    /// `*name`
    Alias,
    /// `<<` merge key
    MergeKey,
    /// `!tag` (accepted, carries no meaning for the store)
    Tag,

    // Trivia
    /// `# ...`
    Comment,

    // Document markers
    /// `---`
    DocumentStart,
    /// `...`
    DocumentEnd,
}

impl TokenKind {
    /// Whether this token is trivia (layout or comments).
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Indent(_) | TokenKind::Dedent | TokenKind::Newline | TokenKind::Comment
        )
    }

    /// Whether this token can begin a node.
    pub fn starts_node(&self) -> bool {
        matches!(
            self,
            TokenKind::Scalar(_)
                | TokenKind::SequenceItem
                | TokenKind::FlowSequenceStart
                | TokenKind::FlowMappingStart
                | TokenKind::Anchor
                | TokenKind::Alias
                | TokenKind::Tag
        )
    }
}

/// How a scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// Unquoted: `hello`, `42`, `true`
    Plain,
    /// `'single quoted'`
    SingleQuoted,
    /// `"double quoted"`
    DoubleQuoted,
    /// `|` block scalar
    Literal,
    /// `>` block scalar
    Folded,
}

impl ScalarStyle {
    /// Quoted and block scalars are always strings, never typed literals.
    pub fn is_plain(&self) -> bool {
        matches!(self, ScalarStyle::Plain)
    }
}

/// A token with its kind, location, raw source slice and decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source text.
    pub span: Span,
    /// Line and column of the first byte.
    pub pos: Position,
    /// The raw source text of this token.
    pub text: &'src str,
    /// Decoded payload: scalar content, anchor/alias/tag name without its
    /// sigil, or comment text without `#`. Equal to `text` otherwise.
    pub value: Cow<'src, str>,
}

impl<'src> Token<'src> {
    /// Create a new token whose value is its raw text.
    pub fn new(kind: TokenKind, span: Span, pos: Position, text: &'src str) -> Self {
        Self {
            kind,
            span,
            pos,
            text,
            value: Cow::Borrowed(text),
        }
    }

    /// Replace the decoded value.
    pub fn with_value(mut self, value: Cow<'src, str>) -> Self {
        self.value = value;
        self
    }

    /// The indentation column of this token (0-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.pos.column
    }

    /// The 1-based line this token starts on.
    #[inline]
    pub fn line(&self) -> u32 {
        self.pos.line
    }
}
