//! A tokenizer for FYAML configuration documents.
//!
//! Turns YAML text into a flat stream of [`Token`]s: indentation events,
//! scalars (already unquoted and unescaped), structural indicators, anchors,
//! aliases and merge keys. The stream is pulled through the [`Iterator`]
//! implementation on [`Tokenizer`].

mod span;
pub use span::{Position, Span};

mod token;
pub use token::{ScalarStyle, Token, TokenKind};

mod error;
pub use error::{LexError, LexErrorKind};

mod scalar;
pub use scalar::{decode_block, decode_double_quoted, decode_single_quoted, Chomping};

mod tokenizer;
pub use tokenizer::Tokenizer;
