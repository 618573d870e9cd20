//! Document tree for FYAML configuration files.
//!
//! This crate builds a node arena from YAML text, resolving anchors, aliases
//! and merge keys as it goes, and classifies plain scalars into typed kinds.

pub mod anchors;
pub mod coerce;
mod diagnostic;
mod error;
mod node;
mod parser;

pub use anchors::{AnchorRegistry, MergeSet};
pub use coerce::{CoerceError, ScalarKind, classify};
pub use error::{AnchorError, AnchorErrorKind, BuildError, ParseError, ParseErrorKind};
pub use fyaml_tokenizer::{Position, ScalarStyle, Span};
pub use node::{Content, Document, Node, NodeId, Pair, Scalar};
pub use parser::{ParseOptions, Parser};

/// Parse a document with default options.
pub fn parse(source: &str) -> Result<Document, BuildError> {
    parse_with(source, ParseOptions::default())
}

/// Parse a document with the given options.
pub fn parse_with(source: &str, options: ParseOptions) -> Result<Document, BuildError> {
    Parser::new(source, options).parse()
}

#[cfg(test)]
mod tests;
