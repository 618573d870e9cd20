//! Options for loading and serializing a store.

use fyaml_tree::ParseOptions;

use crate::store::DEFAULT_SEPARATOR;

/// Options for parsing a document into a store.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Category separator joining path segments (default: `%`)
    pub separator: char,

    /// Options for building the document tree
    pub parse: ParseOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            parse: ParseOptions::default(),
        }
    }
}

impl LoadOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the maximum collection nesting.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.parse = self.parse.max_depth(max_depth);
        self
    }

    /// Log parser frames and flattened entries at debug level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.parse = self.parse.verbose(verbose);
        self
    }
}

/// Options for YAML serialization.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Spaces per nesting level (default: 2)
    pub indent: usize,

    /// Write arrays with ≤ N elements in flow style (default: 8)
    pub inline_sequence_threshold: usize,

    /// Max line width for flow arrays (default: 80)
    pub max_width: usize,

    /// Write entry descriptions as comments (default: true)
    pub write_descriptions: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            inline_sequence_threshold: 8,
            max_width: 80,
            write_descriptions: true,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per level. Zero is treated as one.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Set the largest array written in flow style.
    pub fn inline_sequence_threshold(mut self, threshold: usize) -> Self {
        self.inline_sequence_threshold = threshold;
        self
    }

    /// Set max line width.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Leave descriptions out of the output.
    pub fn without_descriptions(mut self) -> Self {
        self.write_descriptions = false;
        self
    }
}
