//! Low-level YAML output writer.
//!
//! Provides a structured way to build block-style YAML for a store: keys,
//! sequence items, scalars and comments, each placed at an explicit column.

use std::borrow::Cow;

use fyaml_tree::ScalarKind;
use indexmap::IndexMap;

use crate::entry::ConfigEntry;
use crate::options::FormatOptions;
use crate::scalar::{can_be_plain, can_be_plain_key, escape_quoted, literal_chomping, literal_lines};
use crate::store::ConfigStore;
use crate::value::{Scalar, Value};

/// Low-level YAML output writer.
///
/// Every line is finished with a newline before the next one starts. A
/// sequence item's dash is held back until the item's first line, so a
/// mapping inside a sequence starts on the dash line.
pub struct YamlWriter {
    out: String,
    options: FormatOptions,
    /// Column of a `- ` not yet written.
    pending_dash: Option<usize>,
}

impl Default for YamlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            options,
            pending_dash: None,
        }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    fn write_spaces(&mut self, count: usize) {
        self.out.extend(std::iter::repeat_n(' ', count));
    }

    /// Position the output at `column` on a fresh line.
    fn start_line(&mut self, column: usize) {
        match self.pending_dash.take() {
            Some(dash) => {
                self.write_spaces(dash);
                self.out.push_str("- ");
            }
            None => self.write_spaces(column),
        }
    }

    fn line_len(&self) -> usize {
        self.out.len() - self.out.rfind('\n').map_or(0, |i| i + 1)
    }

    /// Write a comment, one `#` line per line of `text`.
    ///
    /// Before a held-back sequence item the comment goes above the dash.
    pub fn comment(&mut self, column: usize, text: &str) {
        let column = self.pending_dash.unwrap_or(column);
        for line in text.lines() {
            self.write_spaces(column);
            let line = line.trim_end();
            if line.is_empty() {
                self.out.push('#');
            } else {
                self.out.push_str("# ");
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    /// Begin a sequence item whose dash sits at `column`.
    ///
    /// The item's content goes at `column + 2`.
    pub fn sequence_item(&mut self, column: usize) {
        self.pending_dash = Some(column);
    }

    /// Write `key:` at `column`, leaving the line open.
    pub fn key(&mut self, column: usize, key: &str) {
        self.start_line(column);
        if can_be_plain_key(key) {
            self.out.push_str(key);
        } else {
            self.write_quoted(key);
        }
        self.out.push(':');
    }

    /// Finish the current line.
    pub fn end_line(&mut self) {
        self.out.push('\n');
    }

    /// Write the value of the key just written at `column`.
    pub fn value_after_key(&mut self, column: usize, value: &Value) {
        match value {
            Value::Scalar(scalar) => {
                if let Some(chomping) = block_candidate(scalar) {
                    self.out.push_str(" |");
                    self.out.push_str(chomping);
                    self.out.push('\n');
                    self.write_literal_lines(column + self.options.indent, scalar.text());
                } else {
                    self.out.push(' ');
                    self.write_scalar(scalar, false);
                    self.out.push('\n');
                }
            }
            Value::Array(items) => {
                let flow = self.flow_array(items);
                if items.is_empty()
                    || (items.len() <= self.options.inline_sequence_threshold
                        && self.line_len() + 1 + flow.len() <= self.options.max_width)
                {
                    self.out.push(' ');
                    self.out.push_str(&flow);
                    self.out.push('\n');
                } else {
                    self.out.push('\n');
                    let dash = column + self.options.indent;
                    for item in items {
                        self.write_spaces(dash);
                        self.out.push_str("- ");
                        self.write_scalar(item, false);
                        self.out.push('\n');
                    }
                }
            }
        }
    }

    /// Write a whole value as the content of a sequence item.
    pub fn item_value(&mut self, column: usize, value: &Value) {
        self.start_line(column);
        match value {
            Value::Scalar(scalar) => self.write_scalar(scalar, false),
            Value::Array(items) => {
                let flow = self.flow_array(items);
                self.out.push_str(&flow);
            }
        }
        self.out.push('\n');
    }

    fn write_literal_lines(&mut self, column: usize, text: &str) {
        for line in literal_lines(text) {
            if !line.is_empty() {
                self.write_spaces(column);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    fn write_scalar(&mut self, scalar: &Scalar, flow: bool) {
        let text = scalar_text(scalar, flow);
        self.out.push_str(&text);
    }

    fn write_quoted(&mut self, text: &str) {
        self.out.push('"');
        self.out.push_str(&escape_quoted(text));
        self.out.push('"');
    }

    fn flow_array(&self, items: &[Scalar]) -> String {
        let mut flow = String::from("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                flow.push_str(", ");
            }
            flow.push_str(&scalar_text(item, true));
        }
        flow.push(']');
        flow
    }
}

/// Text of a scalar as it should appear in the output.
fn scalar_text(scalar: &Scalar, flow: bool) -> Cow<'_, str> {
    let text = scalar.text();
    match scalar.kind() {
        ScalarKind::Null if text.is_empty() => Cow::Borrowed("null"),
        ScalarKind::String if !can_be_plain(text, flow) => {
            Cow::Owned(format!("\"{}\"", escape_quoted(text)))
        }
        _ => Cow::Borrowed(text),
    }
}

fn block_candidate(scalar: &Scalar) -> Option<&'static str> {
    match scalar.kind() {
        ScalarKind::String => literal_chomping(scalar.text()),
        _ => None,
    }
}

/// One level of the category tree.
#[derive(Default)]
struct Category<'a> {
    children: IndexMap<&'a str, Item<'a>>,
}

enum Item<'a> {
    Leaf(&'a ConfigEntry),
    Category(Category<'a>),
}

impl<'a> Category<'a> {
    fn insert(&mut self, segments: &[&'a str], entry: &'a ConfigEntry) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut node = self;
        for segment in parents {
            let item = node
                .children
                .entry(*segment)
                .or_insert_with(|| Item::Category(Category::default()));
            match item {
                Item::Category(category) => node = category,
                Item::Leaf(_) => return,
            }
        }
        node.children.insert(*last, Item::Leaf(entry));
    }

    /// Children named `0`, `1`, ... with a collection among them, which
    /// parses back into the same indexed paths when written as a sequence.
    fn is_sequence(&self) -> bool {
        self.children
            .keys()
            .enumerate()
            .all(|(index, name)| *name == index.to_string())
            && self.children.values().any(|item| match item {
                Item::Category(_) => true,
                Item::Leaf(entry) => entry.value().is_array(),
            })
    }
}

struct Frame<'t, 'a> {
    children: indexmap::map::Iter<'t, &'a str, Item<'a>>,
    column: usize,
    sequence: bool,
}

/// Serialize every entry of `store`, grouping entries by category.
pub(crate) fn write_store(store: &ConfigStore, options: &FormatOptions) -> String {
    let separator = store.separator();
    let mut root = Category::default();
    for entry in store.entries() {
        let segments: Vec<&str> = entry.path().split(separator).collect();
        root.insert(&segments, entry);
    }

    let indent = options.indent;
    let write_descriptions = options.write_descriptions;
    let mut writer = YamlWriter::with_options(options.clone());
    let mut stack = vec![Frame {
        children: root.children.iter(),
        column: 0,
        sequence: false,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some((name, item)) = frame.children.next() else {
            stack.pop();
            continue;
        };
        let (column, sequence) = (frame.column, frame.sequence);

        if let Item::Leaf(entry) = item
            && write_descriptions
            && let Some(description) = entry.description()
        {
            writer.comment(column, description);
        }

        if sequence {
            writer.sequence_item(column);
            match item {
                Item::Leaf(entry) => writer.item_value(column + 2, entry.value()),
                // An item that is itself an indexed sequence is written as a
                // mapping with numeric keys.
                Item::Category(category) => stack.push(Frame {
                    children: category.children.iter(),
                    column: column + 2,
                    sequence: false,
                }),
            }
        } else {
            writer.key(column, name);
            match item {
                Item::Leaf(entry) => writer.value_after_key(column, entry.value()),
                Item::Category(category) => {
                    writer.end_line();
                    stack.push(Frame {
                        children: category.children.iter(),
                        column: column + indent,
                        sequence: category.is_sequence(),
                    });
                }
            }
        }
    }

    writer.finish()
}
