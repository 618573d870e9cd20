//! Node arena for parsed documents.
//!
//! Every node lives in the [`Document`]'s arena and is addressed by a
//! [`NodeId`]. Aliases hold the id of the node they refer to, so a subtree
//! reachable through several aliases is stored once.

use std::cell::OnceCell;

use fyaml_tokenizer::{ScalarStyle, Span};

use crate::coerce::{ScalarKind, classify};

/// Index of a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node: its content plus the anchor and span it was written with.
#[derive(Debug, Clone)]
pub struct Node {
    /// What the node holds.
    pub content: Content,
    /// `&name` declared on this node.
    pub anchor: Option<String>,
    /// Source span.
    pub span: Span,
}

/// The content of a node.
#[derive(Debug, Clone)]
pub enum Content {
    /// A leaf value.
    Scalar(Scalar),
    /// `- a` items or `[a, b]`.
    Sequence(Vec<NodeId>),
    /// `key: value` pairs, merged pairs included, in document order.
    Mapping(Vec<Pair>),
    /// `*name`, pointing at the anchored node.
    Alias {
        /// Anchor name without `*`.
        name: String,
        /// The node the anchor named when the alias was read.
        target: NodeId,
    },
}

/// A scalar and how it was written.
#[derive(Debug, Clone)]
pub struct Scalar {
    /// Decoded text.
    pub text: String,
    /// Source style.
    pub style: ScalarStyle,
    kind: OnceCell<ScalarKind>,
}

impl Scalar {
    /// Create a scalar.
    pub fn new(text: impl Into<String>, style: ScalarStyle) -> Self {
        Self {
            text: text.into(),
            style,
            kind: OnceCell::new(),
        }
    }

    /// Inferred kind. Only plain scalars are typed; anything quoted or
    /// written as a block is a string.
    pub fn kind(&self) -> ScalarKind {
        *self.kind.get_or_init(|| {
            if self.style.is_plain() {
                classify(&self.text)
            } else {
                ScalarKind::String
            }
        })
    }

    /// Append a continuation line of a multi-line plain scalar.
    pub(crate) fn fold_line(&mut self, line: &str, empty_lines: u32) {
        if empty_lines == 0 {
            self.text.push(' ');
        } else {
            for _ in 0..empty_lines {
                self.text.push('\n');
            }
        }
        self.text.push_str(line);
        self.kind = OnceCell::new();
    }
}

/// One mapping entry.
#[derive(Debug, Clone)]
pub struct Pair {
    /// Key text.
    pub key: String,
    /// Span of the key where it was written (in the merge source for merged
    /// pairs).
    pub key_span: Span,
    /// The value node.
    pub value: NodeId,
}

/// A parsed document: a node arena and its root.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node, or `None` for an empty document.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    /// Add a node to the arena.
    pub fn push(&mut self, content: Content, anchor: Option<String>, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            content,
            anchor,
            span,
        });
        id
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follow aliases until a non-alias node is reached.
    pub fn resolve(&self, mut id: NodeId) -> NodeId {
        // Alias targets always precede the alias, so this terminates.
        while let Content::Alias { target, .. } = &self.node(id).content {
            id = *target;
        }
        id
    }

    /// Content of `id` with aliases followed.
    pub fn content(&self, id: NodeId) -> &Content {
        &self.node(self.resolve(id)).content
    }

    /// Scalar at `id`, if it is one.
    pub fn scalar(&self, id: NodeId) -> Option<&Scalar> {
        match self.content(id) {
            Content::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Items of the sequence at `id`, if it is one.
    pub fn sequence(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.content(id) {
            Content::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Pairs of the mapping at `id`, if it is one.
    pub fn mapping(&self, id: NodeId) -> Option<&[Pair]> {
        match self.content(id) {
            Content::Mapping(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Walk mapping keys from the root.
    pub fn get(&self, path: &[&str]) -> Option<NodeId> {
        let mut current = self.root?;
        for segment in path {
            let pairs = self.mapping(current)?;
            current = pairs.iter().find(|pair| pair.key == *segment)?.value;
        }
        Some(current)
    }
}
