//! Anchor registry and merge-key expansion.

use std::collections::{HashMap, HashSet};

use fyaml_tokenizer::{Position, Span};
use tracing::{debug, trace};

use crate::error::{AnchorError, AnchorErrorKind, ParseError, ParseErrorKind};
use crate::node::{Content, Document, NodeId, Pair};

/// Anchors declared so far in one parse.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    anchors: HashMap<String, NodeId>,
    /// Anchors whose node is still being built, with a nesting count since
    /// the same name may be redeclared inside its own node.
    in_progress: HashMap<String, usize>,
}

impl AnchorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as attached to a collection that has been opened but not
    /// yet closed.
    pub fn begin(&mut self, name: &str) {
        trace!("Anchor {:?} in progress", name);
        *self.in_progress.entry(name.to_string()).or_default() += 1;
    }

    /// The collection `name` was attached to is complete.
    pub fn finish(&mut self, name: &str, id: NodeId) {
        if let Some(count) = self.in_progress.get_mut(name) {
            *count -= 1;
            if *count == 0 {
                self.in_progress.remove(name);
            }
        }
        self.register(name, id);
    }

    /// Register a complete node. A redeclared name replaces the old one for
    /// aliases that follow.
    pub fn register(&mut self, name: &str, id: NodeId) {
        trace!("Anchor {:?} -> {:?}", name, id);
        self.anchors.insert(name.to_string(), id);
    }

    /// Whether `name` is attached to a node that is still open.
    pub fn is_in_progress(&self, name: &str) -> bool {
        self.in_progress.contains_key(name)
    }

    /// Resolve an alias.
    pub fn resolve(&self, name: &str, span: Span, pos: Position) -> Result<NodeId, AnchorError> {
        if self.is_in_progress(name) {
            return Err(AnchorError::new(
                AnchorErrorKind::Cycle(name.to_string()),
                span,
                pos,
            ));
        }
        self.anchors.get(name).copied().ok_or_else(|| {
            AnchorError::new(AnchorErrorKind::Undefined(name.to_string()), span, pos)
        })
    }
}

/// The `<<` entry of a mapping: the mappings to merge, in order.
#[derive(Debug, Clone)]
pub struct MergeSet {
    sources: Vec<NodeId>,
    /// Index into the owning mapping's explicit pairs where merged pairs go.
    position: usize,
    /// Span of the `<<` key.
    pub span: Span,
}

impl MergeSet {
    /// Validate a merge value: a mapping, or a sequence of mappings, either
    /// of which may be reached through aliases.
    pub fn new(
        doc: &Document,
        value: NodeId,
        position: usize,
        span: Span,
        pos: Position,
    ) -> Result<Self, ParseError> {
        let invalid = || ParseError::new(ParseErrorKind::InvalidMergeValue, span, pos);
        let sources = match doc.content(value) {
            Content::Mapping(_) => vec![value],
            Content::Sequence(items) => {
                if items.iter().any(|item| doc.mapping(*item).is_none()) {
                    return Err(invalid());
                }
                items.clone()
            }
            _ => return Err(invalid()),
        };
        Ok(Self {
            sources,
            position,
            span,
        })
    }

    /// Splice merged pairs into `explicit`.
    ///
    /// Keys written in the owning mapping always win. Among sources, a later
    /// one overrides an earlier one, keeping the position where the key was
    /// first merged.
    pub fn expand(self, doc: &Document, mut explicit: Vec<Pair>) -> Vec<Pair> {
        let written: HashSet<&str> = explicit.iter().map(|pair| pair.key.as_str()).collect();
        let mut merged: Vec<Pair> = Vec::new();

        for source in &self.sources {
            let Some(pairs) = doc.mapping(*source) else {
                continue;
            };
            for pair in pairs {
                if written.contains(pair.key.as_str()) {
                    continue;
                }
                match merged.iter_mut().find(|m| m.key == pair.key) {
                    Some(existing) => existing.value = pair.value,
                    None => merged.push(pair.clone()),
                }
            }
        }

        debug!(
            "Merged {} pairs from {} source(s)",
            merged.len(),
            self.sources.len()
        );
        let position = self.position.min(explicit.len());
        explicit.splice(position..position, merged);
        explicit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Scalar;
    use facet_testhelpers::test;
    use fyaml_tokenizer::ScalarStyle;

    fn scalar(doc: &mut Document, text: &str) -> NodeId {
        doc.push(
            Content::Scalar(Scalar::new(text, ScalarStyle::Plain)),
            None,
            Span::default(),
        )
    }

    fn mapping(doc: &mut Document, pairs: &[(&str, &str)]) -> NodeId {
        let pairs = pairs
            .iter()
            .map(|(k, v)| Pair {
                key: k.to_string(),
                key_span: Span::default(),
                value: scalar(doc, v),
            })
            .collect();
        doc.push(Content::Mapping(pairs), None, Span::default())
    }

    fn texts(doc: &Document, pairs: &[Pair]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|p| (p.key.clone(), doc.scalar(p.value).unwrap().text.clone()))
            .collect()
    }

    #[test]
    fn test_resolve_undefined_and_cycle() {
        let mut registry = AnchorRegistry::new();
        let err = registry
            .resolve("a", Span::default(), Position::default())
            .unwrap_err();
        assert_eq!(err.kind, AnchorErrorKind::Undefined("a".to_string()));

        registry.begin("a");
        let err = registry
            .resolve("a", Span::default(), Position::default())
            .unwrap_err();
        assert_eq!(err.kind, AnchorErrorKind::Cycle("a".to_string()));
    }

    #[test]
    fn test_redeclared_anchor_replaces_previous() {
        let mut doc = Document::new();
        let first = scalar(&mut doc, "1");
        let second = scalar(&mut doc, "2");
        let mut registry = AnchorRegistry::new();
        registry.register("x", first);
        registry.register("x", second);
        assert_eq!(
            registry.resolve("x", Span::default(), Position::default()),
            Ok(second)
        );
    }

    #[test]
    fn test_nested_redeclaration_stays_in_progress() {
        let mut doc = Document::new();
        let inner = scalar(&mut doc, "1");
        let mut registry = AnchorRegistry::new();
        registry.begin("x");
        registry.begin("x");
        registry.finish("x", inner);
        assert!(registry.is_in_progress("x"));
    }

    #[test]
    fn test_expand_explicit_keys_win() {
        let mut doc = Document::new();
        let base = mapping(&mut doc, &[("a", "1"), ("b", "2")]);
        let merge = MergeSet::new(&doc, base, 0, Span::default(), Position::default()).unwrap();
        let explicit = vec![Pair {
            key: "b".to_string(),
            key_span: Span::default(),
            value: scalar(&mut doc, "3"),
        }];
        let pairs = merge.expand(&doc, explicit);
        assert_eq!(
            texts(&doc, &pairs),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_later_source_wins() {
        let mut doc = Document::new();
        let first = mapping(&mut doc, &[("x", "1"), ("y", "1")]);
        let second = mapping(&mut doc, &[("y", "2")]);
        let list = doc.push(
            Content::Sequence(vec![first, second]),
            None,
            Span::default(),
        );
        let merge = MergeSet::new(&doc, list, 0, Span::default(), Position::default()).unwrap();
        let pairs = merge.expand(&doc, Vec::new());
        assert_eq!(
            texts(&doc, &pairs),
            vec![
                ("x".to_string(), "1".to_string()),
                ("y".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_merge_value() {
        let mut doc = Document::new();
        let value = scalar(&mut doc, "oops");
        let err = MergeSet::new(&doc, value, 0, Span::default(), Position::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidMergeValue);
    }
}
