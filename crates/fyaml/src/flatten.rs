//! Flattening a document tree into store entries.

use fyaml_tokenizer::Position;
use fyaml_tree::{Content, Document, NodeId, ParseError, ParseErrorKind, ScalarKind};
use tracing::debug;

use crate::error::Result;
use crate::path;
use crate::store::ConfigStore;
use crate::value::{Scalar, Value};

/// Add every leaf of `document` to `store`.
///
/// Mappings contribute their keys as path segments. A sequence of scalars
/// becomes one array entry; a sequence holding any collection is indexed,
/// each element under its position. Empty mappings leave no entry.
pub(crate) fn flatten(
    document: &Document,
    source: &str,
    store: &mut ConfigStore,
    verbose: bool,
) -> Result<()> {
    let Some(root) = document.root() else {
        return Ok(());
    };
    match document.content(root) {
        Content::Mapping(_) => {}
        Content::Scalar(scalar) if scalar.kind() == ScalarKind::Null => {
            return Ok(());
        }
        _ => {
            let span = document.node(root).span;
            let pos = Position::locate(source, span.start);
            return Err(ParseError::new(ParseErrorKind::NonMappingRoot, span, pos).into());
        }
    }

    let separator = store.separator();
    let mut pending: Vec<(String, NodeId)> = vec![(String::new(), root)];
    while let Some((prefix, id)) = pending.pop() {
        match document.content(id) {
            Content::Mapping(pairs) => {
                for pair in pairs.iter().rev() {
                    let child = path::join(&prefix, &pair.key, separator)?;
                    pending.push((child, pair.value));
                }
            }
            Content::Sequence(items) if all_scalars(document, items) => {
                let elements = items
                    .iter()
                    .filter_map(|item| document.scalar(*item))
                    .map(Scalar::from_node)
                    .collect();
                emit(store, prefix, Value::Array(elements), verbose)?;
            }
            Content::Sequence(items) => {
                for (index, item) in items.iter().enumerate().rev() {
                    pending.push((format!("{}{}{}", prefix, separator, index), *item));
                }
            }
            Content::Scalar(scalar) => {
                emit(store, prefix, Value::Scalar(Scalar::from_node(scalar)), verbose)?;
            }
            Content::Alias { target, .. } => pending.push((prefix, *target)),
        }
    }
    Ok(())
}

fn all_scalars(document: &Document, items: &[NodeId]) -> bool {
    items
        .iter()
        .all(|item| matches!(document.content(*item), Content::Scalar(_)))
}

fn emit(store: &mut ConfigStore, path: String, value: Value, verbose: bool) -> Result<()> {
    if verbose {
        debug!("{} = {}", path, value);
    }
    store.insert(path, value, None)?;
    Ok(())
}
