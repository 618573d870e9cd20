//! Separator-joined entry paths.

use crate::error::{KeyError, KeyErrorKind};

/// Split `path` into trimmed segments.
pub(crate) fn segments(path: &str, separator: char) -> Result<Vec<&str>, KeyError> {
    if path.trim().is_empty() {
        return Err(KeyError::new(KeyErrorKind::Invalid("empty path"), path));
    }
    path.split(separator)
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                Err(KeyError::new(KeyErrorKind::Invalid("empty segment"), path))
            } else {
                Ok(segment)
            }
        })
        .collect()
}

/// Trim every segment of `path` and join them back together.
pub(crate) fn normalize(path: &str, separator: char) -> Result<String, KeyError> {
    let mut normalized = String::with_capacity(path.len());
    for (i, segment) in segments(path, separator)?.into_iter().enumerate() {
        if i > 0 {
            normalized.push(separator);
        }
        normalized.push_str(segment);
    }
    Ok(normalized)
}

/// Append a mapping key to a path, validating it as a segment.
pub(crate) fn join(prefix: &str, key: &str, separator: char) -> Result<String, KeyError> {
    let segment = key.trim();
    let full = |segment: &str| {
        if prefix.is_empty() {
            segment.to_string()
        } else {
            format!("{}{}{}", prefix, separator, segment)
        }
    };
    if segment.is_empty() {
        return Err(KeyError::new(KeyErrorKind::Invalid("empty key"), full(key)));
    }
    if segment.contains(separator) {
        return Err(KeyError::new(
            KeyErrorKind::Invalid("key contains the path separator"),
            full(key),
        ));
    }
    Ok(full(segment))
}

/// Every proper prefix of a normalized path, shortest first.
pub(crate) fn ancestors(path: &str, separator: char) -> impl Iterator<Item = &str> {
    path.char_indices()
        .filter(move |(_, c)| *c == separator)
        .map(move |(i, _)| &path[..i])
}

/// The path one level up, or `""` at the top.
pub(crate) fn parent(path: &str, separator: char) -> &str {
    path.rsplit_once(separator).map_or("", |(parent, _)| parent)
}

/// The last segment of a path.
pub(crate) fn leaf(path: &str, separator: char) -> &str {
    path.rsplit_once(separator).map_or(path, |(_, leaf)| leaf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_normalize_trims_segments() {
        assert_eq!(normalize(" a % b %c ", '%').unwrap(), "a%b%c");
        assert_eq!(normalize("a.b", '.').unwrap(), "a.b");
    }

    #[test]
    fn test_malformed_paths() {
        for path in ["", "  ", "a%%b", "%a", "a%"] {
            let err = normalize(path, '%').unwrap_err();
            assert!(matches!(err.kind, KeyErrorKind::Invalid(_)), "{path:?}");
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "a", '%').unwrap(), "a");
        assert_eq!(join("a", " b ", '%').unwrap(), "a%b");
        let err = join("a", "b%c", '%').unwrap_err();
        assert_eq!(err.path, "a%b%c");
    }

    #[test]
    fn test_ancestors_parent_leaf() {
        let ancestors: Vec<_> = ancestors("a%b%c", '%').collect();
        assert_eq!(ancestors, ["a", "a%b"]);
        assert_eq!(parent("a%b%c", '%'), "a%b");
        assert_eq!(parent("a", '%'), "");
        assert_eq!(leaf("a%b%c", '%'), "c");
    }
}
