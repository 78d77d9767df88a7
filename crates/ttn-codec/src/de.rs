//! Strict deserialization of translation documents.
//!
//! Parsing happens in two phases. The first phase reads the JSON into a raw
//! form that keeps every key-value pair in document order, including
//! duplicates a `Map`-based parse would collapse. The second phase expands
//! each key as a dotted path and grafts the value into the tree, failing on
//! any path that ends up carrying two values.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use ttn_tree::{KeyPath, NodeKind, TranslationNode};

use crate::error::{CodecError, CodecResult};

/// Parse a JSON translation document into a tree.
///
/// Dotted keys are expanded (`"a.b": "x"` and `"a": {"b": "x"}` build the
/// same tree). Fails with [`CodecError::Malformed`] on invalid JSON or
/// non-string, non-object values, and with [`CodecError::AmbiguousNode`] when
/// one path resolves to two values — corrupt input is reported, never
/// repaired by overwrite.
pub fn deserialize(text: &str) -> CodecResult<TranslationNode> {
    let raw: RawNode = serde_json::from_str(text)?;
    match raw {
        RawNode::Text(_) => Err(CodecError::RootNotObject),
        RawNode::Map(entries) => {
            let mut root = BTreeMap::new();
            graft_entries(&mut root, entries, None)?;
            Ok(TranslationNode::Branch(root))
        }
    }
}

/// A parsed document before path expansion. Duplicate keys survive here.
enum RawNode {
    Text(String),
    Map(Vec<(String, RawNode)>),
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawVisitor)
    }
}

struct RawVisitor;

impl<'de> Visitor<'de> for RawVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a translation string or an object of nested translations")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(RawNode::Text(v.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(RawNode::Text(v))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, RawNode>()? {
            entries.push((key, value));
        }
        Ok(RawNode::Map(entries))
    }
}

/// Expand and graft a raw map's entries into `target`.
///
/// `prefix` is the path of `target` itself, used for diagnostics; `None` at
/// the document root.
fn graft_entries(
    target: &mut BTreeMap<String, TranslationNode>,
    entries: Vec<(String, RawNode)>,
    prefix: Option<&KeyPath>,
) -> CodecResult<()> {
    for (key, value) in entries {
        // A document key may itself be a dotted path (the flat access pattern).
        let rel = KeyPath::parse(&key).map_err(|source| CodecError::InvalidKey {
            key: key.clone(),
            source,
        })?;
        let full = match prefix {
            Some(p) => extend(p, &rel),
            None => rel.clone(),
        };
        let node = build_node(value, &full)?;
        graft(target, rel.segments(), node, &full)?;
    }
    Ok(())
}

fn extend(prefix: &KeyPath, rel: &KeyPath) -> KeyPath {
    let mut segments: Vec<&str> = prefix.segments().iter().map(String::as_str).collect();
    segments.extend(rel.segments().iter().map(String::as_str));
    // Both sides are validated paths, so the concatenation is one too.
    KeyPath::from_segments(segments).unwrap_or_else(|_| rel.clone())
}

/// Recursively expand a raw value at `path` into a tree node.
fn build_node(raw: RawNode, path: &KeyPath) -> CodecResult<TranslationNode> {
    match raw {
        RawNode::Text(text) => Ok(TranslationNode::Leaf(text)),
        RawNode::Map(entries) => {
            let mut children = BTreeMap::new();
            graft_entries(&mut children, entries, Some(path))?;
            Ok(TranslationNode::Branch(children))
        }
    }
}

/// Plant `node` under `target`, walking `rel` and creating branches on the
/// way. `full` is the complete path of `node` for diagnostics.
///
/// Two branches meeting at the same path merge key by key (a flat key and a
/// nested object may legitimately describe sibling parts of one subtree);
/// every other collision is ambiguity.
fn graft(
    target: &mut BTreeMap<String, TranslationNode>,
    rel: &[String],
    node: TranslationNode,
    full: &KeyPath,
) -> CodecResult<()> {
    let mut current = target;
    let rel_len = rel.len();

    for (i, segment) in rel[..rel_len - 1].iter().enumerate() {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(TranslationNode::branch);
        if entry.kind() == NodeKind::Leaf {
            let at = full
                .prefix(full.len() - rel_len + i + 1)
                .unwrap_or_else(|| full.clone());
            return Err(CodecError::AmbiguousNode {
                path: at,
                first: NodeKind::Leaf,
                second: NodeKind::Branch,
            });
        }
        // The leaf case errored above, so this never replaces anything.
        current = entry.make_branch();
    }

    let last = &rel[rel_len - 1];
    match current.get_mut(last) {
        None => {
            current.insert(last.clone(), node);
        }
        Some(existing) => match (existing, node) {
            (TranslationNode::Branch(old), TranslationNode::Branch(new)) => {
                for (key, value) in new {
                    let child_full = full.child(&key).unwrap_or_else(|_| full.clone());
                    graft(old, std::slice::from_ref(&key), value, &child_full)?;
                }
            }
            (existing, node) => {
                return Err(CodecError::AmbiguousNode {
                    path: full.clone(),
                    first: existing.kind(),
                    second: node.kind(),
                });
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(text: &str) -> KeyPath {
        KeyPath::parse(text).unwrap()
    }

    #[test]
    fn parses_nested_document() {
        let tree = deserialize(r#"{"adminBookings": {"status": {"confirmed": "מאושר"}}}"#)
            .unwrap();
        assert_eq!(
            tree.get(&path("adminBookings.status.confirmed")),
            Some(&TranslationNode::leaf("מאושר"))
        );
    }

    #[test]
    fn expands_flat_dotted_keys() {
        let tree = deserialize(r#"{"adminBookings.status.confirmed": "מאושר"}"#).unwrap();
        assert_eq!(
            tree.get(&path("adminBookings.status.confirmed")),
            Some(&TranslationNode::leaf("מאושר"))
        );
        // The flat key became real structure, not a dotted branch key.
        assert_eq!(
            tree.get(&path("adminBookings")).map(TranslationNode::kind),
            Some(NodeKind::Branch)
        );
    }

    #[test]
    fn flat_and_nested_forms_merge_when_compatible() {
        let tree = deserialize(
            r#"{"prefs.sound": "צליל", "prefs": {"language": "שפה"}}"#,
        )
        .unwrap();
        assert_eq!(
            tree.get(&path("prefs.sound")),
            Some(&TranslationNode::leaf("צליל"))
        );
        assert_eq!(
            tree.get(&path("prefs.language")),
            Some(&TranslationNode::leaf("שפה"))
        );
    }

    #[test]
    fn flat_leaf_vs_nested_branch_is_ambiguous() {
        // The old scripts' failure mode: one key flat, the same key nested.
        let err = deserialize(
            r#"{"adminBookings.status": "סטטוס", "adminBookings": {"status": {"confirmed": "מאושר"}}}"#,
        )
        .unwrap_err();
        match err {
            CodecError::AmbiguousNode { path: p, first, second } => {
                assert_eq!(p, path("adminBookings.status"));
                assert_eq!(first, NodeKind::Leaf);
                assert_eq!(second, NodeKind::Branch);
            }
            other => panic!("expected AmbiguousNode, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_leaf_keys_are_ambiguous() {
        let err = deserialize(r#"{"common.save": "שמור", "common.save": "שמירה"}"#).unwrap_err();
        match err {
            CodecError::AmbiguousNode { path: p, first, second } => {
                assert_eq!(p, path("common.save"));
                assert_eq!(first, NodeKind::Leaf);
                assert_eq!(second, NodeKind::Leaf);
            }
            other => panic!("expected AmbiguousNode, got {other:?}"),
        }
    }

    #[test]
    fn descending_through_flat_leaf_is_ambiguous() {
        // `a.b` exists as a leaf; `a.b.c` then needs `a.b` to be a branch.
        let err = deserialize(r#"{"a.b": "x", "a.b.c": "y"}"#).unwrap_err();
        match err {
            CodecError::AmbiguousNode { path: p, first, second } => {
                assert_eq!(p, path("a.b"));
                assert_eq!(first, NodeKind::Leaf);
                assert_eq!(second, NodeKind::Branch);
            }
            other => panic!("expected AmbiguousNode, got {other:?}"),
        }
    }

    #[test]
    fn non_string_values_are_malformed() {
        assert!(matches!(
            deserialize(r#"{"count": 3}"#),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            deserialize(r#"{"items": ["a", "b"]}"#),
            Err(CodecError::Malformed(_))
        ));
        assert!(matches!(
            deserialize(r#"{"flag": null}"#),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            deserialize(r#"{"a": "#),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn top_level_string_is_rejected() {
        assert!(matches!(
            deserialize(r#""just a string""#),
            Err(CodecError::RootNotObject)
        ));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(matches!(
            deserialize(r#"{".a": "x"}"#),
            Err(CodecError::InvalidKey { .. })
        ));
        assert!(matches!(
            deserialize(r#"{"a..b": "x"}"#),
            Err(CodecError::InvalidKey { .. })
        ));
        assert!(matches!(
            deserialize(r#"{"a.": "x"}"#),
            Err(CodecError::InvalidKey { .. })
        ));
        assert!(matches!(
            deserialize(r#"{"": "x"}"#),
            Err(CodecError::InvalidKey { .. })
        ));
    }

    #[test]
    fn nested_keys_may_also_be_dotted() {
        let tree = deserialize(r#"{"prefs": {"treatment.genderAny": "ללא העדפה"}}"#).unwrap();
        assert_eq!(
            tree.get(&path("prefs.treatment.genderAny")),
            Some(&TranslationNode::leaf("ללא העדפה"))
        );
    }

    #[test]
    fn ambiguity_inside_nested_object_reports_full_path() {
        let err = deserialize(r#"{"a": {"b.c": "x", "b": {"c": "y"}}}"#).unwrap_err();
        match err {
            CodecError::AmbiguousNode { path: p, .. } => assert_eq!(p, path("a.b.c")),
            other => panic!("expected AmbiguousNode, got {other:?}"),
        }
    }

    #[test]
    fn empty_document_is_an_empty_branch() {
        let tree = deserialize("{}").unwrap();
        assert!(tree.is_empty());
    }
}
