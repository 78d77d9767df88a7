//! Tree-level diff: compare two translation stores key by key.
//!
//! Paths are dotted keys; the empty path denotes the root. Changes come out
//! in a deterministic order: old-side keys first (removals and descents in
//! key order), then new-side additions in key order.

use serde::Serialize;
use ttn_tree::{NodeKind, TranslationNode};

/// The result of comparing two trees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TreeDiff {
    /// The list of changes between the old and new trees.
    pub changes: Vec<TreeChange>,
}

impl TreeDiff {
    /// Create an empty tree diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of added keys.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, TreeChange::Added { .. }))
            .count()
    }

    /// Number of removed keys.
    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, TreeChange::Removed { .. }))
            .count()
    }

    /// Number of leaves whose text changed.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, TreeChange::Modified { .. }))
            .count()
    }

    /// Number of paths whose kind flipped between flat and nested.
    pub fn kind_changes(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, TreeChange::KindChanged { .. }))
            .count()
    }
}

/// A single change between two trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum TreeChange {
    /// A key present only in the new tree.
    Added {
        path: String,
        value: TranslationNode,
    },
    /// A key present only in the old tree.
    Removed {
        path: String,
        value: TranslationNode,
    },
    /// A leaf whose text differs between the trees.
    Modified {
        path: String,
        old: String,
        new: String,
    },
    /// A path that is flat in one tree and nested in the other.
    KindChanged {
        path: String,
        old_kind: NodeKind,
        new_kind: NodeKind,
    },
}

impl TreeChange {
    /// The dotted path this change is about.
    pub fn path(&self) -> &str {
        match self {
            Self::Added { path, .. }
            | Self::Removed { path, .. }
            | Self::Modified { path, .. }
            | Self::KindChanged { path, .. } => path,
        }
    }
}

/// Compare two trees and produce a diff.
pub fn diff_trees(old: &TranslationNode, new: &TranslationNode) -> TreeDiff {
    let mut changes = Vec::new();
    diff_nodes(old, new, String::new(), &mut changes);
    TreeDiff { changes }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn diff_nodes(
    old: &TranslationNode,
    new: &TranslationNode,
    path: String,
    changes: &mut Vec<TreeChange>,
) {
    match (old, new) {
        (TranslationNode::Leaf(a), TranslationNode::Leaf(b)) => {
            if a != b {
                changes.push(TreeChange::Modified {
                    path,
                    old: a.clone(),
                    new: b.clone(),
                });
            }
        }
        (TranslationNode::Branch(a), TranslationNode::Branch(b)) => {
            for (key, old_child) in a {
                let child_path = join(&path, key);
                match b.get(key) {
                    Some(new_child) => diff_nodes(old_child, new_child, child_path, changes),
                    None => changes.push(TreeChange::Removed {
                        path: child_path,
                        value: old_child.clone(),
                    }),
                }
            }
            for (key, new_child) in b {
                if !a.contains_key(key) {
                    changes.push(TreeChange::Added {
                        path: join(&path, key),
                        value: new_child.clone(),
                    });
                }
            }
        }
        _ => changes.push(TreeChange::KindChanged {
            path,
            old_kind: old.kind(),
            new_kind: new.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttn_codec::deserialize;

    fn tree(text: &str) -> TranslationNode {
        deserialize(text).unwrap()
    }

    #[test]
    fn identical_trees_have_no_changes() {
        let t = tree(r#"{"common": {"save": "שמור", "cancel": "ביטול"}}"#);
        assert!(diff_trees(&t, &t).is_empty());
    }

    #[test]
    fn added_and_removed_keys() {
        let old = tree(r#"{"common": {"save": "שמור", "old": "ישן"}}"#);
        let new = tree(r#"{"common": {"save": "שמור", "fresh": "חדש"}}"#);

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.removals(), 1);
        assert_eq!(diff.additions(), 1);

        let removed = diff
            .changes
            .iter()
            .find(|c| matches!(c, TreeChange::Removed { .. }))
            .unwrap();
        assert_eq!(removed.path(), "common.old");
        let added = diff
            .changes
            .iter()
            .find(|c| matches!(c, TreeChange::Added { .. }))
            .unwrap();
        assert_eq!(added.path(), "common.fresh");
    }

    #[test]
    fn modified_leaf_text() {
        let old = tree(r#"{"errors": {"fetchFailed": "שגיאה בטעינת נתונים"}}"#);
        let new = tree(r#"{"errors": {"fetchFailed": "הטעינה נכשלה"}}"#);

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.len(), 1);
        match &diff.changes[0] {
            TreeChange::Modified { path, old, new } => {
                assert_eq!(path, "errors.fetchFailed");
                assert_eq!(old, "שגיאה בטעינת נתונים");
                assert_eq!(new, "הטעינה נכשלה");
            }
            other => panic!("expected Modified, got {other:?}"),
        }
    }

    #[test]
    fn flat_vs_nested_is_a_kind_change() {
        let old = tree(r#"{"adminBookings": {"status": "סטטוס"}}"#);
        let new = tree(r#"{"adminBookings": {"status": {"confirmed": "מאושר"}}}"#);

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.len(), 1);
        match &diff.changes[0] {
            TreeChange::KindChanged { path, old_kind, new_kind } => {
                assert_eq!(path, "adminBookings.status");
                assert_eq!(*old_kind, NodeKind::Leaf);
                assert_eq!(*new_kind, NodeKind::Branch);
            }
            other => panic!("expected KindChanged, got {other:?}"),
        }
    }

    #[test]
    fn whole_subtree_addition_is_one_change() {
        let old = tree("{}");
        let new = tree(r#"{"addresses": {"fields": {"city": "עיר"}}}"#);

        let diff = diff_trees(&old, &new);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.changes[0].path(), "addresses");
        assert!(matches!(diff.changes[0], TreeChange::Added { .. }));
    }

    #[test]
    fn changes_come_out_in_deterministic_order() {
        let old = tree(r#"{"b": "1", "d": "2"}"#);
        let new = tree(r#"{"a": "3", "c": "4"}"#);

        let diff = diff_trees(&old, &new);
        let paths: Vec<&str> = diff.changes.iter().map(TreeChange::path).collect();
        // Old-side removals in key order, then new-side additions in key order.
        assert_eq!(paths, ["b", "d", "a", "c"]);
    }

    #[test]
    fn serializes_with_change_tags() {
        let old = tree(r#"{"a": "x"}"#);
        let new = tree("{}");
        let json = serde_json::to_value(diff_trees(&old, &new)).unwrap();
        assert_eq!(json["changes"][0]["change"], "removed");
        assert_eq!(json["changes"][0]["path"], "a");
    }
}
