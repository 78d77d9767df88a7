//! Assignments: what to place where.

use ttn_tree::{KeyPath, TranslationNode};

/// A single desired change: place `value` at `path`.
///
/// The value may be a whole `Branch`, which turns one assignment into a bulk
/// merge of a subtree (the patch-file case).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Where the value goes.
    pub path: KeyPath,
    /// The leaf or branch to place there.
    pub value: TranslationNode,
}

impl Assignment {
    /// Create an assignment from a path and any node value.
    pub fn new(path: KeyPath, value: TranslationNode) -> Self {
        Self { path, value }
    }

    /// Create a leaf assignment.
    pub fn leaf(path: KeyPath, text: impl Into<String>) -> Self {
        Self {
            path,
            value: TranslationNode::leaf(text),
        }
    }

    /// Create a branch assignment (bulk subtree merge).
    pub fn branch(path: KeyPath, value: TranslationNode) -> Self {
        Self { path, value }
    }
}
