//! The translation tree itself.
//!
//! A [`TranslationNode`] is either a `Leaf` (a display string) or a `Branch`
//! (a map from key segment to child node). The sum type is the point: a key
//! can never simultaneously hold a flat string and a nested object, so the
//! flat-vs-nested ambiguity the old mutation scripts kept reintroducing is
//! unrepresentable. Disagreements surface as explicit conflicts instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::path::KeyPath;

/// The kind of a node, used in conflict and codec diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A terminal translation value.
    Leaf,
    /// An internal node holding named children.
    Branch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => write!(f, "leaf"),
            Self::Branch => write!(f, "branch"),
        }
    }
}

/// A node in a translation tree: a terminal string or a branch of children.
///
/// Branch keys are unique by construction (`BTreeMap`) and kept in sorted
/// order, which makes serialized output stable. Trees are plain owned values;
/// transformations produce new trees rather than mutating shared state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranslationNode {
    /// A terminal translation value (a display string).
    Leaf(String),
    /// An internal node mapping key segments to child nodes.
    Branch(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    /// Create a leaf from any string-like value.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Create an empty branch.
    pub fn branch() -> Self {
        Self::Branch(BTreeMap::new())
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Leaf(_) => NodeKind::Leaf,
            Self::Branch(_) => NodeKind::Branch,
        }
    }

    /// Returns `true` if this is a branch with no children.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Branch(children) if children.is_empty())
    }

    /// Replace a leaf with an empty branch if needed and return the branch's
    /// children for descent.
    pub fn make_branch(&mut self) -> &mut BTreeMap<String, TranslationNode> {
        if !matches!(self, Self::Branch(_)) {
            *self = Self::Branch(BTreeMap::new());
        }
        match self {
            Self::Branch(children) => children,
            Self::Leaf(_) => unreachable!(),
        }
    }

    /// Look up the node addressed by `path`, if any.
    pub fn get(&self, path: &KeyPath) -> Option<&TranslationNode> {
        let mut current = self;
        for segment in path.segments() {
            match current {
                Self::Branch(children) => current = children.get(segment)?,
                Self::Leaf(_) => return None,
            }
        }
        Some(current)
    }

    /// Number of leaves in the subtree rooted here.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(children) => children.values().map(Self::leaf_count).sum(),
        }
    }

    /// Flatten the subtree into `(dotted key, leaf text)` pairs.
    ///
    /// Pairs come out in depth-first key order, so the result is
    /// deterministic for a given tree. A root leaf flattens to a single pair
    /// with an empty key.
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, prefix: String, out: &mut Vec<(String, &'a str)>) {
        match self {
            Self::Leaf(text) => out.push((prefix, text)),
            Self::Branch(children) => {
                for (key, child) in children {
                    let child_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    child.flatten_into(child_prefix, out);
                }
            }
        }
    }
}

// Leaves serialize as strings and branches as objects, matching the JSON
// documents the normalizer consumes and produces.
impl Serialize for TranslationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(text) => serializer.serialize_str(text),
            Self::Branch(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
        }
    }
}
