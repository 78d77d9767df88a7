//! Conflict policies: what a merge may do when node kinds disagree.

use std::fmt;

use serde::Serialize;

/// How a merge resolves a leaf-vs-branch kind conflict.
///
/// An overwrite policy only authorizes overwriting with the kind it names:
/// `OverwriteWithBranch` may turn a leaf into a branch but never a branch
/// into a leaf, and symmetrically for `OverwriteWithLeaf`. A conflict the
/// policy does not authorize rejects that assignment alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictPolicy {
    /// Abort the whole merge if any conflict occurs; the input tree is
    /// returned untouched via the error path.
    Reject,
    /// Replace a conflicting leaf with a branch and continue.
    OverwriteWithBranch,
    /// Replace a conflicting branch with a leaf and continue.
    OverwriteWithLeaf,
    /// Keep whatever already exists; skip the conflicting assignment.
    PreferExisting,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::OverwriteWithBranch => write!(f, "overwriteWithBranch"),
            Self::OverwriteWithLeaf => write!(f, "overwriteWithLeaf"),
            Self::PreferExisting => write!(f, "preferExisting"),
        }
    }
}
