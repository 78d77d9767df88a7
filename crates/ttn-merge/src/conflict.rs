//! Conflict reporting: every kind disagreement a merge encountered.
//!
//! Entries are recorded under every policy, not just `Reject`, so callers can
//! always audit what was overwritten or skipped. Nothing is silently dropped.

use std::fmt;

use serde::Serialize;
use ttn_tree::{KeyPath, NodeKind};

/// What the merge actually did about a conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
    /// The assignment was not applied (policy `reject`, or an overwrite
    /// policy that does not authorize the requested kind).
    Rejected,
    /// The existing leaf was replaced with a branch.
    OverwroteWithBranch,
    /// The existing branch was replaced with a leaf.
    OverwroteWithLeaf,
    /// The existing node was kept and the assignment skipped.
    KeptExisting,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "rejected"),
            Self::OverwroteWithBranch => write!(f, "overwroteWithBranch"),
            Self::OverwroteWithLeaf => write!(f, "overwroteWithLeaf"),
            Self::KeptExisting => write!(f, "keptExisting"),
        }
    }
}

/// A single kind conflict: where it happened, what was there, what the
/// assignment wanted, and how the policy resolved it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    /// The path of the conflicting node.
    pub path: KeyPath,
    /// The kind already present in the tree.
    pub found: NodeKind,
    /// The kind the assignment required.
    pub requested: NodeKind,
    /// What the policy decided.
    pub resolution: Resolution,
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at `{}`: found {}, requested {} ({})",
            self.path, self.found, self.requested, self.resolution
        )
    }
}

/// The aggregate of all conflicts from one merge call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    /// Conflicts in the order they were encountered.
    pub entries: Vec<ConflictEntry>,
}

impl ConflictReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no conflicts occurred.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of conflicts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of conflicts that ended in rejection.
    pub fn rejections(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.resolution == Resolution::Rejected)
            .count()
    }

    /// Number of conflicts resolved by overwriting the existing node.
    pub fn overwrites(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.resolution,
                    Resolution::OverwroteWithBranch | Resolution::OverwroteWithLeaf
                )
            })
            .count()
    }

    pub(crate) fn record(
        &mut self,
        path: KeyPath,
        found: NodeKind,
        requested: NodeKind,
        resolution: Resolution,
    ) {
        self.entries.push(ConflictEntry {
            path,
            found,
            requested,
            resolution,
        });
    }
}
