//! The merge operation: apply assignments to a tree under a conflict policy.
//!
//! Assignments apply in the order supplied; later assignments observe the
//! mutations of earlier ones (sequential last-write-wins). The input tree is
//! never mutated — the merge works on a scratch copy and either returns it or
//! discards it, so a rejected merge leaves the caller's tree untouched.

use std::collections::BTreeMap;

use tracing::debug;
use ttn_tree::{KeyPath, NodeKind, TranslationNode};

use crate::assignment::Assignment;
use crate::conflict::{ConflictReport, Resolution};
use crate::error::{MergeError, MergeResult};
use crate::policy::ConflictPolicy;

/// Merge `assignments` into `tree` under `policy`.
///
/// Returns the new tree and a report of every conflict encountered, under
/// every policy. Under [`ConflictPolicy::Reject`] any conflict aborts the
/// whole merge: the error carries the full report and the input tree is
/// returned unchanged to the caller (nothing partial is ever observable).
///
/// Deterministic: identical inputs always produce an identical tree and
/// report.
pub fn merge(
    tree: &TranslationNode,
    assignments: &[Assignment],
    policy: ConflictPolicy,
) -> MergeResult<(TranslationNode, ConflictReport)> {
    let mut scratch = tree.clone();
    let mut report = ConflictReport::new();

    for assignment in assignments {
        apply_assignment(&mut scratch, assignment, policy, &mut report);
    }

    if policy == ConflictPolicy::Reject && !report.is_empty() {
        return Err(MergeError::Conflict(report));
    }
    Ok((scratch, report))
}

/// What the policy authorizes for a conflict requesting `requested`.
fn resolve(policy: ConflictPolicy, requested: NodeKind) -> Resolution {
    match (policy, requested) {
        (ConflictPolicy::Reject, _) => Resolution::Rejected,
        (ConflictPolicy::PreferExisting, _) => Resolution::KeptExisting,
        (ConflictPolicy::OverwriteWithBranch, NodeKind::Branch) => Resolution::OverwroteWithBranch,
        (ConflictPolicy::OverwriteWithLeaf, NodeKind::Leaf) => Resolution::OverwroteWithLeaf,
        // An overwrite policy never overwrites with the opposite kind.
        (ConflictPolicy::OverwriteWithBranch, NodeKind::Leaf)
        | (ConflictPolicy::OverwriteWithLeaf, NodeKind::Branch) => Resolution::Rejected,
    }
}

fn record_conflict(
    report: &mut ConflictReport,
    path: KeyPath,
    found: NodeKind,
    requested: NodeKind,
    resolution: Resolution,
) {
    debug!(%path, %found, %requested, %resolution, "merge conflict");
    report.record(path, found, requested, resolution);
}

fn apply_assignment(
    root: &mut TranslationNode,
    assignment: &Assignment,
    policy: ConflictPolicy,
    report: &mut ConflictReport,
) {
    // A leaf root cannot hold children at all. Treat it like a mid-path leaf:
    // only `overwriteWithBranch` may clear the way.
    if matches!(root, TranslationNode::Leaf(_)) {
        let resolution = resolve(policy, NodeKind::Branch);
        record_conflict(
            report,
            assignment.path.clone(),
            NodeKind::Leaf,
            NodeKind::Branch,
            resolution,
        );
        if resolution != Resolution::OverwroteWithBranch {
            return;
        }
    }

    apply_to_branch(root.make_branch(), assignment, policy, report);
}

fn apply_to_branch(
    children: &mut BTreeMap<String, TranslationNode>,
    assignment: &Assignment,
    policy: ConflictPolicy,
    report: &mut ConflictReport,
) {
    let segments = assignment.path.segments();
    let mut current = children;

    // Descend through every non-final segment, creating branches as needed.
    for depth in 0..segments.len() - 1 {
        let node = current
            .entry(segments[depth].clone())
            .or_insert_with(TranslationNode::branch);

        if matches!(node, TranslationNode::Leaf(_)) {
            let here = assignment
                .path
                .prefix(depth + 1)
                .unwrap_or_else(|| assignment.path.clone());
            let resolution = resolve(policy, NodeKind::Branch);
            record_conflict(report, here, NodeKind::Leaf, NodeKind::Branch, resolution);
            if resolution != Resolution::OverwroteWithBranch {
                // Assignment skipped; the existing leaf and everything else stay.
                return;
            }
        }

        // Either already a branch, or a leaf the policy just authorized replacing.
        current = node.make_branch();
    }

    let last = assignment.path.last();
    match current.get_mut(last) {
        None => {
            current.insert(last.to_string(), assignment.value.clone());
        }
        Some(existing) => {
            merge_nodes(existing, &assignment.value, &assignment.path, policy, report);
        }
    }
}

/// Merge `incoming` into `existing` at `path`.
///
/// Same-kind leaves are a value overwrite, not a conflict; `preferExisting`
/// keeps the old text, every other policy takes the new one. Same-kind
/// branches merge recursively. A kind mismatch goes through the policy table.
fn merge_nodes(
    existing: &mut TranslationNode,
    incoming: &TranslationNode,
    path: &KeyPath,
    policy: ConflictPolicy,
    report: &mut ConflictReport,
) {
    match (existing.kind(), incoming.kind()) {
        (NodeKind::Leaf, NodeKind::Leaf) => {
            if policy != ConflictPolicy::PreferExisting {
                *existing = incoming.clone();
            }
        }
        (NodeKind::Branch, NodeKind::Branch) => {
            if let (TranslationNode::Branch(old), TranslationNode::Branch(new)) =
                (existing, incoming)
            {
                merge_branches(old, new, path, policy, report);
            }
        }
        (found, requested) => {
            let resolution = resolve(policy, requested);
            record_conflict(report, path.clone(), found, requested, resolution);
            if matches!(
                resolution,
                Resolution::OverwroteWithBranch | Resolution::OverwroteWithLeaf
            ) {
                *existing = incoming.clone();
            }
        }
    }
}

fn merge_branches(
    existing: &mut BTreeMap<String, TranslationNode>,
    incoming: &BTreeMap<String, TranslationNode>,
    path: &KeyPath,
    policy: ConflictPolicy,
    report: &mut ConflictReport,
) {
    for (key, value) in incoming {
        // Branch keys are valid segments by construction.
        let child_path = path.child(key).unwrap_or_else(|_| path.clone());
        match existing.get_mut(key) {
            None => {
                existing.insert(key.clone(), value.clone());
            }
            Some(node) => merge_nodes(node, value, &child_path, policy, report),
        }
    }
}
