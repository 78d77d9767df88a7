//! Merge engine for the translation tree normalizer.
//!
//! Applies dotted-path assignments to a translation tree under an explicit
//! conflict policy, producing a new tree plus a full audit of every
//! leaf-vs-branch disagreement encountered along the way.
//!
//! # Key Types
//!
//! - [`Assignment`] — A dotted path plus the leaf or branch to place there
//! - [`ConflictPolicy`] — How leaf-vs-branch disagreements are resolved
//! - [`ConflictReport`] / [`ConflictEntry`] — What was found, requested, and done
//! - [`merge`] — The merge operation itself

pub mod assignment;
pub mod conflict;
pub mod error;
pub mod merge;
pub mod policy;

pub use assignment::Assignment;
pub use conflict::{ConflictEntry, ConflictReport, Resolution};
pub use error::{MergeError, MergeResult};
pub use merge::merge;
pub use policy::ConflictPolicy;
