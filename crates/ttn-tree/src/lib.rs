//! Foundation types for the translation tree normalizer (TTN).
//!
//! This crate provides the core value types used throughout the TTN system.
//! Every other TTN crate depends on `ttn-tree`.
//!
//! # Key Types
//!
//! - [`TranslationNode`] — Recursive sum type: a leaf string or a branch of named children
//! - [`NodeKind`] — The two node kinds, used in conflict and codec diagnostics
//! - [`KeyPath`] — Validated dotted path addressing a node in a tree
//! - [`PathError`] — Rejection reasons for malformed path strings

pub mod error;
pub mod node;
pub mod path;

pub use error::PathError;
pub use node::{NodeKind, TranslationNode};
pub use path::{KeyPath, SEPARATOR};
