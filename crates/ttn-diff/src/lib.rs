//! Diff engine for translation trees.
//!
//! Compares two stores key by key, reporting keys present in one and absent
//! in the other, leaves whose text changed, and paths whose node kind flipped
//! between flat and nested. The usual use is finding untranslated keys
//! between two locales.
//!
//! # Key Types
//!
//! - [`TreeDiff`] / [`TreeChange`] — The change set between two trees
//! - [`diff_trees`] — The comparison itself

pub mod diff;

pub use diff::{diff_trees, TreeChange, TreeDiff};
