//! Codec for translation documents.
//!
//! Deserialization is strict: every document key is parsed as a dotted path
//! (the "flat" access pattern) and expanded into the tree, so a flat key and
//! a nested object that address the same node collide visibly instead of one
//! silently overwriting the other. Duplicate keys — the corrupted-source
//! failure mode the old scripts kept producing — are detected before JSON map
//! collapse can hide them.
//!
//! Serialization is canonical: identical trees produce byte-identical output.
//!
//! # Key Functions
//!
//! - [`deserialize`] — Parse a JSON document into a [`ttn_tree::TranslationNode`]
//! - [`serialize`] — Emit the canonical JSON form of a tree

pub mod de;
pub mod error;
pub mod ser;

pub use de::deserialize;
pub use error::{CodecError, CodecResult};
pub use ser::serialize;
