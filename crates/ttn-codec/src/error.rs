//! Error types for the codec crate.

use ttn_tree::{KeyPath, NodeKind, PathError};

/// Errors that can occur while decoding a translation document.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The document is not syntactically valid JSON, or a value is neither a
    /// string nor an object.
    #[error("malformed input: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The top-level value must be an object (a branch root).
    #[error("top-level value must be an object")]
    RootNotObject,

    /// A document key is not a valid dotted path.
    #[error("invalid key `{key}`: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: PathError,
    },

    /// One path carries two values in the source document. The document is
    /// corrupt; the codec reports it rather than picking a winner.
    #[error("ambiguous node at `{path}`: found both {first} and {second}")]
    AmbiguousNode {
        path: KeyPath,
        first: NodeKind,
        second: NodeKind,
    },
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
