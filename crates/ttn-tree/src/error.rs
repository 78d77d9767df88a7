//! Error types for path parsing and validation.

/// Errors produced when parsing a dotted path string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("empty path")]
    Empty,

    /// The path started with the separator (e.g. `.foo`).
    #[error("path `{0}` starts with a separator")]
    LeadingSeparator(String),

    /// The path ended with the separator (e.g. `foo.`).
    #[error("path `{0}` ends with a separator")]
    TrailingSeparator(String),

    /// Consecutive separators produced an empty segment (e.g. `foo..bar`).
    #[error("path `{text}` has an empty segment at position {index}")]
    EmptySegment { text: String, index: usize },

    /// A segment supplied directly (not via parsing) contained the separator.
    #[error("segment `{0}` contains the separator")]
    SeparatorInSegment(String),
}
