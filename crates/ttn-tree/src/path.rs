//! Dotted key paths addressing nodes in a translation tree.
//!
//! A [`KeyPath`] is a validated, ordered, non-empty sequence of non-empty
//! segments. Parsing rejects the malformed shapes the ad-hoc scripts this
//! system replaces used to produce: empty paths, leading/trailing separators,
//! and consecutive separators.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::PathError;

/// The path separator character.
pub const SEPARATOR: char = '.';

/// A validated dotted path (e.g. `adminBookings.status.confirmed`).
///
/// Invariants: at least one segment; every segment is non-empty and contains
/// no separator. Construction goes through [`KeyPath::parse`] or
/// [`KeyPath::from_segments`], both of which enforce this.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Parse a dotted path string.
    ///
    /// Fails when the input is empty, starts or ends with the separator, or
    /// contains consecutive separators.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }
        if text.starts_with(SEPARATOR) {
            return Err(PathError::LeadingSeparator(text.to_string()));
        }
        if text.ends_with(SEPARATOR) {
            return Err(PathError::TrailingSeparator(text.to_string()));
        }
        let mut segments = Vec::new();
        for (index, segment) in text.split(SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    text: text.to_string(),
                    index,
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }

    /// Build a path from pre-split segments.
    ///
    /// Fails if no segment is supplied, a segment is empty, or a segment
    /// contains the separator.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Vec::new();
        for segment in segments {
            let segment = segment.into();
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    text: String::new(),
                    index: out.len(),
                });
            }
            if segment.contains(SEPARATOR) {
                return Err(PathError::SeparatorInSegment(segment));
            }
            out.push(segment);
        }
        if out.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(out))
    }

    /// The path's segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments. Never zero: a path always has at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first segment.
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    /// The final segment (the key the path ultimately addresses).
    pub fn last(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// The prefix of this path covering the first `len` segments.
    ///
    /// Returns `None` when `len` is zero or exceeds the path length.
    pub fn prefix(&self, len: usize) -> Option<Self> {
        if len == 0 || len > self.0.len() {
            return None;
        }
        Some(Self(self.0[..len].to_vec()))
    }

    /// Extend this path with one more segment.
    pub fn child(&self, segment: &str) -> Result<Self, PathError> {
        let mut segments = self.0.clone();
        if segment.is_empty() {
            return Err(PathError::EmptySegment {
                text: self.to_string(),
                index: segments.len(),
            });
        }
        if segment.contains(SEPARATOR) {
            return Err(PathError::SeparatorInSegment(segment.to_string()));
        }
        segments.push(segment.to_string());
        Ok(Self(segments))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Paths serialize as their dotted form; conflict reports stay readable as JSON.
impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
