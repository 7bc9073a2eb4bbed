//! Core types for lexent
//!
//! This module defines the foundational types:
//! - DocId: opaque document identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a document in the corpus
///
/// A DocId is a wrapper around a caller-defined string key. The engine
/// treats it as opaque: identifiers are compared for equality and used as
/// map keys, never parsed or interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(String);

impl DocId {
    /// Create a DocId from any string-like key
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
