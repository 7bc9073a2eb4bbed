//! Annotation contract for document ingestion
//!
//! This module defines the boundary between the core and whatever NLP
//! pipeline produces token tags and entity mentions:
//! - AnnotatedToken: one token with stop-word/punctuation flags
//! - AnnotatedDocument: the ephemeral annotated view of one document
//! - Annotator: the pluggable annotation trait
//!
//! Tokenization, stop-word classification, and named-entity recognition
//! all live behind the `Annotator` trait; the indexer only consumes its
//! output.

use crate::error::Result;
use serde::{Deserialize, Serialize};

// ============================================================================
// AnnotatedToken
// ============================================================================

/// A single token produced by the annotation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Literal token text
    pub text: String,
    /// True if the token is a stop word
    pub is_stopword: bool,
    /// True if the token is punctuation
    pub is_punctuation: bool,
}

impl AnnotatedToken {
    /// Create a plain content token (not a stop word, not punctuation)
    pub fn word(text: impl Into<String>) -> Self {
        AnnotatedToken {
            text: text.into(),
            is_stopword: false,
            is_punctuation: false,
        }
    }

    /// Create a stop-word token
    pub fn stopword(text: impl Into<String>) -> Self {
        AnnotatedToken {
            text: text.into(),
            is_stopword: true,
            is_punctuation: false,
        }
    }

    /// Create a punctuation token
    pub fn punctuation(text: impl Into<String>) -> Self {
        AnnotatedToken {
            text: text.into(),
            is_stopword: false,
            is_punctuation: true,
        }
    }

    /// True if the token carries indexable content
    pub fn is_content(&self) -> bool {
        !self.is_stopword && !self.is_punctuation
    }
}

// ============================================================================
// AnnotatedDocument
// ============================================================================

/// Annotated view of one document's text
///
/// This is an ephemeral value created during index construction, not
/// stored. Entity mentions are literal substrings of the original text,
/// reconstructable as space-joined token sequences; a mention may contain
/// internal spaces (multi-word entities).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Tokens in document order
    pub tokens: Vec<AnnotatedToken>,
    /// Recognized entity mention strings, in document order
    pub entity_mentions: Vec<String>,
}

impl AnnotatedDocument {
    /// Create a new annotated document
    pub fn new(tokens: Vec<AnnotatedToken>, entity_mentions: Vec<String>) -> Self {
        AnnotatedDocument {
            tokens,
            entity_mentions,
        }
    }
}

// ============================================================================
// Annotator Trait
// ============================================================================

/// Pluggable annotation interface
///
/// Implementations wrap an NLP pipeline (tokenizer + tagger + NER) and
/// turn raw text into an [`AnnotatedDocument`]. Failures surface as
/// [`crate::Error::AnnotationFailed`] and abort index construction for the
/// affected document.
pub trait Annotator {
    /// Annotate raw document text
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument>;
}
