//! Error types for lexent
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use crate::types::DocId;
use thiserror::Error;

/// Result type alias for lexent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the lexent search engine
#[derive(Debug, Error)]
pub enum Error {
    /// The annotation service could not process a document's text.
    /// Fatal to index construction for that document; the caller decides
    /// whether to skip it or abort the whole build.
    #[error("annotation failed: {0}")]
    AnnotationFailed(String),

    /// Scoring was requested against a document id absent from the index
    #[error("unknown document id: {0}")]
    UnknownDocumentId(DocId),

    /// Every candidate partition scored exactly zero against the target
    /// document. A defined, expected outcome for irrelevant documents.
    #[error("no partition scored above zero for the target document")]
    NoScorablePartition,
}
