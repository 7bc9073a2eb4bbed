//! Core types for the lexent search engine
//!
//! This crate defines the foundational types shared across the workspace:
//! - DocId: opaque document identifier
//! - Annotator: the pluggable annotation contract (tokens + entity mentions)
//! - Error/Result: error types for indexing and scoring

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotate;
pub mod error;
pub mod types;

pub use annotate::{AnnotatedDocument, AnnotatedToken, Annotator};
pub use error::{Error, Result};
pub use types::DocId;
