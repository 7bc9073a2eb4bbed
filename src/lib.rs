//! Lexent - entity-aware lexical search
//!
//! Lexent builds token/entity frequency tables with IDF weights over a
//! document collection and, given a free-text query plus a vocabulary of
//! known (possibly multi-word) entities, finds the reading of the query
//! (which spans are entities, which are plain tokens) that maximizes a
//! weighted TF-IDF score against a target document.
//!
//! # Quick Start
//!
//! ```ignore
//! use lexent::{best_partition, segment, FrequencyIndex};
//!
//! // Build the index once per corpus
//! let index = FrequencyIndex::build(&documents, &annotator)?;
//!
//! // Per query: enumerate candidate readings, then score one document
//! let partitions = segment("Barack Obama visited Paris", &vocabulary);
//! let best = best_partition(&partitions, &index, &doc_id)?;
//! println!("{} via {:?}", best.score, best.partition.entities);
//! ```
//!
//! # Architecture
//!
//! Tokenization, stop-word tagging, and entity recognition live behind the
//! [`Annotator`] trait; the core consumes its output and is otherwise pure
//! computation over immutable tables.

// Re-export the public API
pub use lexent_core::{AnnotatedDocument, AnnotatedToken, Annotator, DocId, Error, Result};
pub use lexent_search::{
    best_partition, find_matching_entities, idf_weight, match_entity_ordered,
    remove_first_occurrences, score_partition, segment, tf_idf, tokenize_by_spaces,
    FrequencyIndex, FrequencyTable, PartitionScore, QueryPartition, ScoredPartition, TermKind,
    TOKEN_WEIGHT,
};
