//! Entity-aware lexical search for lexent
//!
//! This crate provides:
//! - FrequencyIndex: token/entity frequency tables and IDF weights, built
//!   once per corpus
//! - Query segmentation: enumeration of entity-subset partitions of a
//!   query against a known entity vocabulary
//! - Partition scoring: weighted TF-IDF against one target document
//!
//! # Usage
//!
//! ```ignore
//! use lexent_search::{best_partition, segment, FrequencyIndex};
//!
//! let index = FrequencyIndex::build(&documents, &annotator)?;
//! let partitions = segment("Barack Obama visited Paris", &vocabulary);
//! let best = best_partition(&partitions, &index, &doc_id)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod scorer;
pub mod segment;
pub mod tokenizer;

// Re-export commonly used items
pub use index::{idf_weight, tf_idf, FrequencyIndex, FrequencyTable, TermKind};
pub use scorer::{best_partition, score_partition, PartitionScore, ScoredPartition, TOKEN_WEIGHT};
pub use segment::{
    find_matching_entities, match_entity_ordered, remove_first_occurrences, segment,
    QueryPartition,
};
pub use tokenizer::tokenize_by_spaces;
