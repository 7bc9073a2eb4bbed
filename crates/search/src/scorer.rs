//! Partition scoring against one target document
//!
//! Every candidate partition from segmentation is scored with weighted
//! TF-IDF: the entity sub-score at full weight plus the token sub-score at
//! [`TOKEN_WEIGHT`]. Only the single best partition survives; ranking
//! across documents is out of scope.

use crate::index::{tf_idf, FrequencyIndex, TermKind};
use crate::segment::QueryPartition;
use lexent_core::{DocId, Error, Result};
use serde::{Deserialize, Serialize};

/// Weight applied to the token sub-score relative to the entity sub-score
pub const TOKEN_WEIGHT: f64 = 0.4;

// ============================================================================
// PartitionScore
// ============================================================================

/// Per-partition scoring breakdown
///
/// Exposes the token and entity sub-scores alongside the weighted total,
/// so callers can inspect how a partition earned its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionScore {
    /// Sum of token TF-IDF contributions (unweighted)
    pub token_score: f64,
    /// Sum of entity TF-IDF contributions
    pub entity_score: f64,
    /// `entity_score + TOKEN_WEIGHT * token_score`
    pub total: f64,
}

/// The winning partition with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPartition {
    /// The weighted total (equals `breakdown.total`)
    pub score: f64,
    /// Sub-score breakdown
    pub breakdown: PartitionScore,
    /// The partition that earned the score
    pub partition: QueryPartition,
}

// ============================================================================
// Scoring
// ============================================================================

/// Score one partition against one document
///
/// Tokens and entities absent from their respective frequency tables
/// contribute nothing. Pure: reads the index, writes nowhere.
pub fn score_partition(
    index: &FrequencyIndex,
    partition: &QueryPartition,
    doc_id: &DocId,
) -> PartitionScore {
    let mut token_score = 0.0;
    for token in &partition.tokens {
        if let Some(idf) = index.token_idf(token) {
            token_score += tf_idf(index.token_count(token, doc_id), idf, TermKind::Token);
        }
    }

    let mut entity_score = 0.0;
    for entity in &partition.entities {
        if let Some(idf) = index.entity_idf(entity) {
            entity_score += tf_idf(index.entity_count(entity, doc_id), idf, TermKind::Entity);
        }
    }

    PartitionScore {
        token_score,
        entity_score,
        total: entity_score + TOKEN_WEIGHT * token_score,
    }
}

/// Pick the highest-scoring partition for a document
///
/// The comparison is strict, starting from zero: the first partition to
/// reach the maximal positive total wins, and later ties do not replace
/// it.
///
/// # Errors
///
/// - [`Error::UnknownDocumentId`] if `doc_id` was not in the indexed
///   collection.
/// - [`Error::NoScorablePartition`] if no partition scores above zero,
///   the expected outcome when the document shares no terms with the
///   query.
pub fn best_partition(
    partitions: &[QueryPartition],
    index: &FrequencyIndex,
    doc_id: &DocId,
) -> Result<ScoredPartition> {
    if !index.contains_doc(doc_id) {
        return Err(Error::UnknownDocumentId(doc_id.clone()));
    }

    let mut best: Option<ScoredPartition> = None;
    let mut best_score = 0.0;

    for partition in partitions {
        let breakdown = score_partition(index, partition, doc_id);

        tracing::debug!(
            target: "lexent::search",
            doc = %doc_id,
            token_score = breakdown.token_score,
            entity_score = breakdown.entity_score,
            total = breakdown.total,
            entities = ?partition.entities,
            "partition scored"
        );

        if breakdown.total > best_score {
            best_score = breakdown.total;
            best = Some(ScoredPartition {
                score: breakdown.total,
                breakdown,
                partition: partition.clone(),
            });
        }
    }

    best.ok_or(Error::NoScorablePartition)
}

// ============================================================================
// Tests
// ============================================================================
