//! Frequency index construction and TF-IDF weighting
//!
//! This module provides:
//! - FrequencyTable: term → (document → count) occurrence tables
//! - FrequencyIndex: token/entity tables plus IDF weights, built once per
//!   corpus and immutable afterward
//! - tf_idf: the weighting formula applied at scoring time
//!
//! Index construction resolves overlap between a token occurrence and an
//! entity mention with the same surface text: the conflicting token credit
//! is retracted before the entity credit is recorded, so a span recognized
//! as an entity is never double-counted as a generic token.

use lexent_core::{Annotator, DocId, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ============================================================================
// TermKind
// ============================================================================

/// Discriminates token terms from entity terms in the weighting formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermKind {
    /// A plain single-word term
    Token,
    /// A (possibly multi-word) entity term
    Entity,
}

// ============================================================================
// Weighting
// ============================================================================

/// IDF weight for a term
///
/// `idf = 1 + ln(total_docs / (1 + containing_docs))`, natural log.
/// For fixed `total_docs` the weight strictly decreases as more documents
/// contain the term.
pub fn idf_weight(total_docs: usize, containing_docs: usize) -> f64 {
    1.0 + (total_docs as f64 / (1.0 + containing_docs as f64)).ln()
}

/// TF-IDF contribution of one term occurrence count
///
/// Returns 0 for a zero count. Tokens get the sublinear dampening
/// `1 + ln(x)` applied twice (once to the raw count, once more inside the
/// final product); entities get it once. The asymmetry is intentional
/// behavior of the scoring model and must not be collapsed.
pub fn tf_idf(raw_count: u32, idf: f64, kind: TermKind) -> f64 {
    if raw_count == 0 {
        return 0.0;
    }
    let mut tf = f64::from(raw_count);
    if kind == TermKind::Token {
        tf = 1.0 + tf.ln();
    }
    (1.0 + tf.ln()) * idf
}

// ============================================================================
// FrequencyTable
// ============================================================================

/// Occurrence counts per term per document
///
/// Nested mapping `term → (document → positive count)`. Reads go through
/// accessors that return zero for absent keys; no entry is ever created as
/// a side effect of a read. Empty per-document maps are pruned on
/// retraction, so every stored count is strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: HashMap<String, HashMap<DocId, u32>>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `term` in `doc`
    pub fn increment(&mut self, term: &str, doc: &DocId) {
        *self
            .counts
            .entry(term.to_string())
            .or_default()
            .entry(doc.clone())
            .or_insert(0) += 1;
    }

    /// Retract one occurrence of `term` in `doc`, if any is recorded
    ///
    /// Decrements the (term, doc) count; removes the entry when it reaches
    /// zero, and removes the term entirely once no documents remain.
    /// Returns true if a count was retracted.
    pub fn retract(&mut self, term: &str, doc: &DocId) -> bool {
        let Some(per_doc) = self.counts.get_mut(term) else {
            return false;
        };
        let Some(count) = per_doc.get_mut(doc) else {
            return false;
        };

        *count -= 1;
        if *count == 0 {
            per_doc.remove(doc);
        }
        if per_doc.is_empty() {
            self.counts.remove(term);
        }
        true
    }

    /// Occurrence count of `term` in `doc` (zero when absent)
    pub fn count(&self, term: &str, doc: &DocId) -> u32 {
        self.counts
            .get(term)
            .and_then(|per_doc| per_doc.get(doc))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `term`
    pub fn doc_freq(&self, term: &str) -> usize {
        self.counts.get(term).map(|per_doc| per_doc.len()).unwrap_or(0)
    }

    /// Whether `term` appears in any document
    pub fn contains_term(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// All terms in the table
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table holds no terms
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Drop terms whose per-document map is empty
    ///
    /// Retraction already prunes as it goes; this final pass enforces the
    /// table invariant even if an empty map slips through.
    fn prune_empty(&mut self) {
        self.counts.retain(|_, per_doc| !per_doc.is_empty());
    }
}

// ============================================================================
// FrequencyIndex
// ============================================================================

/// Token/entity frequency tables with IDF weights for one corpus
///
/// Built once via [`FrequencyIndex::build`] and read-only thereafter. All
/// query-time operations take `&self`, so an index can be shared across
/// threads for parallel scoring without locks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyIndex {
    tf_tokens: FrequencyTable,
    tf_entities: FrequencyTable,
    idf_tokens: HashMap<String, f64>,
    idf_entities: HashMap<String, f64>,
    doc_ids: BTreeSet<DocId>,
    total_docs: usize,
}

impl FrequencyIndex {
    /// Build the index over a document collection
    ///
    /// Each document is run through the annotator. Content tokens (neither
    /// stop word nor punctuation) are counted into the token table; entity
    /// mentions are counted into the entity table, first retracting any
    /// same-surface token credit recorded for the same document. IDF
    /// weights are computed for every surviving term once all documents
    /// are processed.
    ///
    /// # Errors
    ///
    /// Propagates the first annotation failure; no partial index is
    /// returned.
    pub fn build<A>(documents: &BTreeMap<DocId, String>, annotator: &A) -> Result<Self>
    where
        A: Annotator + ?Sized,
    {
        let total_docs = documents.len();
        let mut tf_tokens = FrequencyTable::new();
        let mut tf_entities = FrequencyTable::new();
        let mut doc_ids = BTreeSet::new();

        for (doc_id, text) in documents {
            let annotated = annotator.annotate(text)?;
            doc_ids.insert(doc_id.clone());

            for token in &annotated.tokens {
                if token.is_content() {
                    tf_tokens.increment(&token.text, doc_id);
                }
            }

            for mention in &annotated.entity_mentions {
                // A span recognized as an entity must not keep its credit
                // as a plain token for the same document.
                tf_tokens.retract(mention, doc_id);
                tf_entities.increment(mention, doc_id);
            }
        }

        tf_tokens.prune_empty();

        let idf_tokens = tf_tokens
            .terms()
            .map(|term| {
                let idf = idf_weight(total_docs, tf_tokens.doc_freq(term));
                (term.to_string(), idf)
            })
            .collect();
        let idf_entities = tf_entities
            .terms()
            .map(|term| {
                let idf = idf_weight(total_docs, tf_entities.doc_freq(term));
                (term.to_string(), idf)
            })
            .collect();

        let index = FrequencyIndex {
            tf_tokens,
            tf_entities,
            idf_tokens,
            idf_entities,
            doc_ids,
            total_docs,
        };

        tracing::info!(
            target: "lexent::search",
            docs = index.total_docs,
            token_terms = index.tf_tokens.len(),
            entity_terms = index.tf_entities.len(),
            "frequency index built"
        );

        Ok(index)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Total number of indexed documents
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Whether `doc_id` was part of the indexed collection
    ///
    /// True even for documents whose every token was retracted or
    /// filtered; presence in the input collection is what counts.
    pub fn contains_doc(&self, doc_id: &DocId) -> bool {
        self.doc_ids.contains(doc_id)
    }

    /// Raw occurrence count of a token in a document (zero when absent)
    pub fn token_count(&self, term: &str, doc_id: &DocId) -> u32 {
        self.tf_tokens.count(term, doc_id)
    }

    /// Raw occurrence count of an entity in a document (zero when absent)
    pub fn entity_count(&self, term: &str, doc_id: &DocId) -> u32 {
        self.tf_entities.count(term, doc_id)
    }

    /// Number of documents containing a token
    pub fn token_doc_freq(&self, term: &str) -> usize {
        self.tf_tokens.doc_freq(term)
    }

    /// Number of documents containing an entity
    pub fn entity_doc_freq(&self, term: &str) -> usize {
        self.tf_entities.doc_freq(term)
    }

    /// IDF weight of a token, if the token survived indexing
    pub fn token_idf(&self, term: &str) -> Option<f64> {
        self.idf_tokens.get(term).copied()
    }

    /// IDF weight of an entity, if the entity was ever mentioned
    pub fn entity_idf(&self, term: &str) -> Option<f64> {
        self.idf_entities.get(term).copied()
    }

    /// All token terms in the index
    pub fn token_terms(&self) -> impl Iterator<Item = &str> {
        self.tf_tokens.terms()
    }

    /// All entity terms in the index
    pub fn entity_terms(&self) -> impl Iterator<Item = &str> {
        self.tf_entities.terms()
    }
}

// ============================================================================
// Tests
// ============================================================================
