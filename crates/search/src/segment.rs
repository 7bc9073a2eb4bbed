//! Query segmentation against an entity vocabulary
//!
//! Given a raw query and a vocabulary of (possibly multi-word) entities,
//! [`segment`] enumerates every valid way to read the query as a subset of
//! non-overlapping, order-preserving entity mentions plus leftover tokens.
//! Entity matching is subsequence matching: an entity's component tokens
//! must appear in the query in order, with arbitrary tokens allowed in
//! between.
//!
//! Enumeration is exponential in the number of entities that match the
//! query. That is acceptable by design: per-query vocabularies are tens of
//! entries, and two mitigations keep the tree small in practice: the
//! vocabulary is narrowed to matching entities before each expansion, and
//! partitions are deduplicated on entity-set equality.

use crate::tokenizer::tokenize_by_spaces;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// QueryPartition
// ============================================================================

/// One way of segmenting a query
///
/// `entities` is the chosen subset of the vocabulary; `tokens` is the
/// ordered list of query tokens left over after removing every chosen
/// entity's component tokens. Partitions are per-query values; they hold
/// no cross-query state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPartition {
    /// Entities consumed from the query
    pub entities: BTreeSet<String>,
    /// Leftover query tokens, in query order
    pub tokens: Vec<String>,
}

impl QueryPartition {
    /// The baseline partition: no entities recognized, every token kept
    pub fn baseline(query: &str) -> Self {
        QueryPartition {
            entities: BTreeSet::new(),
            tokens: tokenize_by_spaces(query),
        }
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Remove each entity's component tokens from the query, first match wins
///
/// For every entity, its space-separated components are processed left to
/// right; each deletes the first remaining equal token from the working
/// token list. Components with no remaining occurrence are skipped.
/// Returns the leftover tokens in query order.
pub fn remove_first_occurrences<'a, I>(entities: I, query: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tokens = tokenize_by_spaces(query);
    for entity in entities {
        for component in entity.split_whitespace() {
            if let Some(pos) = tokens.iter().position(|t| t == component) {
                tokens.remove(pos);
            }
        }
    }
    tokens
}

/// Match an entity against the query as an ordered subsequence
///
/// Each component token must occur after the previous component's match
/// position; other tokens may interleave freely. On success, returns the
/// query with the entity's component tokens removed (first occurrences),
/// re-joined with single spaces. Returns `None` when any component cannot
/// be found in order.
pub fn match_entity_ordered(entity: &str, query: &str) -> Option<String> {
    let query_tokens = tokenize_by_spaces(query);
    let mut pos = 0;
    for component in entity.split_whitespace() {
        let offset = query_tokens[pos..].iter().position(|t| t == component)?;
        pos += offset + 1;
    }
    Some(remove_first_occurrences([entity], query).join(" "))
}

/// Find every vocabulary entity matching the query
///
/// Returns `(entity, remainder)` pairs in vocabulary order. The entities of
/// the returned pairs are the narrowed vocabulary for further expansion;
/// the caller's vocabulary is never touched. Entities with no component
/// tokens are skipped.
pub fn find_matching_entities(query: &str, vocabulary: &[String]) -> Vec<(String, String)> {
    vocabulary
        .iter()
        .filter(|entity| !entity.trim().is_empty())
        .filter_map(|entity| {
            match_entity_ordered(entity, query).map(|remainder| (entity.clone(), remainder))
        })
        .collect()
}

// ============================================================================
// Enumeration
// ============================================================================

/// Add a partition for `entities` unless that entity set is already present
fn push_unique(acc: &mut Vec<QueryPartition>, entities: BTreeSet<String>, original_query: &str) {
    if acc.iter().any(|p| p.entities == entities) {
        return;
    }
    let tokens = remove_first_occurrences(entities.iter().map(String::as_str), original_query);
    acc.push(QueryPartition { entities, tokens });
}

/// Recursively enumerate entity-subset partitions
///
/// Each branch narrows the vocabulary to entities matching the current
/// (partially consumed) query, then recurses per match on the vocabulary
/// minus that entity, with the entity's remainder as the new query.
/// Vocabulary subsets are fresh values per branch; no shared mutable list.
/// Leftover tokens are always recomputed against the original query.
fn enumerate_partitions(
    vocabulary: &[String],
    query: &str,
    original_query: &str,
    acc: &mut Vec<QueryPartition>,
) {
    if vocabulary.is_empty() {
        return;
    }

    let matches = find_matching_entities(query, vocabulary);
    if matches.is_empty() {
        return;
    }

    for (entity, remainder) in &matches {
        let narrowed: Vec<String> = matches
            .iter()
            .map(|(e, _)| e.clone())
            .filter(|e| e != entity)
            .collect();

        let mut sub = Vec::new();
        enumerate_partitions(&narrowed, remainder, original_query, &mut sub);

        for partition in &sub {
            if !partition.entities.contains(entity) {
                let mut entities = partition.entities.clone();
                entities.insert(entity.clone());
                push_unique(acc, entities, original_query);
            }
        }

        push_unique(acc, BTreeSet::from([entity.clone()]), original_query);
    }
}

/// Segment a query against an entity vocabulary
///
/// Returns every valid partition of the query into a subset of matching
/// entities plus leftover tokens, deduplicated on entity set. The baseline
/// partition (no entities, all tokens) is always present exactly once, so
/// degenerate inputs (empty query, empty vocabulary, nothing matching)
/// still yield one partition.
pub fn segment(query: &str, vocabulary: &[String]) -> Vec<QueryPartition> {
    let mut partitions = Vec::new();
    enumerate_partitions(vocabulary, query, query, &mut partitions);

    // Enumerated entity sets are never empty, so the baseline is new.
    partitions.push(QueryPartition::baseline(query));

    tracing::debug!(
        target: "lexent::search",
        partitions = partitions.len(),
        vocabulary = vocabulary.len(),
        "query segmented"
    );

    partitions
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vocab(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    fn entity_sets(partitions: &[QueryPartition]) -> Vec<BTreeSet<String>> {
        partitions.iter().map(|p| p.entities.clone()).collect()
    }

    fn has_entity_set(partitions: &[QueryPartition], entities: &[&str]) -> bool {
        let wanted: BTreeSet<String> = entities.iter().map(|s| s.to_string()).collect();
        partitions.iter().any(|p| p.entities == wanted)
    }

    // ========================================
    // remove_first_occurrences Tests
    // ========================================

    #[test]
    fn test_remove_first_occurrence_only() {
        let tokens = remove_first_occurrences(["fox"], "fox jumps fox");
        assert_eq!(tokens, vec!["jumps", "fox"]);
    }

    #[test]
    fn test_remove_multiword_entity() {
        let tokens = remove_first_occurrences(["Barack Obama"], "Barack Obama visited Paris");
        assert_eq!(tokens, vec!["visited", "Paris"]);
    }

    #[test]
    fn test_remove_skips_absent_components() {
        let tokens = remove_first_occurrences(["quick fox"], "lazy dog");
        assert_eq!(tokens, vec!["lazy", "dog"]);
    }

    #[test]
    fn test_remove_order_of_entities_is_multiset_stable() {
        let a = remove_first_occurrences(["a b", "b c"], "a b b c d");
        let b = remove_first_occurrences(["b c", "a b"], "a b b c d");
        let mut a_sorted = a.clone();
        let mut b_sorted = b.clone();
        a_sorted.sort();
        b_sorted.sort();
        assert_eq!(a_sorted, b_sorted);
        assert_eq!(a_sorted, vec!["d"]);
    }

    // ========================================
    // match_entity_ordered Tests
    // ========================================

    #[test]
    fn test_match_adjacent_components() {
        let remainder = match_entity_ordered("Barack Obama", "Barack Obama visited Paris");
        assert_eq!(remainder.as_deref(), Some("visited Paris"));
    }

    #[test]
    fn test_match_allows_interleaved_tokens() {
        let remainder = match_entity_ordered("Obama Paris", "Obama quietly visited Paris");
        assert_eq!(remainder.as_deref(), Some("quietly visited"));
    }

    #[test]
    fn test_match_rejects_out_of_order() {
        assert!(match_entity_ordered("Paris Obama", "Obama visited Paris").is_none());
    }

    #[test]
    fn test_match_rejects_missing_component() {
        assert!(match_entity_ordered("Barack Obama", "Obama visited Paris").is_none());
    }

    #[test]
    fn test_match_requires_fresh_occurrence_per_component() {
        // Second "x" has no occurrence after the first match position
        assert!(match_entity_ordered("x x", "x y").is_none());
        assert!(match_entity_ordered("x x", "x y x").is_some());
    }

    #[test]
    fn test_match_remainder_removes_earliest_duplicates() {
        // Removal is first-occurrence, independent of where the
        // subsequence matched: the leading "Paris" is the one removed.
        let remainder = match_entity_ordered("Obama Paris", "Paris Obama Paris");
        assert_eq!(remainder.as_deref(), Some("Paris"));
    }

    // ========================================
    // find_matching_entities Tests
    // ========================================

    #[test]
    fn test_find_narrows_to_matching_entities() {
        let vocabulary = vocab(&["Barack Obama", "Angela Merkel", "Paris"]);
        let matches = find_matching_entities("Barack Obama visited Paris", &vocabulary);

        let narrowed: Vec<&str> = matches.iter().map(|(e, _)| e.as_str()).collect();
        assert_eq!(narrowed, vec!["Barack Obama", "Paris"]);
        // The caller's vocabulary is untouched
        assert_eq!(vocabulary.len(), 3);
    }

    #[test]
    fn test_find_reports_remainders() {
        let vocabulary = vocab(&["Paris"]);
        let matches = find_matching_entities("Obama visited Paris", &vocabulary);
        assert_eq!(matches, vec![("Paris".to_string(), "Obama visited".to_string())]);
    }

    #[test]
    fn test_find_skips_blank_entities() {
        let vocabulary = vocab(&["", "  ", "Paris"]);
        let matches = find_matching_entities("visited Paris", &vocabulary);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, "Paris");
    }

    // ========================================
    // segment Tests
    // ========================================

    #[test]
    fn test_segment_scenario_obama_paris() {
        let partitions = segment(
            "Barack Obama visited Paris",
            &vocab(&["Barack Obama"]),
        );

        assert!(has_entity_set(&partitions, &["Barack Obama"]));
        assert!(has_entity_set(&partitions, &[]));

        let with_entity = partitions
            .iter()
            .find(|p| !p.entities.is_empty())
            .unwrap();
        assert_eq!(with_entity.tokens, vec!["visited", "Paris"]);

        let baseline = partitions.iter().find(|p| p.entities.is_empty()).unwrap();
        assert_eq!(baseline.tokens, vec!["Barack", "Obama", "visited", "Paris"]);
    }

    #[test]
    fn test_segment_combines_compatible_entities() {
        let partitions = segment(
            "Barack Obama visited Paris",
            &vocab(&["Barack Obama", "Paris"]),
        );

        assert!(has_entity_set(&partitions, &["Barack Obama"]));
        assert!(has_entity_set(&partitions, &["Paris"]));
        assert!(has_entity_set(&partitions, &["Barack Obama", "Paris"]));
        assert!(has_entity_set(&partitions, &[]));
        assert_eq!(partitions.len(), 4);

        let both = partitions
            .iter()
            .find(|p| p.entities.len() == 2)
            .unwrap();
        assert_eq!(both.tokens, vec!["visited"]);
    }

    #[test]
    fn test_segment_entities_competing_for_a_token() {
        // Both entities need the single "b"; they can never co-occur.
        let partitions = segment("a b c", &vocab(&["a b", "b c"]));

        assert!(has_entity_set(&partitions, &["a b"]));
        assert!(has_entity_set(&partitions, &["b c"]));
        assert!(!has_entity_set(&partitions, &["a b", "b c"]));
        assert!(has_entity_set(&partitions, &[]));
    }

    #[test]
    fn test_segment_baseline_only_when_nothing_matches() {
        let partitions = segment("quick brown fox", &vocab(&["Barack Obama"]));
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions[0], QueryPartition::baseline("quick brown fox"));
    }

    #[test]
    fn test_segment_empty_vocabulary() {
        let partitions = segment("quick brown fox", &[]);
        assert_eq!(partitions.len(), 1);
        assert!(partitions[0].entities.is_empty());
        assert_eq!(partitions[0].tokens, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_segment_empty_query() {
        let partitions = segment("", &vocab(&["Barack Obama"]));
        assert_eq!(partitions.len(), 1);
        assert!(partitions[0].entities.is_empty());
        assert!(partitions[0].tokens.is_empty());
    }

    #[test]
    fn test_segment_deduplicates_entity_sets() {
        // Duplicate vocabulary entries and symmetric recursion orders must
        // not produce two partitions with equal entity sets.
        let partitions = segment("a b c d", &vocab(&["a b", "c d", "a b"]));

        let sets = entity_sets(&partitions);
        let unique: BTreeSet<_> = sets.iter().cloned().collect();
        assert_eq!(sets.len(), unique.len());
        assert!(has_entity_set(&partitions, &["a b", "c d"]));
    }

    #[test]
    fn test_segment_entity_sets_subset_of_vocabulary() {
        let vocabulary = vocab(&["a b", "b c", "c"]);
        let partitions = segment("a b c", &vocabulary);

        for partition in &partitions {
            for entity in &partition.entities {
                assert!(vocabulary.contains(entity));
            }
        }
    }

    #[test]
    fn test_segment_idempotent_as_set() {
        let vocabulary = vocab(&["a b", "b c", "c d"]);
        let mut first = segment("a b c d", &vocabulary);
        let mut second = segment("a b c d", &vocabulary);

        first.sort_by(|a, b| a.entities.cmp(&b.entities));
        second.sort_by(|a, b| a.entities.cmp(&b.entities));
        assert_eq!(first, second);
    }

    // ========================================
    // Token Accounting Property
    // ========================================

    fn sorted(mut tokens: Vec<String>) -> Vec<String> {
        tokens.sort();
        tokens
    }

    proptest! {
        /// No query token is invented or lost: for every partition, the
        /// leftover tokens plus the chosen entities' component tokens are
        /// exactly the original query tokens, as multisets.
        #[test]
        fn prop_token_accounting(raw in proptest::collection::vec("[abcd]", 0..8)) {
            let query = raw.join(" ");
            let vocabulary = vocab(&["a b", "b c", "c d", "d", "a c"]);

            for partition in segment(&query, &vocabulary) {
                let mut reassembled = partition.tokens.clone();
                for entity in &partition.entities {
                    reassembled.extend(entity.split_whitespace().map(String::from));
                }
                prop_assert_eq!(
                    sorted(reassembled),
                    sorted(tokenize_by_spaces(&query))
                );
            }
        }
    }
}
