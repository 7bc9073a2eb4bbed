//! Query tokenizer
//!
//! Queries never go through the full annotation pipeline; they are split
//! on whitespace only, with no case folding or length filtering, because
//! entity vocabulary matching is literal.

/// Tokenize a query string on whitespace
///
/// # Example
///
/// ```
/// use lexent_search::tokenizer::tokenize_by_spaces;
///
/// let tokens = tokenize_by_spaces("Barack Obama visited Paris");
/// assert_eq!(tokens, vec!["Barack", "Obama", "visited", "Paris"]);
/// ```
pub fn tokenize_by_spaces(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}
