//! Keyword search over an entity's searchable text.
//!
//! The query is split on whitespace and each token is tested as a plain
//! substring of the haystack. There is no stemming and no word-boundary
//! matching, so a partial word such as "Aqu" still finds "Aqua".

use crate::filter_set::KeywordMode;

/// Splits a query into lower-cased tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Tests `query` against `haystack` with the given combination mode.
///
/// An empty query imposes no constraint.
///
/// ```
/// use bazaar_facets::KeywordMode;
/// use bazaar_facets::text::matches;
///
/// let haystack = "toyota aqua hybrid";
/// assert!(matches(haystack, "aqua hybrid", KeywordMode::And));
/// assert!(!matches(haystack, "aqua suv", KeywordMode::And));
/// assert!(matches(haystack, "aqua suv", KeywordMode::Or));
/// ```
pub fn matches(haystack: &str, query: &str, mode: KeywordMode) -> bool {
    matches_tokens(&haystack.to_lowercase(), &tokenize(query), mode)
}

/// Tests pre-lowered tokens against a pre-lowered haystack.
///
/// An empty token list imposes no constraint.
pub fn matches_tokens(folded_haystack: &str, tokens: &[String], mode: KeywordMode) -> bool {
    if tokens.is_empty() {
        return true;
    }
    match mode {
        KeywordMode::And => tokens.iter().all(|t| folded_haystack.contains(t.as_str())),
        KeywordMode::Or => tokens.iter().any(|t| folded_haystack.contains(t.as_str())),
    }
}
