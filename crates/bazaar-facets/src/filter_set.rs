//! Caller-supplied search criteria.
//!
//! A [`FilterSet`] is what a search page or the wanted-request board builds
//! from the user's selections. Every field is optional; a criterion that is
//! left empty never disqualifies an entity.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FacetError;

/// How keyword tokens combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMode {
    /// Every token must appear.
    #[default]
    And,
    /// At least one token must appear.
    Or,
}

impl KeywordMode {
    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordMode::And => "and",
            KeywordMode::Or => "or",
        }
    }
}

impl std::fmt::Display for KeywordMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KeywordMode {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" | "all" => Ok(KeywordMode::And),
            "or" | "any" => Ok(KeywordMode::Or),
            _ => Err(FacetError::InvalidKeywordMode(s.to_string())),
        }
    }
}

/// The combined criteria for one search.
///
/// # Example
///
/// ```
/// use bazaar_facets::{FilterSet, KeywordMode};
///
/// let filters = FilterSet::new()
///     .in_category("Vehicle")
///     .near("colombo")
///     .price_between(1_000_000.0, 2_000_000.0)
///     .tags_all("model_name", ["Aqua"])
///     .keyword("hybrid", KeywordMode::And);
///
/// assert!(filters.price_is_constraint);
/// assert!(!filters.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Exact, case-sensitive category.
    pub category: Option<String>,
    /// Case-insensitive substring tested against each entity location.
    pub location_query: Option<String>,
    /// Lower price bound, inclusive.
    pub price_min: Option<f64>,
    /// Upper price bound, inclusive.
    pub price_max: Option<f64>,
    /// When false, price is not checked at all.
    pub price_is_constraint: bool,
    /// Key to single required value.
    pub attribute_equals: BTreeMap<String, String>,
    /// Key to values that must all be present.
    pub attribute_tags_all: BTreeMap<String, BTreeSet<String>>,
    /// Free-text keyword query.
    pub keyword_query: Option<String>,
    /// How keyword tokens combine.
    pub keyword_mode: KeywordMode,
}

impl FilterSet {
    /// Creates an empty filter set, which matches every entity.
    pub fn new() -> Self {
        FilterSet::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Requires an exact category.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Requires one of the entity's locations to contain `query`.
    pub fn near(mut self, query: impl Into<String>) -> Self {
        self.location_query = Some(query.into());
        self
    }

    /// Requires price within `[min, max]`.
    pub fn price_between(mut self, min: f64, max: f64) -> Self {
        self.price_min = Some(min);
        self.price_max = Some(max);
        self.price_is_constraint = true;
        self
    }

    /// Requires price of at least `min`.
    pub fn price_at_least(mut self, min: f64) -> Self {
        self.price_min = Some(min);
        self.price_is_constraint = true;
        self
    }

    /// Requires price of at most `max`.
    pub fn price_at_most(mut self, max: f64) -> Self {
        self.price_max = Some(max);
        self.price_is_constraint = true;
        self
    }

    /// Turns off price checks while keeping any bounds for display.
    pub fn any_price(mut self) -> Self {
        self.price_is_constraint = false;
        self
    }

    /// Requires `key` to equal `value`, ignoring case.
    pub fn attr_eq(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute_equals.insert(key.into(), value.into());
        self
    }

    /// Requires every one of `values` to be present under `key`.
    ///
    /// Calling this twice for the same key merges the value sets.
    pub fn tags_all<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_tags_all
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Sets the keyword query and how its tokens combine.
    pub fn keyword(mut self, query: impl Into<String>, mode: KeywordMode) -> Self {
        self.keyword_query = Some(query.into());
        self.keyword_mode = mode;
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the category criterion, treating blank as absent.
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Returns the location criterion, treating blank as absent.
    pub fn location_query(&self) -> Option<&str> {
        non_blank(self.location_query.as_deref())
    }

    /// Returns the keyword criterion, treating blank as absent.
    pub fn keyword_query(&self) -> Option<&str> {
        non_blank(self.keyword_query.as_deref())
    }

    /// Returns `true` if price will be checked with at least one bound.
    pub fn has_price_bounds(&self) -> bool {
        self.price_is_constraint && (self.price_min.is_some() || self.price_max.is_some())
    }

    /// Returns `true` if no criterion is set (matches everything).
    pub fn is_empty(&self) -> bool {
        self.category().is_none()
            && self.location_query().is_none()
            && !self.has_price_bounds()
            && self.attribute_equals.values().all(|v| v.trim().is_empty())
            && self
                .attribute_tags_all
                .values()
                .all(|set| set.iter().all(|v| v.trim().is_empty()))
            && self.keyword_query().is_none()
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_set() {
        assert!(FilterSet::new().is_empty());
        assert!(FilterSet::new().in_category("").near("  ").is_empty());
        assert!(FilterSet::new().tags_all("model_name", Vec::<String>::new()).is_empty());
    }

    #[test]
    fn price_builders_set_constraint() {
        let f = FilterSet::new().price_at_most(10.0);
        assert!(f.price_is_constraint);
        assert!(f.has_price_bounds());

        let f = f.any_price();
        assert!(!f.price_is_constraint);
        assert_eq!(f.price_max, Some(10.0));
        assert!(!f.has_price_bounds());
    }

    #[test]
    fn tags_all_merges_values() {
        let f = FilterSet::new()
            .tags_all("model_name", ["Aqua"])
            .tags_all("model_name", ["Vitz"]);
        assert_eq!(f.attribute_tags_all["model_name"].len(), 2);
    }

    #[test]
    fn keyword_mode_parsing() {
        assert_eq!("AND".parse::<KeywordMode>().unwrap(), KeywordMode::And);
        assert_eq!("or".parse::<KeywordMode>().unwrap(), KeywordMode::Or);
        assert_eq!("any".parse::<KeywordMode>().unwrap(), KeywordMode::Or);
        assert!(matches!(
            "xor".parse::<KeywordMode>(),
            Err(FacetError::InvalidKeywordMode(_))
        ));
    }

    #[test]
    fn keyword_mode_display() {
        assert_eq!(KeywordMode::And.to_string(), "and");
        assert_eq!(KeywordMode::Or.to_string(), "or");
    }

    #[test]
    fn deserializes_with_defaults() {
        let f: FilterSet = serde_json::from_str(
            r#"{"category":"Vehicle","attribute_tags_all":{"model_name":["Aqua"]}}"#,
        )
        .unwrap();
        assert_eq!(f.category(), Some("Vehicle"));
        assert!(!f.price_is_constraint);
        assert_eq!(f.keyword_mode, KeywordMode::And);
    }
}
