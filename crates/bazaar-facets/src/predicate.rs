//! Single named criteria.
//!
//! A [`FilterPredicate`] is one independently evaluable check. A
//! [`FilterSet`] expands into a list of them with [`FilterSet::predicates`],
//! dropping every criterion that is empty, so an empty filter set yields no
//! predicates at all.

use crate::entity::Entity;
use crate::filter_set::{FilterSet, KeywordMode};
use crate::range::{point_in_bounds, ranges_overlap};
use crate::tags::{matches_all, matches_equals};
use crate::text::{matches_tokens, tokenize};
use crate::traits::Attributed;

/// A single criterion evaluated against an [`Entity`].
///
/// Construct variants through the associated functions, which normalize the
/// stored data (lower-casing, tokenizing) once instead of per entity.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    /// Exact, case-sensitive category match.
    Category(String),
    /// Lower-cased substring tested against every entity location.
    Location(String),
    /// Price window; point or overlap test depending on the entity.
    Price { min: Option<f64>, max: Option<f64> },
    /// Case-insensitive equality (or membership) for one key.
    AttributeEquals { key: String, value: String },
    /// Every value must be present under the key.
    AttributeTagsAll { key: String, values: Vec<String> },
    /// Pre-tokenized keyword query.
    Keyword { tokens: Vec<String>, mode: KeywordMode },
}

impl FilterPredicate {
    pub fn category(category: impl Into<String>) -> Self {
        FilterPredicate::Category(category.into())
    }

    pub fn location(query: &str) -> Self {
        FilterPredicate::Location(query.trim().to_lowercase())
    }

    pub fn price(min: Option<f64>, max: Option<f64>) -> Self {
        FilterPredicate::Price { min, max }
    }

    /// Equality on one attribute; the value is trimmed.
    pub fn attribute_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        FilterPredicate::AttributeEquals {
            key: key.into(),
            value: value.into().trim().to_string(),
        }
    }

    /// Subset test on one attribute. Values are trimmed and blanks dropped.
    pub fn attribute_tags_all<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterPredicate::AttributeTagsAll {
            key: key.into(),
            values: values
                .into_iter()
                .map(Into::into)
                .map(|v: String| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
        }
    }

    pub fn keyword(query: &str, mode: KeywordMode) -> Self {
        FilterPredicate::Keyword {
            tokens: tokenize(query),
            mode,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            FilterPredicate::Category(_) => "category",
            FilterPredicate::Location(_) => "location",
            FilterPredicate::Price { .. } => "price",
            FilterPredicate::AttributeEquals { .. } => "attribute_equals",
            FilterPredicate::AttributeTagsAll { .. } => "attribute_tags_all",
            FilterPredicate::Keyword { .. } => "keyword",
        }
    }

    /// Evaluates this predicate against an entity.
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            // An entity without a category applies to any category.
            FilterPredicate::Category(category) => {
                entity.category().map_or(true, |c| c == category.as_str())
            }

            FilterPredicate::Location(query) => {
                query.is_empty()
                    || entity
                        .locations()
                        .iter()
                        .any(|loc| loc.to_lowercase().contains(query.as_str()))
            }

            FilterPredicate::Price { min, max } => {
                if entity.is_price_unconstrained() {
                    return true;
                }
                if let Some(price) = entity.price_value() {
                    point_in_bounds(Some(price), *min, *max)
                } else if let Some(range) = entity.price_range() {
                    ranges_overlap(range.min, range.max, *min, *max)
                } else {
                    true
                }
            }

            FilterPredicate::AttributeEquals { key, value } => {
                matches_equals(value, entity.attribute(key))
            }

            FilterPredicate::AttributeTagsAll { key, values } => {
                matches_all(values, entity.attribute(key))
            }

            FilterPredicate::Keyword { tokens, mode } => {
                matches_tokens(entity.searchable_text(), tokens, *mode)
            }
        }
    }

    /// Relative evaluation cost, used to order checks cheapest first.
    fn cost(&self) -> u8 {
        match self {
            FilterPredicate::Category(_) => 0,
            FilterPredicate::Price { .. } => 1,
            FilterPredicate::Location(_) => 2,
            FilterPredicate::AttributeEquals { .. } => 3,
            FilterPredicate::AttributeTagsAll { .. } => 4,
            FilterPredicate::Keyword { .. } => 5,
        }
    }
}

impl FilterSet {
    /// Expands this filter set into its non-empty predicates.
    ///
    /// Predicates come back cheapest first. The order only affects how soon
    /// evaluation short-circuits, never the result.
    ///
    /// ```
    /// use bazaar_facets::{FilterSet, FilterPredicate};
    ///
    /// assert!(FilterSet::new().predicates().is_empty());
    ///
    /// let preds = FilterSet::new().in_category("Vehicle").price_at_most(10.0).predicates();
    /// assert_eq!(preds[0], FilterPredicate::category("Vehicle"));
    /// assert_eq!(preds[1], FilterPredicate::price(None, Some(10.0)));
    /// ```
    pub fn predicates(&self) -> Vec<FilterPredicate> {
        let mut predicates = Vec::new();

        if let Some(category) = self.category() {
            predicates.push(FilterPredicate::category(category));
        }

        if let Some(query) = self.location_query() {
            predicates.push(FilterPredicate::location(query));
        }

        if self.has_price_bounds() {
            predicates.push(FilterPredicate::price(self.price_min, self.price_max));
        }

        for (key, value) in &self.attribute_equals {
            if !value.trim().is_empty() {
                predicates.push(FilterPredicate::attribute_equals(key, value));
            }
        }

        for (key, values) in &self.attribute_tags_all {
            let values: Vec<&String> = values.iter().filter(|v| !v.trim().is_empty()).collect();
            if !values.is_empty() {
                predicates.push(FilterPredicate::attribute_tags_all(
                    key,
                    values.into_iter().cloned(),
                ));
            }
        }

        if let Some(query) = self.keyword_query() {
            predicates.push(FilterPredicate::keyword(query, self.keyword_mode));
        }

        predicates.sort_by_key(FilterPredicate::cost);
        predicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PriceRange;

    fn car() -> Entity {
        Entity::builder("L-1")
            .title("Toyota Aqua")
            .category("Vehicle")
            .location("Colombo 07")
            .price(1_500_000.0)
            .attribute("model_name", vec!["Aqua"])
            .attribute("sub_category", vec!["Hybrid"])
            .build()
    }

    fn wanted(min: Option<f64>, max: Option<f64>) -> Entity {
        Entity::builder("W-1")
            .locations(["Kandy", "Galle"])
            .price_range(PriceRange::new(min, max))
            .build()
    }

    #[test]
    fn category_is_case_sensitive() {
        assert!(FilterPredicate::category("Vehicle").matches(&car()));
        assert!(!FilterPredicate::category("vehicle").matches(&car()));
        assert!(!FilterPredicate::category("Property").matches(&car()));
    }

    #[test]
    fn category_absent_on_entity_applies_to_any() {
        assert!(FilterPredicate::category("Vehicle").matches(&wanted(None, None)));
    }

    #[test]
    fn location_is_substring_of_any() {
        assert!(FilterPredicate::location("colombo").matches(&car()));
        assert!(FilterPredicate::location("GALLE").matches(&wanted(None, None)));
        assert!(!FilterPredicate::location("Jaffna").matches(&wanted(None, None)));
    }

    #[test]
    fn location_against_no_locations_fails() {
        let bare = Entity::builder("X").build();
        assert!(!FilterPredicate::location("Colombo").matches(&bare));
    }

    #[test]
    fn price_point_mode() {
        assert!(FilterPredicate::price(Some(1_000_000.0), Some(2_000_000.0)).matches(&car()));
        assert!(!FilterPredicate::price(None, Some(1_000_000.0)).matches(&car()));
    }

    #[test]
    fn price_overlap_mode() {
        let w = wanted(Some(100_000.0), Some(200_000.0));
        assert!(FilterPredicate::price(Some(150_000.0), Some(300_000.0)).matches(&w));
        assert!(!FilterPredicate::price(Some(250_000.0), Some(300_000.0)).matches(&w));
    }

    #[test]
    fn price_unconstrained_entity_always_passes() {
        let open = Entity::builder("W-2")
            .price_range(PriceRange::between(1.0, 2.0))
            .price_unconstrained(true)
            .build();
        assert!(FilterPredicate::price(Some(100.0), Some(200.0)).matches(&open));
    }

    #[test]
    fn price_missing_on_entity_passes() {
        let bare = Entity::builder("X").build();
        assert!(FilterPredicate::price(Some(1.0), Some(2.0)).matches(&bare));
    }

    #[test]
    fn point_price_wins_over_range() {
        let both = Entity::builder("X")
            .price(50.0)
            .price_range(PriceRange::between(0.0, 1000.0))
            .build();
        assert!(!FilterPredicate::price(Some(100.0), None).matches(&both));
    }

    #[test]
    fn attribute_predicates() {
        assert!(FilterPredicate::attribute_equals("model_name", "aqua").matches(&car()));
        assert!(!FilterPredicate::attribute_equals("colour", "red").matches(&car()));
        assert!(FilterPredicate::attribute_tags_all("model_name", ["Aqua"]).matches(&car()));
        assert!(!FilterPredicate::attribute_tags_all("model_name", ["Aqua", "Vitz"]).matches(&car()));
    }

    #[test]
    fn attribute_values_are_trimmed() {
        assert!(FilterPredicate::attribute_equals("model_name", " Aqua ").matches(&car()));
        assert!(FilterPredicate::attribute_tags_all("model_name", [" Aqua", "  "]).matches(&car()));
        assert_eq!(
            FilterPredicate::attribute_tags_all("model_name", [" Aqua ", ""]),
            FilterPredicate::AttributeTagsAll {
                key: "model_name".to_string(),
                values: vec!["Aqua".to_string()],
            }
        );

        let direct = FilterSet::new()
            .attr_eq("model_name", " aqua ")
            .tags_all("sub_category", [" Hybrid "]);
        assert!(crate::matches(&car(), &direct));
    }

    #[test]
    fn keyword_predicate() {
        assert!(FilterPredicate::keyword("toyota hyb", KeywordMode::And).matches(&car()));
        assert!(!FilterPredicate::keyword("toyota suv", KeywordMode::And).matches(&car()));
        assert!(FilterPredicate::keyword("toyota suv", KeywordMode::Or).matches(&car()));
    }

    #[test]
    fn predicates_skip_empty_criteria() {
        let f = FilterSet::new()
            .in_category(" ")
            .attr_eq("colour", "")
            .tags_all("model_name", [""])
            .keyword("   ", KeywordMode::Or);
        assert!(f.predicates().is_empty());
    }

    #[test]
    fn price_predicate_only_when_constrained() {
        let mut f = FilterSet::new().price_between(1.0, 2.0);
        assert_eq!(f.predicates().len(), 1);
        f.price_is_constraint = false;
        assert!(f.predicates().is_empty());
    }

    #[test]
    fn predicates_are_cheapest_first() {
        let f = FilterSet::new()
            .keyword("aqua", KeywordMode::And)
            .tags_all("model_name", ["Aqua"])
            .in_category("Vehicle");
        let names: Vec<_> = f.predicates().iter().map(FilterPredicate::name).collect();
        assert_eq!(names, ["category", "attribute_tags_all", "keyword"]);
    }
}
