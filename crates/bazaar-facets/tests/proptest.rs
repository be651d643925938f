//! Property-based tests for bazaar-facets using proptest.

use proptest::prelude::*;
use bazaar_facets::range::{point_in_bounds, ranges_overlap};
use bazaar_facets::tags::matches_all;
use bazaar_facets::{
    AttributeValue, Entity, FacetCatalog, FilterSet, KeywordMode, PredicateEvaluator, PriceRange,
};

// ============================================================================
// Strategies
// ============================================================================

const CATEGORIES: &[&str] = &["Vehicle", "Property", "Jobs", "Electronics"];
const LOCATIONS: &[&str] = &["Colombo", "Kandy", "Galle", "Jaffna", "Negombo"];
const MODELS: &[&str] = &["Aqua", "Vitz", "Axio", "Premio", "Allion"];
const WORDS: &[&str] = &["toyota", "hybrid", "used", "new", "aqua", "suv", "clean"];

fn bound() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0u32..1000).prop_map(|b| b.map(f64::from))
}

fn ordered_range() -> impl Strategy<Value = (Option<f64>, Option<f64>)> {
    (bound(), bound()).prop_map(|(a, b)| match (a, b) {
        (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
        other => other,
    })
}

fn entity_strategy() -> impl Strategy<Value = Entity> {
    (
        "[a-z0-9]{1,8}",
        prop::option::of(prop::sample::select(CATEGORIES)),
        prop::sample::subsequence(LOCATIONS, 0..3),
        prop::option::of(0u32..1000),
        prop::option::of(ordered_range()),
        any::<bool>(),
        prop::sample::subsequence(MODELS, 0..3),
        prop::sample::subsequence(WORDS, 0..4),
    )
        .prop_map(
            |(id, category, locations, price, range, open, models, words)| {
                let mut builder = Entity::builder(id)
                    .title(words.join(" "))
                    .locations(locations)
                    .price_unconstrained(open)
                    .attribute("model_name", AttributeValue::from(models));
                if let Some(category) = category {
                    builder = builder.category(category);
                }
                if let Some(price) = price {
                    builder = builder.price(f64::from(price));
                }
                if let Some((min, max)) = range {
                    builder = builder.price_range(PriceRange::new(min, max));
                }
                builder.build()
            },
        )
}

fn filter_strategy() -> impl Strategy<Value = FilterSet> {
    (
        prop::option::of(prop::sample::select(CATEGORIES)),
        prop::option::of(prop::sample::select(LOCATIONS)),
        ordered_range(),
        any::<bool>(),
        prop::sample::subsequence(MODELS, 0..2),
        prop::option::of(prop::sample::subsequence(WORDS, 1..3)),
        any::<bool>(),
    )
        .prop_map(|(category, location, (min, max), constrained, models, words, or)| {
            let mut filters = FilterSet::new().tags_all("model_name", models);
            filters.category = category.map(String::from);
            filters.location_query = location.map(|l| l.to_lowercase());
            filters.price_min = min;
            filters.price_max = max;
            filters.price_is_constraint = constrained;
            if let Some(words) = words {
                let mode = if or { KeywordMode::Or } else { KeywordMode::And };
                filters = filters.keyword(words.join(" "), mode);
            }
            filters
        })
}

/// Adds one criterion to a filter set, only where that criterion is unset.
fn narrow(filters: &FilterSet, extra: u8) -> FilterSet {
    let f = filters.clone();
    match extra % 5 {
        0 if f.category.is_none() => f.in_category("Vehicle"),
        1 if f.location_query.is_none() => f.near("colombo"),
        2 if !f.price_is_constraint => f.price_at_most(500.0),
        3 => f.tags_all("model_name", ["Aqua"]),
        4 if !f.attribute_equals.contains_key("model_name") => f.attr_eq("model_name", "Vitz"),
        _ => f,
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// An empty filter set matches every entity.
    #[test]
    fn empty_filter_matches_everything(entity in entity_strategy()) {
        prop_assert!(bazaar_facets::matches(&entity, &FilterSet::new()));
    }

    /// Adding a criterion can only turn true into false, never false into true.
    #[test]
    fn adding_criteria_only_narrows(
        entity in entity_strategy(),
        filters in filter_strategy(),
        extra in any::<u8>(),
    ) {
        let before = bazaar_facets::matches(&entity, &filters);
        let after = bazaar_facets::matches(&entity, &narrow(&filters, extra));
        prop_assert!(before || !after, "narrowed filter matched where base did not");
    }

    /// Range overlap does not depend on argument order.
    #[test]
    fn overlap_is_symmetric(
        a in bound(), b in bound(), c in bound(), d in bound(),
    ) {
        prop_assert_eq!(ranges_overlap(a, b, c, d), ranges_overlap(c, d, a, b));
    }

    /// A point is in bounds iff the degenerate range [v, v] overlaps the window.
    #[test]
    fn point_is_degenerate_overlap(v in 0u32..1000, (min, max) in ordered_range()) {
        let v = f64::from(v);
        prop_assert_eq!(
            point_in_bounds(Some(v), min, max),
            ranges_overlap(Some(v), Some(v), min, max)
        );
    }

    /// Tag matching is a subset test: any subset of the actual values matches.
    #[test]
    fn subset_of_actual_always_matches(
        actual in prop::sample::subsequence(MODELS, 0..5),
        take in 0usize..5,
    ) {
        let required: Vec<&str> = actual.iter().take(take).copied().collect();
        let value = AttributeValue::from(actual.clone());
        prop_assert!(matches_all(&required, Some(&value)));
    }

    /// Filtering never returns more entities than it was given.
    #[test]
    fn filter_never_grows_collection(
        items in prop::collection::vec(entity_strategy(), 0..40),
        filters in filter_strategy(),
    ) {
        let results = PredicateEvaluator::new(&filters).filter(&items);
        prop_assert!(results.len() <= items.len());
    }

    /// Retained entities keep their relative input order.
    #[test]
    fn filter_preserves_input_order(
        items in prop::collection::vec(entity_strategy(), 0..40),
        filters in filter_strategy(),
    ) {
        let results = PredicateEvaluator::new(&filters).filter(&items);
        let positions: Vec<usize> = results
            .iter()
            .map(|r| items.iter().position(|x| std::ptr::eq(x, *r)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Bulk filter agrees with per-entity matches.
    #[test]
    fn filter_agrees_with_matches(
        items in prop::collection::vec(entity_strategy(), 0..40),
        filters in filter_strategy(),
    ) {
        let evaluator = PredicateEvaluator::new(&filters);
        let expected = items.iter().filter(|e| bazaar_facets::matches(e, &filters)).count();
        prop_assert_eq!(evaluator.filter(&items).len(), expected);
        prop_assert_eq!(evaluator.count(&items), expected);
        prop_assert_eq!(evaluator.any(&items), expected > 0);
    }

    /// Turning price off never removes a match.
    #[test]
    fn disabling_price_never_narrows(
        entity in entity_strategy(),
        filters in filter_strategy(),
    ) {
        let with_price = bazaar_facets::matches(&entity, &filters);
        let without = bazaar_facets::matches(&entity, &filters.clone().any_price());
        prop_assert!(!with_price || without);
    }

    /// Every attribute value in the corpus appears in the catalog.
    #[test]
    fn catalog_keeps_every_value(items in prop::collection::vec(entity_strategy(), 0..30)) {
        let catalog = FacetCatalog::build(&items);
        for item in &items {
            for value in item.attributes().values() {
                for v in value.iter() {
                    prop_assert!(catalog.values("model_name").contains(&v));
                }
            }
        }
    }
}
