//! Predicate evaluation over entities.
//!
//! [`PredicateEvaluator`] is the engine's top-level contract. It is built once
//! per request from a [`FilterSet`] and then asked about each candidate. The
//! same evaluator serves listing search and the wanted-request board.
//!
//! ```text
//! match = every predicate matches
//! ```
//!
//! An evaluator owns no mutable state, so one instance can be shared across
//! threads and used against any number of entity snapshots.

use crate::entity::Entity;
use crate::filter_set::FilterSet;
use crate::predicate::FilterPredicate;

/// Compiled form of a [`FilterSet`].
///
/// # Example
///
/// ```
/// use bazaar_facets::{Entity, FilterSet, PredicateEvaluator};
///
/// let listings = vec![
///     Entity::builder("1").category("Vehicle").price(900.0).build(),
///     Entity::builder("2").category("Vehicle").price(1500.0).build(),
///     Entity::builder("3").category("Property").price(1200.0).build(),
/// ];
///
/// let filters = FilterSet::new().in_category("Vehicle").price_at_least(1000.0);
/// let evaluator = PredicateEvaluator::new(&filters);
///
/// let hits = evaluator.filter(&listings);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id(), "2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PredicateEvaluator {
    predicates: Vec<FilterPredicate>,
}

impl PredicateEvaluator {
    /// Compiles a filter set.
    pub fn new(filters: &FilterSet) -> Self {
        PredicateEvaluator {
            predicates: filters.predicates(),
        }
    }

    /// Uses an explicit predicate list, evaluated in the given order.
    pub fn from_predicates(predicates: Vec<FilterPredicate>) -> Self {
        PredicateEvaluator { predicates }
    }

    /// Returns the compiled predicates.
    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    /// Returns `true` if there is nothing to check (matches everything).
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single entity satisfies every predicate.
    pub fn matches(&self, entity: &Entity) -> bool {
        match self.first_failure(entity) {
            None => true,
            Some(failed) => {
                tracing::trace!(id = %entity.id(), predicate = failed.name(), "entity rejected");
                false
            }
        }
    }

    /// Returns the first predicate the entity fails, if any.
    pub fn first_failure(&self, entity: &Entity) -> Option<&FilterPredicate> {
        self.predicates.iter().find(|p| !p.matches(entity))
    }

    /// Returns references to matching entities, in input order.
    pub fn filter<'a>(&self, entities: &'a [Entity]) -> Vec<&'a Entity> {
        let results: Vec<&'a Entity> = entities.iter().filter(|e| self.matches(e)).collect();
        tracing::debug!(
            candidates = entities.len(),
            retained = results.len(),
            predicates = self.predicates.len(),
            "filtered entities"
        );
        results
    }

    /// Filters and clones matching entities.
    pub fn filter_cloned(&self, entities: &[Entity]) -> Vec<Entity> {
        self.filter(entities).into_iter().cloned().collect()
    }

    /// Filters a vector in place, keeping only matching entities.
    pub fn filter_mut(&self, entities: &mut Vec<Entity>) {
        entities.retain(|e| self.matches(e));
    }

    /// Counts the number of matching entities.
    pub fn count(&self, entities: &[Entity]) -> usize {
        entities.iter().filter(|e| self.matches(e)).count()
    }

    /// Returns `true` if any entity matches.
    pub fn any(&self, entities: &[Entity]) -> bool {
        entities.iter().any(|e| self.matches(e))
    }

    /// Returns `true` if all entities match.
    pub fn all(&self, entities: &[Entity]) -> bool {
        entities.iter().all(|e| self.matches(e))
    }

    /// Finds the first matching entity.
    pub fn find<'a>(&self, entities: &'a [Entity]) -> Option<&'a Entity> {
        entities.iter().find(|e| self.matches(e))
    }

    /// Finds the first matching entity and returns its index.
    pub fn position(&self, entities: &[Entity]) -> Option<usize> {
        entities.iter().position(|e| self.matches(e))
    }
}

impl From<&FilterSet> for PredicateEvaluator {
    fn from(filters: &FilterSet) -> Self {
        PredicateEvaluator::new(filters)
    }
}

/// Tests one entity against a filter set.
///
/// Compiles the filter set on every call; prefer [`PredicateEvaluator`] when
/// checking many entities.
pub fn matches(entity: &Entity, filters: &FilterSet) -> bool {
    PredicateEvaluator::new(filters).matches(entity)
}

/// Retains the entities that match, preserving input order.
pub fn filter<'a>(entities: &'a [Entity], filters: &FilterSet) -> Vec<&'a Entity> {
    PredicateEvaluator::new(filters).filter(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_set::KeywordMode;
    use crate::value::PriceRange;

    fn corpus() -> Vec<Entity> {
        vec![
            Entity::builder("1")
                .title("Toyota Aqua")
                .category("Vehicle")
                .location("Colombo")
                .price(1_500_000.0)
                .attribute("model_name", vec!["Aqua"])
                .build(),
            Entity::builder("2")
                .title("Toyota Vitz")
                .category("Vehicle")
                .location("Kandy")
                .price(2_500_000.0)
                .attribute("model_name", vec!["Vitz"])
                .build(),
            Entity::builder("3")
                .title("Software Engineer")
                .category("Jobs")
                .location("Colombo")
                .attribute("employment_type", "Full-time")
                .build(),
            Entity::builder("4")
                .title("Need a hybrid car")
                .locations(["Galle", "Matara"])
                .price_range(PriceRange::between(1_000_000.0, 1_800_000.0))
                .build(),
        ]
    }

    fn ids(results: &[&Entity]) -> Vec<String> {
        results.iter().map(|e| e.id().to_string()).collect()
    }

    #[test]
    fn empty_evaluator_matches_all() {
        let items = corpus();
        let evaluator = PredicateEvaluator::new(&FilterSet::new());
        assert!(evaluator.is_empty());
        assert_eq!(evaluator.filter(&items).len(), items.len());
        assert!(evaluator.all(&items));
    }

    #[test]
    fn category_filter_keeps_uncategorised_requests() {
        let items = corpus();
        let evaluator = PredicateEvaluator::new(&FilterSet::new().in_category("Vehicle"));
        assert_eq!(ids(&evaluator.filter(&items)), ["1", "2", "4"]);
    }

    #[test]
    fn price_mixes_point_and_overlap() {
        let items = corpus();
        let evaluator = PredicateEvaluator::new(&FilterSet::new().price_between(1_200_000.0, 2_000_000.0));
        // 3 has no price at all and passes
        assert_eq!(ids(&evaluator.filter(&items)), ["1", "3", "4"]);
    }

    #[test]
    fn location_or_across_entity_locations() {
        let items = corpus();
        let evaluator = PredicateEvaluator::new(&FilterSet::new().near("matara"));
        assert_eq!(ids(&evaluator.filter(&items)), ["4"]);
    }

    #[test]
    fn combined_criteria_are_anded() {
        let items = corpus();
        let filters = FilterSet::new()
            .in_category("Vehicle")
            .near("colombo")
            .keyword("toyota", KeywordMode::And);
        let evaluator = PredicateEvaluator::new(&filters);
        assert_eq!(ids(&evaluator.filter(&items)), ["1"]);
    }

    #[test]
    fn first_failure_names_predicate() {
        let items = corpus();
        let filters = FilterSet::new().in_category("Vehicle").near("kandy");
        let evaluator = PredicateEvaluator::new(&filters);

        let failed = evaluator.first_failure(&items[0]).map(FilterPredicate::name);
        assert_eq!(failed, Some("location"));
        assert_eq!(evaluator.first_failure(&items[1]), None);
    }

    #[test]
    fn helpers_agree_with_filter() {
        let items = corpus();
        let evaluator = PredicateEvaluator::new(&FilterSet::new().near("colombo"));

        assert_eq!(evaluator.count(&items), 2);
        assert!(evaluator.any(&items));
        assert!(!evaluator.all(&items));
        assert_eq!(evaluator.find(&items).map(|e| e.id()), Some("1"));
        assert_eq!(evaluator.position(&items), Some(0));
        assert_eq!(evaluator.filter_cloned(&items).len(), 2);

        let mut owned = items.clone();
        evaluator.filter_mut(&mut owned);
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn free_functions_match_evaluator() {
        let items = corpus();
        let filters = FilterSet::new().attr_eq("employment_type", "full-time");
        assert!(matches(&items[2], &filters));
        assert!(!matches(&items[0], &filters));
        assert_eq!(filter(&items, &filters).len(), 1);
    }

    #[test]
    fn evaluator_from_filter_set() {
        let filters = FilterSet::new().in_category("Jobs");
        let evaluator = PredicateEvaluator::from(&filters);
        assert_eq!(evaluator.predicates().len(), 1);
    }
}
