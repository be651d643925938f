//! Bazaar facets - filter and predicate matching for a classifieds marketplace.
//!
//! This crate decides whether a marketplace entity (a published listing, or a
//! buyer's standing "wanted" request) satisfies a set of user-chosen criteria,
//! and builds the facet catalog that filter UIs are populated from. It is pure
//! and synchronous: no I/O, no shared mutable state.
//!
//! - Category equality and location substring matching
//! - Price windows in two modes: point-in-bounds and range-overlap
//! - Attribute equality and tag-subset (AND within a key) matching
//! - Keyword search with AND/OR token combination
//! - Facet catalogs with per-value counts
//! - Sorting and pagination applied after filtering
//!
//! # Quick Start
//!
//! ```rust
//! use bazaar_facets::{Entity, FilterSet, PredicateEvaluator, PriceRange};
//!
//! let corpus = vec![
//!     Entity::builder("L-1")
//!         .title("Toyota Aqua 2015")
//!         .category("Vehicle")
//!         .location("Colombo")
//!         .price(1_500_000.0)
//!         .attribute("model_name", vec!["Aqua"])
//!         .attribute("sub_category", vec!["Hybrid"])
//!         .build(),
//!     Entity::builder("W-7")
//!         .title("Looking for a hybrid")
//!         .locations(["Kandy", "Colombo"])
//!         .price_range(PriceRange::between(100_000.0, 200_000.0))
//!         .build(),
//! ];
//!
//! let filters = FilterSet::new()
//!     .in_category("Vehicle")
//!     .price_between(1_000_000.0, 2_000_000.0)
//!     .tags_all("model_name", ["Aqua"]);
//!
//! let results = PredicateEvaluator::new(&filters).filter(&corpus);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id(), "L-1");
//! ```
//!
//! # Matching Semantics
//!
//! ```text
//! match = category ∧ location ∧ price ∧ attribute-equals ∧ tags-all ∧ keyword
//! ```
//!
//! Any criterion left empty passes. Evaluation short-circuits on the first
//! failing check; the order of checks never changes the result.
//!
//! | Criterion | Rule |
//! |-----------|------|
//! | Category | exact, case-sensitive; an entity without a category passes |
//! | Location | case-insensitive substring of any entity location |
//! | Price | skipped unless constrained; point-in-bounds or range-overlap |
//! | Attribute equals | case-insensitive equality, or membership for value sets |
//! | Tags all | every required value present, ignoring case |
//! | Keyword | whitespace tokens as substrings, combined with AND or OR |

mod catalog;
mod entity;
mod error;
mod evaluator;
mod filter_set;
mod ordering;
mod predicate;
pub mod range;
pub mod tags;
pub mod text;
mod traits;
mod validate;
mod value;

// Re-export public API
pub use catalog::{Facet, FacetCatalog, FacetValue};
pub use entity::{Entity, EntityBuilder, SearchableText, DESCRIPTION_EXCERPT_CHARS};
pub use error::{FacetError, Result};
pub use evaluator::{filter, matches, PredicateEvaluator};
pub use filter_set::{FilterSet, KeywordMode};
pub use ordering::{compare_by_orderings, paginate, sort_entities, Dir, OrderBy, SortKey};
pub use predicate::FilterPredicate;
pub use traits::Attributed;
pub use value::{AttributeValue, PriceRange, Timestamp};
