//! Numeric range comparison.
//!
//! Two modes, chosen by the shape of the entity's price:
//!
//! - [`point_in_bounds`]: the entity has one asking price and the filter has a
//!   window. Standard listing search.
//! - [`ranges_overlap`]: the entity has a budget window of its own. The
//!   question is whether the buyer's acceptable range intersects the searched
//!   one, not whether one contains the other.
//!
//! The two are kept distinct on purpose; they answer different questions.
//! A `None` bound is unbounded on that side. Inputs must already be finite.

/// Tests a single value against an optional window.
///
/// An absent value passes; callers decide beforehand whether price is
/// checked at all.
///
/// ```
/// use bazaar_facets::range::point_in_bounds;
///
/// assert!(point_in_bounds(Some(5.0), None, None));
/// assert!(!point_in_bounds(Some(5.0), Some(10.0), None));
/// assert!(!point_in_bounds(Some(5.0), None, Some(3.0)));
/// ```
pub fn point_in_bounds(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(value) = value else {
        return true;
    };
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Tests whether two inclusive windows intersect.
///
/// Symmetric in its two windows.
///
/// ```
/// use bazaar_facets::range::ranges_overlap;
///
/// // buyer accepts 100k..200k, search is 150k..300k
/// assert!(ranges_overlap(Some(100_000.0), Some(200_000.0), Some(150_000.0), Some(300_000.0)));
/// assert!(!ranges_overlap(Some(100_000.0), Some(200_000.0), Some(250_000.0), Some(300_000.0)));
/// ```
pub fn ranges_overlap(
    entity_min: Option<f64>,
    entity_max: Option<f64>,
    filter_min: Option<f64>,
    filter_max: Option<f64>,
) -> bool {
    let upper_reaches = match (entity_max, filter_min) {
        (Some(hi), Some(lo)) => hi >= lo,
        _ => true,
    };
    let lower_reaches = match (entity_min, filter_max) {
        (Some(lo), Some(hi)) => lo <= hi,
        _ => true,
    };
    upper_reaches && lower_reaches
}
