//! Value types carried by entities.
//!
//! [`AttributeValue`] holds a category-specific attribute, which is either a
//! single string or a set of strings. [`PriceRange`] is the budget window of a
//! wanted request, and [`Timestamp`] records when an entity was posted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A category-specific attribute value.
///
/// Attributes arrive from free-form per-category data, so the same key may be
/// stored as a scalar on one entity and as a list on another. Matching treats
/// both shapes uniformly through [`AttributeValue::as_slice`].
///
/// # Example
///
/// ```
/// use bazaar_facets::AttributeValue;
///
/// let single = AttributeValue::from("Full-time");
/// let many = AttributeValue::from(vec!["Aqua", "Vitz"]);
///
/// assert_eq!(single.as_slice(), ["Full-time".to_string()]);
/// assert!(many.contains_ignore_case("vitz"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A scalar value such as `employment_type: "Full-time"`.
    Single(String),
    /// A value set such as `model_name: ["Aqua"]`.
    Many(Vec<String>),
}

impl AttributeValue {
    /// Returns the value(s) as a slice; a scalar becomes a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            AttributeValue::Single(s) => std::slice::from_ref(s),
            AttributeValue::Many(values) => values,
        }
    }

    /// Iterates over the value(s) as string slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.as_slice().iter().map(String::as_str)
    }

    /// Returns `true` if this holds no usable value.
    ///
    /// An empty list, or a scalar that is blank, counts as empty.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|v| v.trim().is_empty())
    }

    /// Returns `true` if this is a scalar value.
    pub fn is_single(&self) -> bool {
        matches!(self, AttributeValue::Single(_))
    }

    /// Case-insensitive membership test.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.iter().any(|v| v.to_lowercase() == needle)
    }

    /// Returns the lower-cased value set.
    pub fn folded_set(&self) -> HashSet<String> {
        self.iter().map(str::to_lowercase).collect()
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Single(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Single(s.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::Many(values)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        AttributeValue::Many(values.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttributeValue {
    fn from(values: [&str; N]) -> Self {
        AttributeValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// A numeric window with optional bounds.
///
/// A `None` bound is unbounded on that side. Callers must not construct an
/// inverted range; [`Entity::validate`](crate::Entity::validate) rejects one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound, inclusive.
    pub min: Option<f64>,
    /// Upper bound, inclusive.
    pub max: Option<f64>,
}

impl PriceRange {
    /// Creates a range from optional bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        PriceRange { min, max }
    }

    /// Creates a range bounded on both sides.
    pub fn between(min: f64, max: f64) -> Self {
        PriceRange::new(Some(min), Some(max))
    }

    /// Creates a range bounded only from below.
    pub fn at_least(min: f64) -> Self {
        PriceRange::new(Some(min), None)
    }

    /// Creates a range bounded only from above.
    pub fn at_most(max: f64) -> Self {
        PriceRange::new(None, Some(max))
    }

    /// Returns `true` if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Posting time in milliseconds since the Unix epoch.
///
/// ```
/// use bazaar_facets::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
