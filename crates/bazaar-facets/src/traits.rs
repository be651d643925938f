//! The "has attributes" capability.
//!
//! Attribute keys are data-driven and differ per category, so the engine does
//! not model per-category types. Anything that can look up an attribute by key
//! implements [`Attributed`], and the facet catalog is built over that trait.

use std::collections::{BTreeMap, HashMap};

use crate::value::AttributeValue;

/// Trait for types that carry a category-specific attribute bag.
///
/// Lookups are permissive: an unknown key is simply `None`, never an error.
///
/// # Manual Implementation
///
/// ```
/// use bazaar_facets::{Attributed, AttributeValue};
///
/// struct Job {
///     employment_type: AttributeValue,
/// }
///
/// impl Attributed for Job {
///     fn attribute(&self, key: &str) -> Option<&AttributeValue> {
///         match key {
///             "employment_type" => Some(&self.employment_type),
///             _ => None,
///         }
///     }
///
///     fn attribute_keys(&self) -> Vec<&str> {
///         vec!["employment_type"]
///     }
/// }
///
/// let job = Job { employment_type: "Full-time".into() };
/// assert!(job.attribute("salary_band").is_none());
/// ```
pub trait Attributed {
    /// Returns the value stored under `key`, if any.
    fn attribute(&self, key: &str) -> Option<&AttributeValue>;

    /// Returns the keys present on this item.
    ///
    /// The order is used as the "first seen" order when building a catalog,
    /// so implementations should return a stable order.
    fn attribute_keys(&self) -> Vec<&str>;

    /// Returns the category this item belongs to, if it has one.
    fn facet_category(&self) -> Option<&str> {
        None
    }
}

impl Attributed for BTreeMap<String, AttributeValue> {
    fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.get(key)
    }

    fn attribute_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

impl Attributed for HashMap<String, AttributeValue> {
    fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.get(key)
    }

    // HashMap iteration order is arbitrary; sort so catalogs are reproducible.
    fn attribute_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
