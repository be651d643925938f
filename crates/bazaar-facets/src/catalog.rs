//! Facet catalog construction.
//!
//! A [`FacetCatalog`] lists the attribute keys observed across a corpus and,
//! for each key, the distinct values observed. Filter UIs use it to populate
//! dropdowns and tag pickers. It is a derived cache over a snapshot and is
//! never consulted during matching.

use std::collections::HashMap;

use serde::Serialize;

use crate::traits::Attributed;

/// A distinct value of one facet, with how many items carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// One attribute key and its observed values, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub key: String,
    pub values: Vec<FacetValue>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Facet {
    fn new(key: &str) -> Self {
        Facet {
            key: key.to_string(),
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn record(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&pos) => self.values[pos].count += 1,
            None => {
                self.index.insert(value.to_string(), self.values.len());
                self.values.push(FacetValue {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Iterates over the distinct values as string slices.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.value.as_str())
    }
}

/// Distinct attribute keys and values across a corpus.
///
/// Values are deduplicated exactly, so every spelling a caller might need for
/// equality matching is kept. Blank values are not recorded.
///
/// # Example
///
/// ```
/// use bazaar_facets::{Entity, FacetCatalog};
///
/// let corpus = vec![
///     Entity::builder("1").category("Vehicle").attribute("model_name", vec!["Aqua"]).build(),
///     Entity::builder("2").category("Vehicle").attribute("model_name", vec!["Vitz", "Aqua"]).build(),
/// ];
///
/// let catalog = FacetCatalog::build(&corpus);
/// assert_eq!(catalog.keys(), vec!["model_name"]);
/// assert_eq!(catalog.values("model_name"), vec!["Aqua", "Vitz"]);
/// assert_eq!(catalog.count("model_name", "Aqua"), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetCatalog {
    facets: Vec<Facet>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FacetCatalog {
    /// Builds a catalog over a corpus snapshot.
    ///
    /// The corpus is expected to hold one category; see
    /// [`FacetCatalog::by_category`] for a mixed corpus. An empty corpus gives
    /// an empty catalog.
    pub fn build<T: Attributed>(corpus: &[T]) -> Self {
        let mut catalog = FacetCatalog::default();
        for item in corpus {
            catalog.add(item);
        }
        tracing::debug!(
            items = corpus.len(),
            keys = catalog.facets.len(),
            "built facet catalog"
        );
        catalog
    }

    /// Builds one catalog per category, in first-seen category order.
    ///
    /// Items without a category are skipped; they belong to no category's
    /// facet list.
    pub fn by_category<T: Attributed>(corpus: &[T]) -> Vec<(String, FacetCatalog)> {
        let mut catalogs: Vec<(String, FacetCatalog)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for item in corpus {
            let Some(category) = item.facet_category() else {
                continue;
            };
            let pos = match index.get(category) {
                Some(&pos) => pos,
                None => {
                    index.insert(category.to_string(), catalogs.len());
                    catalogs.push((category.to_string(), FacetCatalog::default()));
                    catalogs.len() - 1
                }
            };
            catalogs[pos].1.add(item);
        }

        tracing::debug!(
            items = corpus.len(),
            categories = catalogs.len(),
            "built facet catalogs by category"
        );
        catalogs
    }

    fn add<T: Attributed>(&mut self, item: &T) {
        for key in item.attribute_keys() {
            let pos = match self.index.get(key) {
                Some(&pos) => pos,
                None => {
                    self.index.insert(key.to_string(), self.facets.len());
                    self.facets.push(Facet::new(key));
                    self.facets.len() - 1
                }
            };

            let Some(value) = item.attribute(key) else {
                continue;
            };

            // Count each value once per item even if it is repeated.
            let mut seen: Vec<&str> = Vec::new();
            for v in value.iter() {
                if v.trim().is_empty() || seen.contains(&v) {
                    continue;
                }
                seen.push(v);
                self.facets[pos].record(v);
            }
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the observed keys in first-seen order.
    pub fn keys(&self) -> Vec<&str> {
        self.facets.iter().map(|f| f.key.as_str()).collect()
    }

    /// Returns all facets in first-seen key order.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Returns the facet for `key`, if observed.
    pub fn facet(&self, key: &str) -> Option<&Facet> {
        self.index.get(key).map(|&pos| &self.facets[pos])
    }

    /// Returns every distinct value of `key`; empty for an unknown key.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.facet(key)
            .map(|f| f.value_names().collect())
            .unwrap_or_default()
    }

    /// Returns how many items carry `value` under `key`.
    pub fn count(&self, key: &str, value: &str) -> usize {
        self.facet(key)
            .and_then(|f| f.index.get(value).map(|&pos| f.values[pos].count))
            .unwrap_or(0)
    }

    /// Returns `true` if `value` was observed under `key`, ignoring case.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        let needle = value.to_lowercase();
        self.facet(key)
            .is_some_and(|f| f.value_names().any(|v| v.to_lowercase() == needle))
    }

    /// Returns up to `n` values of `key`, most common first.
    ///
    /// Ties keep first-seen order. This is a display helper; use
    /// [`FacetCatalog::values`] when every value is needed.
    pub fn top_values(&self, key: &str, n: usize) -> Vec<&FacetValue> {
        let Some(facet) = self.facet(key) else {
            return Vec::new();
        };
        let mut values: Vec<&FacetValue> = facet.values.iter().collect();
        values.sort_by(|a, b| b.count.cmp(&a.count));
        values.truncate(n);
        values
    }

    /// Number of observed keys.
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Returns `true` if no keys were observed.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}
