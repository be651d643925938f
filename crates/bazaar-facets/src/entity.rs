//! The common shape of a listing and a wanted request.
//!
//! Both published listings and buyers' standing wanted requests are mapped
//! into an [`Entity`] before matching. A listing carries a single asking price
//! in `price_value`; a wanted request carries a budget window in `price_range`
//! and may mark price as irrelevant with `price_unconstrained`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::traits::Attributed;
use crate::value::{AttributeValue, PriceRange, Timestamp};

/// Number of description characters folded into the searchable text.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 200;

/// A listing or wanted request in the engine's common shape.
///
/// Entities are immutable value objects. Build them with [`Entity::builder`],
/// which derives the case-folded searchable text once. Fields are read-only.
///
/// # Example
///
/// ```
/// use bazaar_facets::Entity;
///
/// let car = Entity::builder("L-1")
///     .title("Toyota Aqua 2015")
///     .category("Vehicle")
///     .location("Colombo")
///     .price(1_500_000.0)
///     .attribute("model_name", vec!["Aqua"])
///     .build();
///
/// assert_eq!(car.title(), "Toyota Aqua 2015");
/// assert!(car.searchable_text().contains("toyota aqua"));
/// assert!(car.searchable_text().contains("colombo"));
/// ```
///
/// Fields cannot be reassigned after building:
///
/// ```compile_fail
/// let mut car = bazaar_facets::Entity::builder("L-1").title("Toyota Aqua").build();
/// car.title = "Honda Fit".to_string();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    id: String,
    category: Option<String>,
    locations: Vec<String>,
    price_value: Option<f64>,
    price_range: Option<PriceRange>,
    price_unconstrained: bool,
    attributes: BTreeMap<String, AttributeValue>,
    title: String,
    posted_at: Option<Timestamp>,
    #[serde(skip)]
    searchable_text: String,
}

impl Entity {
    /// Starts building an entity with the given identifier.
    pub fn builder(id: impl Into<String>) -> EntityBuilder {
        EntityBuilder::new(id)
    }

    /// Opaque unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the category, treating an empty string as absent.
    ///
    /// `None` on a wanted request means "any category".
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Free-text locations; any one of them is acceptable.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Asking price of a point-valued entity.
    pub fn price_value(&self) -> Option<f64> {
        self.price_value
    }

    /// Budget window of a range-valued entity.
    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    /// Whether price never disqualifies this entity.
    pub fn is_price_unconstrained(&self) -> bool {
        self.price_unconstrained
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// When the entity was posted, if known.
    pub fn posted_at(&self) -> Option<Timestamp> {
        self.posted_at
    }

    /// Returns the case-folded text eligible for keyword search.
    pub fn searchable_text(&self) -> &str {
        &self.searchable_text
    }

    /// Returns the value used when sorting by price.
    ///
    /// That is the asking price, else the lower budget bound, else the upper.
    pub fn price_sort_value(&self) -> Option<f64> {
        self.price_value
            .or_else(|| self.price_range.and_then(|r| r.min.or(r.max)))
    }
}

impl Attributed for Entity {
    fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    fn attribute_keys(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    fn facet_category(&self) -> Option<&str> {
        self.category()
    }
}

/// Builder for [`Entity`].
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    id: String,
    category: Option<String>,
    locations: Vec<String>,
    price_value: Option<f64>,
    price_range: Option<PriceRange>,
    price_unconstrained: bool,
    attributes: BTreeMap<String, AttributeValue>,
    title: String,
    description: String,
    posted_at: Option<Timestamp>,
    searchable_text: Option<String>,
}

impl EntityBuilder {
    /// Creates a builder with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        EntityBuilder {
            id: id.into(),
            ..EntityBuilder::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description; only an excerpt is searchable.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets an optional category, as carried by wanted requests.
    pub fn maybe_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Appends one location.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.locations.push(location.into());
        self
    }

    /// Appends several locations.
    pub fn locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(locations.into_iter().map(Into::into));
        self
    }

    /// Sets a single asking price.
    pub fn price(mut self, price: f64) -> Self {
        self.price_value = Some(price);
        self
    }

    /// Sets a budget window.
    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Marks price as never disqualifying for this entity.
    pub fn price_unconstrained(mut self, unconstrained: bool) -> Self {
        self.price_unconstrained = unconstrained;
        self
    }

    /// Sets an attribute, replacing any previous value under the same key.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets all attributes at once.
    pub fn attributes(mut self, attributes: BTreeMap<String, AttributeValue>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn posted_at(mut self, ts: Timestamp) -> Self {
        self.posted_at = Some(ts);
        self
    }

    /// Supplies precomputed searchable text instead of deriving it.
    ///
    /// The text is still case-folded.
    pub fn searchable_text(mut self, text: impl Into<String>) -> Self {
        self.searchable_text = Some(text.into());
        self
    }

    /// Finishes the entity, deriving the searchable text unless overridden.
    pub fn build(self) -> Entity {
        let searchable_text = match self.searchable_text {
            Some(text) => text.to_lowercase(),
            None => {
                let mut text = SearchableText::new();
                text.push(&self.title);
                text.push_excerpt(&self.description, DESCRIPTION_EXCERPT_CHARS);
                if let Some(category) = &self.category {
                    text.push(category);
                }
                for location in &self.locations {
                    text.push(location);
                }
                for value in self.attributes.values() {
                    for v in value.iter() {
                        text.push(v);
                    }
                }
                text.finish()
            }
        };

        Entity {
            id: self.id,
            category: self.category,
            locations: self.locations,
            price_value: self.price_value,
            price_range: self.price_range,
            price_unconstrained: self.price_unconstrained,
            attributes: self.attributes,
            title: self.title,
            posted_at: self.posted_at,
            searchable_text,
        }
    }
}

/// Accumulates the fields that keyword search may look at.
///
/// Parts are joined with single spaces and the result is lower-cased, so a
/// query token can only match across a field boundary if it contains a space,
/// which tokens never do.
#[derive(Debug, Clone, Default)]
pub struct SearchableText {
    parts: Vec<String>,
}

impl SearchableText {
    pub fn new() -> Self {
        SearchableText::default()
    }

    /// Adds a field; blank input is ignored.
    pub fn push(&mut self, part: &str) {
        let trimmed = part.trim();
        if !trimmed.is_empty() {
            self.parts.push(trimmed.to_string());
        }
    }

    /// Adds at most `max_chars` characters of `part`.
    pub fn push_excerpt(&mut self, part: &str, max_chars: usize) {
        let excerpt: String = part.chars().take(max_chars).collect();
        self.push(&excerpt);
    }

    /// Joins the parts and case-folds the result.
    pub fn finish(self) -> String {
        self.parts.join(" ").to_lowercase()
    }
}
