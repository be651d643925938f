//! Stored listing and wanted-request records.
//!
//! Corpus files are JSON arrays of records. Each record is validated and
//! mapped into the engine's common [`Entity`] shape before any matching runs:
//! listings carry a point price, wanted requests carry a budget window.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bazaar_facets::{AttributeValue, Entity, FacetError, PriceRange, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("record '{id}' is invalid")]
    InvalidRecord {
        id: String,
        #[source]
        source: FacetError,
    },
}

/// A record that can be mapped into an [`Entity`].
pub trait Record: DeserializeOwned {
    /// Identifier used in error messages.
    fn id(&self) -> &str;

    /// Maps the record without validating it.
    fn to_entity(&self) -> Entity;

    /// Checks rules specific to this kind of record.
    fn check(&self) -> Result<(), FacetError> {
        Ok(())
    }

    /// Maps and validates the record.
    fn into_valid_entity(self) -> Result<Entity, CorpusError>
    where
        Self: Sized,
    {
        let entity = self.to_entity();
        self.check()
            .and_then(|()| entity.validate())
            .map_err(|source| CorpusError::InvalidRecord {
                id: self.id().to_string(),
                source,
            })?;
        Ok(entity)
    }
}

/// A published listing as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Shown as "negotiable" on the listing page; the asking price still applies.
    #[serde(default)]
    pub negotiable: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub posted_at: Option<i64>,
}

impl Record for ListingRecord {
    fn id(&self) -> &str {
        &self.id
    }

    /// Listings always carry a concrete category.
    fn check(&self) -> Result<(), FacetError> {
        if self.category.trim().is_empty() {
            return Err(FacetError::InvalidParameter {
                name: "category".to_string(),
                reason: "a listing must have a category".to_string(),
            });
        }
        Ok(())
    }

    fn to_entity(&self) -> Entity {
        let mut builder = Entity::builder(&self.id)
            .title(&self.title)
            .description(&self.description)
            .category(&self.category)
            .attributes(self.attributes.clone());
        if !self.location.trim().is_empty() {
            builder = builder.location(&self.location);
        }
        if let Some(price) = self.price {
            builder = builder.price(price);
        }
        if let Some(ts) = self.posted_at {
            builder = builder.posted_at(Timestamp::from_millis(ts));
        }
        builder.build()
    }
}

/// A buyer's standing wanted request as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Absent when the request applies to any category.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    /// The buyer ticked "any budget".
    #[serde(default)]
    pub any_budget: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default)]
    pub posted_at: Option<i64>,
}

impl Record for WantedRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_entity(&self) -> Entity {
        let mut builder = Entity::builder(&self.id)
            .title(&self.title)
            .description(&self.description)
            .maybe_category(self.category.clone())
            .locations(self.locations.iter().filter(|l| !l.trim().is_empty()))
            .price_unconstrained(self.any_budget)
            .attributes(self.attributes.clone());
        if self.budget_min.is_some() || self.budget_max.is_some() {
            builder = builder.price_range(PriceRange::new(self.budget_min, self.budget_max));
        }
        if let Some(ts) = self.posted_at {
            builder = builder.posted_at(Timestamp::from_millis(ts));
        }
        builder.build()
    }
}

/// Parses a JSON array of records into validated entities.
pub fn parse_corpus<R: Record>(json: &str, path: &Path) -> Result<Vec<Entity>, CorpusError> {
    let records: Vec<R> = serde_json::from_str(json).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    records.into_iter().map(Record::into_valid_entity).collect()
}

/// Reads a corpus file of records into validated entities.
pub fn load_corpus<R: Record>(path: &Path) -> Result<Vec<Entity>, CorpusError> {
    let json = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entities = parse_corpus::<R>(&json, path)?;
    tracing::debug!(path = %path.display(), records = entities.len(), "loaded corpus");
    Ok(entities)
}
