//! Boundary validation for untrusted input.
//!
//! Matching does not re-validate its inputs. A calling layer that builds
//! entities or filter sets from HTTP parameters or JSON bodies runs these
//! checks first and rejects bad input before evaluation.

use crate::entity::Entity;
use crate::error::{FacetError, Result};
use crate::filter_set::FilterSet;

fn finite(value: Option<f64>, field: &'static str) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(FacetError::NonFiniteNumber { field }),
        _ => Ok(()),
    }
}

fn ordered(min: Option<f64>, max: Option<f64>, field: &'static str) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(FacetError::InvertedRange { field, min, max }),
        _ => Ok(()),
    }
}

impl Entity {
    /// Checks the invariants matching relies on.
    ///
    /// ```
    /// use bazaar_facets::{Entity, FacetError, PriceRange};
    ///
    /// let bad = Entity::builder("W-1").price_range(PriceRange::between(10.0, 5.0)).build();
    /// assert!(matches!(bad.validate(), Err(FacetError::InvertedRange { .. })));
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.id().trim().is_empty() {
            return Err(FacetError::EmptyIdentifier);
        }
        finite(self.price_value(), "price")?;
        if let Some(range) = self.price_range() {
            finite(range.min, "price_range.min")?;
            finite(range.max, "price_range.max")?;
            ordered(range.min, range.max, "price_range")?;
        }
        Ok(())
    }
}

impl FilterSet {
    /// Checks that the price bounds are usable.
    ///
    /// Bounds are only ordered-checked when price is a constraint; unused
    /// bounds may be kept around for display.
    pub fn validate(&self) -> Result<()> {
        finite(self.price_min, "price_min")?;
        finite(self.price_max, "price_max")?;
        if self.price_is_constraint {
            ordered(self.price_min, self.price_max, "price")?;
        }
        Ok(())
    }
}
