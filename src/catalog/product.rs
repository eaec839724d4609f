//! Product records
//!
//! Products are what customers add to their carts. Only their ids take part
//! in event generation; names and prices are carried for the catalog itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::timestamp::to_wire_precision;
use crate::types::ProductId;

/// A product available in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product
    pub id: ProductId,
    /// When the product record was created
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Display name
    pub name: String,
    /// Unit price, rendered with two decimals
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

impl Product {
    /// Create a validated product
    pub fn new(
        id: ProductId,
        timestamp: DateTime<Utc>,
        name: impl Into<String>,
        price: f64,
    ) -> SimulationResult<Self> {
        let product = Self { id, timestamp: to_wire_precision(timestamp), name: name.into(), price };
        product.validate()?;
        Ok(product)
    }

    /// Check the product's name and price
    pub fn validate(&self) -> SimulationResult<()> {
        if self.name.trim().is_empty() {
            return Err(SimulationError::invalid_event_data(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SimulationError::invalid_event_data(format!(
                "product '{}' has invalid price {}",
                self.name, self.price
            )));
        }
        Ok(())
    }
}

/// A catalog entry as stored in a product file: `{"name": ..., "price": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
}

impl ProductEntry {
    /// Create a catalog entry
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(), price }
    }
}

fn serialize_price<S>(price: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64((price * 100.0).round() / 100.0)
}
