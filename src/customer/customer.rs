//! Core customer record
//!
//! This module contains the Customer struct and its validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::timestamp::to_wire_precision;
use crate::types::CustomerId;

/// A synthetic storefront customer
///
/// Created once per generated dataset and never mutated afterwards; its id
/// is the foreign key of every event in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for the customer
    pub id: CustomerId,
    /// When the customer record was created
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Login name
    pub username: String,
    /// Contact email address
    pub email: String,
    /// City the customer shops from
    pub location: String,
}

impl Customer {
    /// Create a validated customer record
    ///
    /// The timestamp is truncated to the microsecond precision carried on the wire.
    pub fn new(
        id: CustomerId,
        timestamp: DateTime<Utc>,
        username: impl Into<String>,
        email: impl Into<String>,
        location: impl Into<String>,
    ) -> SimulationResult<Self> {
        let customer = Self {
            id,
            timestamp: to_wire_precision(timestamp),
            username: username.into(),
            email: email.into(),
            location: location.into(),
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Check the record against its schema
    pub fn validate(&self) -> SimulationResult<()> {
        if self.username.trim().is_empty() {
            return Err(SimulationError::invalid_event_data("customer username is empty"));
        }
        if !is_plausible_email(&self.email) {
            return Err(SimulationError::invalid_event_data(format!(
                "customer email '{}' is not a valid address",
                self.email
            )));
        }
        if self.location.trim().is_empty() {
            return Err(SimulationError::invalid_event_data("customer location is empty"));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
