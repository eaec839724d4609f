//! Customer generation
//!
//! This module invents customer profiles from the injected randomness stream,
//! so seeded runs produce the same customers.

use chrono::{DateTime, Utc};
use fake::faker::address::en::CityName;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::Fake;
use rand::Rng;
use tracing::trace;

use crate::customer::Customer;
use crate::simulation::SimulationResult;
use crate::types::CustomerId;

/// Generator for synthetic customer profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerGenerator;

impl CustomerGenerator {
    /// Create a new customer generator
    pub fn new() -> Self {
        Self
    }

    /// Generate one customer created at `created_at`
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        created_at: DateTime<Utc>,
    ) -> SimulationResult<Customer> {
        let id = CustomerId::from_rng(rng);
        let username = compact(Username().fake_with_rng::<String, _>(rng));
        let email = compact(FreeEmail().fake_with_rng::<String, _>(rng)).to_lowercase();
        let location: String = CityName().fake_with_rng(rng);

        trace!("Generated customer {} ({}, {})", id, username, location);
        Customer::new(id, created_at, username, email, location)
    }
}

fn compact(value: String) -> String {
    value.split_whitespace().collect()
}
