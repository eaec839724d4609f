//! Customer modeling and generation
//!
//! This module contains the customer record that anchors every event of a
//! simulated dataset, and the generator that invents plausible profiles.
//!
//! # Usage Example
//!
//! ```rust
//! use storefront_event_simulator::customer::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let generator = CustomerGenerator::new();
//! let customer = generator.generate(&mut rng, chrono::Utc::now()).unwrap();
//! assert!(customer.email.contains('@'));
//! ```

#[allow(clippy::module_inception)]
pub mod customer;
pub mod generator;

// Re-export all public types for convenience
pub use customer::Customer;
pub use generator::CustomerGenerator;
