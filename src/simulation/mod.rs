//! Simulation engine and batch control
//!
//! This module contains the per-customer simulation engine, the batch driver,
//! statistics collection, temporal utilities, the clock abstraction, logging
//! setup and error handling.
//!
//! # Overview
//!
//! - **CustomerSimulator**: Generates one customer's dataset through the fixed phase sequence
//! - **SimulationRunner**: Owns the randomness stream and runs the engine `n` times
//! - **BatchStatistics**: Collects and reports per-run counters
//! - **Clock**: Supplies "now", either from the system or pinned to a fixed instant
//! - **SimulationError**: Error taxonomy shared by every component
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::Utc;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use storefront_event_simulator::catalog::ProductCatalog;
//! use storefront_event_simulator::events::EventFactory;
//! use storefront_event_simulator::simulation::*;
//! use storefront_event_simulator::types::SimulationConfig;
//!
//! let clock = FixedClock::new(Utc::now());
//! let catalog = ProductCatalog::builtin(&mut StdRng::seed_from_u64(1), clock.now()).unwrap();
//! let simulator = CustomerSimulator::new(
//!     SimulationConfig::default(),
//!     EventFactory::new(Arc::new(clock)),
//!     Arc::new(catalog),
//! )
//! .unwrap();
//!
//! let mut runner = SimulationRunner::new(simulator);
//! let batch = runner.run_simulation(5, Some(42)).unwrap();
//! assert_eq!(batch.len(), 5);
//! ```

pub mod clock;
pub mod engine;
pub mod error;
pub mod logging;
pub mod runner;
pub mod statistics;
pub mod temporal;

// Re-export all public types for convenience
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use runner::*;
pub use statistics::*;
