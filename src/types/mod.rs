//! Core types and identifiers for the storefront event simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based identifiers for customers, events, products and orders
//! - **Enums**: Closed value sets for event kinds, browsers and checkout outcomes
//! - **Timestamps**: The microsecond ISO-8601 wire format
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use storefront_event_simulator::types::*;
//!
//! let customer_id = CustomerId::new();
//! let browser: Browser = "firefox".parse().unwrap();
//! assert_eq!(browser, Browser::Firefox);
//!
//! let config = SimulationConfig {
//!     customer_count: 25,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! # let _ = customer_id;
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod timestamp;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
