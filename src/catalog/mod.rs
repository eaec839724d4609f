//! Product catalog and output sinks
//!
//! This module holds the storage-facing side of the simulator: where product
//! ids come from and where generated batches go.
//!
//! # Overview
//!
//! - **Product**: A catalog product with name and price
//! - **ProductSource**: Supplies random product ids to the simulation engine
//! - **ProductCatalog**: In-memory catalog seeded from a JSON file or the built-in list
//! - **EventSink**: Persists batches as customer, event and line-item tables
//!
//! # Usage Example
//!
//! ```rust
//! use chrono::Utc;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use storefront_event_simulator::catalog::*;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let catalog = ProductCatalog::builtin(&mut rng, Utc::now()).unwrap();
//! let ids = catalog.fetch_random_product_ids(3, &mut rng).unwrap();
//! assert_eq!(ids.len(), 3);
//!
//! let mut sink = WriterSink::new(Vec::new());
//! sink.write_batch(&[]).unwrap();
//! assert_eq!(sink.records_written(), 0);
//! ```

pub mod product;
pub mod sink;
pub mod source;

// Re-export all public types for convenience
pub use product::*;
pub use sink::*;
pub use source::*;
