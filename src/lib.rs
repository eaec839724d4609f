//! Storefront Event Simulator
//!
//! Synthesizes realistic e-commerce customer-behavior event streams (site
//! visits, cart mutations, checkouts) for seeding analytics or test databases.
//!
//! # Overview
//!
//! Each synthetic customer is generated together with a causally plausible
//! sequence of events: optional backdated historic visits, live visits, cart
//! activity over products drawn from a catalog, and an optional checkout that
//! may be abandoned. Completed checkouts produce an order with line items.
//!
//! ## Key Features
//!
//! - **Reproducible Runs**: All randomness flows through one explicitly seeded stream
//! - **Typed Events**: A tagged union of visit, cart and checkout payloads
//! - **Wire Rendering**: Canonical JSON with string ids and microsecond timestamps
//! - **Pluggable Storage**: Product sources and output sinks behind traits
//! - **Configurable Simulation**: Probabilities and count ranges from CLI, file or defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use storefront_event_simulator::*;
//!
//! let config = SimulationConfig {
//!     customer_count: 10,
//!     ..Default::default()
//! };
//!
//! let clock = Arc::new(SystemClock);
//! let catalog = ProductCatalog::builtin(&mut StdRng::seed_from_u64(1), clock.now())?;
//! let simulator = CustomerSimulator::new(config, EventFactory::new(clock), Arc::new(catalog))?;
//!
//! let mut runner = SimulationRunner::new(simulator);
//! let batch = runner.run_simulation(10, Some(42))?;
//! println!("{}", runner.statistics().summary());
//!
//! let mut sink = WriterSink::new(Vec::new());
//! sink.write_batch(&batch)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, timestamp wire format and configuration
//! - [`customer`]: Customer records and profile generation
//! - [`events`]: Event records, datasets, the event factory and rendering
//! - [`catalog`]: Products, product sources and output sinks
//! - [`simulation`]: Engine, batch driver, statistics, clock, logging and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Customer   │    │   Events    │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Records     │◄───┤ Factory     │
//! │ Enums       │    │ Generator   │    │ Datasets    │
//! │ Config      │    │             │    │ Rendering   │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              ▲
//!                                              │
//!                    ┌─────────────┐    ┌─────────────┐
//!                    │   Catalog   │    │ Simulation  │
//!                    │             │    │             │
//!                    │ Products    │◄───┤ Engine      │
//!                    │ Sources     │    │ Runner      │
//!                    │ Sinks       │    │ Statistics  │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod catalog;
pub mod customer;
pub mod events;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    // Enums
    Browser,
    CheckoutStatus,
    // Configuration
    ConfigValidationError,
    // Identifiers
    CustomerId,
    EventId,
    EventType,
    OrderId,
    OutputFormat,
    ProductId,
    RenderMode,
    SimulationConfig,
};

// Customers
pub use customer::{Customer, CustomerGenerator};

// Events and rendering
pub use events::{
    render, CustomerDataset, Event, EventFactory, EventPayload, LineItem, Order, Rendered,
};

// Catalog and sinks
pub use catalog::{
    DirectorySink, EventSink, FlattenedBatch, Product, ProductCatalog, ProductSource, WriterSink,
};

// Simulation types and functionality
pub use simulation::{
    BatchStatistics, Clock, CustomerSimulator, FixedClock, SimulationError, SimulationResult,
    SimulationRunner, SystemClock,
};
