//! Customer events and per-customer datasets
//!
//! This module holds the event records emitted by the simulation, the factory
//! that builds them, and their wire/native rendering.
//!
//! # Overview
//!
//! - **Event**: A visit, cart update or checkout tied to one customer
//! - **CustomerDataset**: A customer with their events and optional order
//! - **EventFactory**: Builds validated events from drafts, stamping defaults from a clock
//! - **render**: Wire (JSON) or native rendering, plus [`Event::from_wire`] parsing
//!
//! # Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_event_simulator::events::*;
//! use storefront_event_simulator::simulation::SystemClock;
//! use storefront_event_simulator::types::*;
//!
//! let factory = EventFactory::new(Arc::new(SystemClock));
//! let visit = factory
//!     .visit(VisitDraft::new(CustomerId::new(), Browser::Chrome))
//!     .unwrap();
//!
//! let wire = render(&visit, RenderMode::Wire).unwrap().into_wire().unwrap();
//! assert_eq!(wire["event_type"], "visit");
//! assert_eq!(Event::from_wire(&wire).unwrap(), visit);
//! ```

pub mod dataset;
pub mod event;
pub mod factory;
pub mod render;

// Re-export all public types for convenience
pub use dataset::*;
pub use event::*;
pub use factory::*;
pub use render::*;
