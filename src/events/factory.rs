//! Event factory
//!
//! The factory turns drafts into validated [`Event`] records. Drafts carry the
//! caller-supplied fields; anything left unset is filled in here (a fresh id,
//! the clock's current time). Required fields that are missing or invalid are
//! rejected with [`SimulationError::InvalidEventData`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::events::{AddToCartData, CheckoutData, Event, EventPayload, RemoveFromCartData, VisitData};
use crate::simulation::{Clock, SimulationError, SimulationResult};
use crate::types::timestamp::to_wire_precision;
use crate::types::{Browser, CheckoutStatus, CustomerId, EventId, EventType, OrderId, ProductId};

/// Draft of a visit event
#[derive(Debug, Clone)]
pub struct VisitDraft {
    /// Explicit event id; a random one is used when absent
    pub id: Option<EventId>,
    /// Visiting customer
    pub customer_id: CustomerId,
    /// Browser used for the visit
    pub browser: Browser,
    /// Visit time; the clock's current time when absent
    pub timestamp: Option<DateTime<Utc>>,
}

impl VisitDraft {
    /// Draft a visit by `customer_id` with `browser`
    pub fn new(customer_id: CustomerId, browser: Browser) -> Self {
        Self { id: None, customer_id, browser, timestamp: None }
    }

    /// Use an explicit event id
    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    /// Backdate or postdate the visit
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Draft of an add-to-cart or remove-from-cart event
#[derive(Debug, Clone)]
pub struct CartItemDraft {
    /// Explicit event id; a random one is used when absent
    pub id: Option<EventId>,
    /// Customer updating the cart
    pub customer_id: CustomerId,
    /// Product being added or removed
    pub item_id: ProductId,
    /// Either [`EventType::AddToCart`] or [`EventType::RemoveFromCart`]
    pub event_type: EventType,
    /// Units added; required for additions, ignored for removals
    pub quantity: Option<u32>,
    /// Event time; the clock's current time when absent
    pub timestamp: Option<DateTime<Utc>>,
}

impl CartItemDraft {
    /// Draft the addition of `quantity` units of `item_id`
    pub fn add(customer_id: CustomerId, item_id: ProductId, quantity: u32) -> Self {
        Self {
            id: None,
            customer_id,
            item_id,
            event_type: EventType::AddToCart,
            quantity: Some(quantity),
            timestamp: None,
        }
    }

    /// Draft the removal of `item_id`
    pub fn remove(customer_id: CustomerId, item_id: ProductId) -> Self {
        Self {
            id: None,
            customer_id,
            item_id,
            event_type: EventType::RemoveFromCart,
            quantity: None,
            timestamp: None,
        }
    }

    /// Use an explicit event id
    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the event time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Draft of a checkout event
#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    /// Explicit event id; a random one is used when absent
    pub id: Option<EventId>,
    /// Customer checking out
    pub customer_id: CustomerId,
    /// Order created by the checkout
    pub order_id: OrderId,
    /// Outcome of the checkout
    pub status: CheckoutStatus,
    /// Completion time carried in the payload; required
    pub timestamp: Option<DateTime<Utc>>,
    /// When the event itself was recorded; the clock's current time when absent
    pub recorded_at: Option<DateTime<Utc>>,
}

impl CheckoutDraft {
    /// Draft a checkout of `order_id` completing at `timestamp`
    pub fn new(
        customer_id: CustomerId,
        order_id: OrderId,
        status: CheckoutStatus,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            customer_id,
            order_id,
            status,
            timestamp: Some(timestamp),
            recorded_at: None,
        }
    }

    /// Use an explicit event id
    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the time the event was recorded
    pub fn recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }
}

/// Builds validated events, filling defaults from a clock
#[derive(Debug, Clone)]
pub struct EventFactory {
    clock: Arc<dyn Clock>,
}

impl EventFactory {
    /// Create a factory that stamps defaults from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Current time according to the factory's clock
    pub fn now(&self) -> DateTime<Utc> {
        to_wire_precision(self.clock.now())
    }

    /// Build a visit event
    pub fn visit(&self, draft: VisitDraft) -> SimulationResult<Event> {
        let timestamp = self.resolve_timestamp(draft.timestamp);
        let event = Event {
            id: draft.id.unwrap_or_default(),
            timestamp,
            customer_id: draft.customer_id,
            payload: EventPayload::Visit(VisitData { browser: draft.browser, timestamp }),
        };
        trace!("Built visit event {} for customer {}", event.id, event.customer_id);
        Ok(event)
    }

    /// Build an add-to-cart or remove-from-cart event
    pub fn cart_update(&self, draft: CartItemDraft) -> SimulationResult<Event> {
        let timestamp = self.resolve_timestamp(draft.timestamp);

        let payload = match draft.event_type {
            EventType::AddToCart => {
                let quantity = draft.quantity.ok_or_else(|| {
                    SimulationError::invalid_event_data("add_to_cart requires a quantity")
                })?;
                if quantity == 0 {
                    return Err(SimulationError::invalid_event_data(
                        "add_to_cart quantity must be at least 1",
                    ));
                }
                EventPayload::AddToCart(AddToCartData { item_id: draft.item_id, quantity, timestamp })
            }
            EventType::RemoveFromCart => {
                EventPayload::RemoveFromCart(RemoveFromCartData { item_id: draft.item_id, timestamp })
            }
            other => {
                return Err(SimulationError::invalid_event_data(format!(
                    "'{}' is not a cart update event type",
                    other
                )))
            }
        };

        let event = Event {
            id: draft.id.unwrap_or_default(),
            timestamp,
            customer_id: draft.customer_id,
            payload,
        };
        trace!("Built {} event {} for item {}", event.event_type(), event.id, draft.item_id);
        Ok(event)
    }

    /// Build a checkout event
    pub fn checkout(&self, draft: CheckoutDraft) -> SimulationResult<Event> {
        let checked_out_at = draft
            .timestamp
            .map(to_wire_precision)
            .ok_or_else(|| SimulationError::invalid_event_data("checkout requires a timestamp"))?;

        let event = Event {
            id: draft.id.unwrap_or_default(),
            timestamp: self.resolve_timestamp(draft.recorded_at),
            customer_id: draft.customer_id,
            payload: EventPayload::Checkout(CheckoutData {
                status: draft.status,
                order_id: draft.order_id,
                timestamp: checked_out_at,
            }),
        };
        trace!("Built checkout event {} for order {}", event.id, draft.order_id);
        Ok(event)
    }

    fn resolve_timestamp(&self, timestamp: Option<DateTime<Utc>>) -> DateTime<Utc> {
        timestamp.map(to_wire_precision).unwrap_or_else(|| self.now())
    }
}
