//! Per-customer datasets
//!
//! This module contains the unit of output of the simulation engine: one
//! customer, the ordered sequence of that customer's events, and the order
//! produced by a completed checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::events::{Event, EventPayload};
use crate::types::{CheckoutStatus, CustomerId, EventType, OrderId, ProductId};

/// A single order line derived from an add-to-cart event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ordered
    pub item_id: ProductId,
    /// Units ordered
    pub quantity: u32,
    /// Order the line belongs to
    pub order_id: OrderId,
}

/// Order created by a checkout that was not abandoned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier for the order
    pub order_id: OrderId,
    /// Outcome of the checkout
    pub status: CheckoutStatus,
    /// When the checkout completed
    #[serde(with = "crate::types::timestamp")]
    pub checked_out_at: DateTime<Utc>,
    /// One line per add-to-cart event of the customer
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Total units across all lines
    pub fn total_quantity(&self) -> u32 {
        self.line_items.iter().map(|line| line.quantity).sum()
    }
}

/// Everything generated for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDataset {
    /// The customer anchoring every event
    pub customer: Customer,
    /// Events in generation order
    pub events: Vec<Event>,
    /// Order produced by a completed checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    /// Whether a checkout was decided and then abandoned
    #[serde(default)]
    pub checkout_abandoned: bool,
}

impl CustomerDataset {
    /// Start a dataset for `customer` with no events
    pub fn new(customer: Customer) -> Self {
        Self { customer, events: Vec::new(), order: None, checkout_abandoned: false }
    }

    /// Identifier of the dataset's customer
    pub fn customer_id(&self) -> CustomerId {
        self.customer.id
    }

    /// Append an event in generation order
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events of a given type, in generation order
    pub fn events_of(&self, event_type: EventType) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.is(event_type))
    }

    /// Number of events of a given type
    pub fn count(&self, event_type: EventType) -> usize {
        self.events_of(event_type).count()
    }

    /// The checkout event, if one survived
    pub fn checkout(&self) -> Option<&Event> {
        self.events_of(EventType::Checkout).next()
    }

    /// Whether more products were added to the cart than removed
    pub fn cart_is_net_positive(&self) -> bool {
        self.count(EventType::AddToCart) > self.count(EventType::RemoveFromCart)
    }

    /// Whether every event points back at the dataset's customer
    pub fn is_referentially_consistent(&self) -> bool {
        let customer_id = self.customer_id();
        self.events.iter().all(|event| event.customer_id == customer_id)
            && self
                .order
                .as_ref()
                .map_or(true, |order| order.line_items.iter().all(|line| line.order_id == order.order_id))
    }

    /// One line item per add-to-cart event, bound to `order_id`
    ///
    /// Products later removed from the cart still produce a line; downstream
    /// consumers rely on this double count.
    pub fn line_items_for(&self, order_id: OrderId) -> Vec<LineItem> {
        self.events
            .iter()
            .filter_map(|event| match &event.payload {
                EventPayload::AddToCart(data) => Some(LineItem {
                    item_id: data.item_id,
                    quantity: data.quantity,
                    order_id,
                }),
                _ => None,
            })
            .collect()
    }
}
