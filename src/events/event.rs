//! Customer events
//!
//! This module contains the event record and its kind-specific payloads.
//! On the wire an event is an object with the common fields plus an
//! `event_type` tag and an `event_data` object holding the payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Browser, CheckoutStatus, CustomerId, EventId, EventType, OrderId, ProductId};

/// Payload of a storefront visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitData {
    /// Browser used for the visit
    pub browser: Browser,
    /// When the visit happened
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Payload of an add-to-cart event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartData {
    /// Product added to the cart
    pub item_id: ProductId,
    /// Number of units added (always >= 1)
    pub quantity: u32,
    /// When the product was added
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Payload of a remove-from-cart event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromCartData {
    /// Product removed from the cart
    pub item_id: ProductId,
    /// When the product was removed
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Payload of a checkout event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutData {
    /// Outcome of the checkout
    pub status: CheckoutStatus,
    /// Order created by the checkout
    pub order_id: OrderId,
    /// When the checkout completed
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Kind-specific part of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", content = "event_data", rename_all = "snake_case")]
pub enum EventPayload {
    /// Storefront visit
    Visit(VisitData),
    /// Product added to the cart
    AddToCart(AddToCartData),
    /// Product removed from the cart
    RemoveFromCart(RemoveFromCartData),
    /// Checkout attempt
    Checkout(CheckoutData),
}

impl EventPayload {
    /// Event type tag of this payload
    pub fn event_type(&self) -> EventType {
        match self {
            EventPayload::Visit(_) => EventType::Visit,
            EventPayload::AddToCart(_) => EventType::AddToCart,
            EventPayload::RemoveFromCart(_) => EventType::RemoveFromCart,
            EventPayload::Checkout(_) => EventType::Checkout,
        }
    }

    /// Timestamp carried inside the payload
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            EventPayload::Visit(data) => data.timestamp,
            EventPayload::AddToCart(data) => data.timestamp,
            EventPayload::RemoveFromCart(data) => data.timestamp,
            EventPayload::Checkout(data) => data.timestamp,
        }
    }
}

/// A single customer event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Unique identifier for the event
    pub id: EventId,
    /// When the event was recorded
    #[serde(with = "crate::types::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Customer the event belongs to
    pub customer_id: CustomerId,
    /// Kind-specific payload, flattened into `event_type` + `event_data`
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl Event {
    /// Event type tag
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }

    /// Product referenced by a cart event
    pub fn item_id(&self) -> Option<ProductId> {
        match &self.payload {
            EventPayload::AddToCart(data) => Some(data.item_id),
            EventPayload::RemoveFromCart(data) => Some(data.item_id),
            _ => None,
        }
    }

    /// Whether this is an event of the given type
    pub fn is(&self, event_type: EventType) -> bool {
        self.event_type() == event_type
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Event::from_wire(&value).map_err(serde::de::Error::custom)
    }
}
