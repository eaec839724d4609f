//! Wire and native rendering
//!
//! Records leave the process as JSON values (`Wire`) or stay typed for
//! in-process consumers (`Native`). Events coming back from the wire are
//! parsed by [`Event::from_wire`], which classifies failures: unparseable
//! ids and timestamps are malformed input, while missing fields and unknown
//! enum names are invalid event data.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::events::{
    AddToCartData, CheckoutData, Event, EventPayload, RemoveFromCartData, VisitData,
};
use crate::simulation::temporal::parse_timestamp;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{
    parse_uuid, Browser, CheckoutStatus, CustomerId, EventId, EventType, OrderId, ProductId,
    RenderMode,
};

/// A record rendered in one of the two output modes
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<T> {
    /// JSON value with string ids and timestamps
    Wire(Value),
    /// The typed record itself
    Native(T),
}

impl<T> Rendered<T> {
    /// The wire value, if rendered in wire mode
    pub fn into_wire(self) -> Option<Value> {
        match self {
            Rendered::Wire(value) => Some(value),
            Rendered::Native(_) => None,
        }
    }

    /// The typed record, if rendered in native mode
    pub fn into_native(self) -> Option<T> {
        match self {
            Rendered::Wire(_) => None,
            Rendered::Native(record) => Some(record),
        }
    }
}

/// Render `record` in the requested mode
pub fn render<T>(record: &T, mode: RenderMode) -> SimulationResult<Rendered<T>>
where
    T: Serialize + Clone,
{
    match mode {
        RenderMode::Wire => Ok(Rendered::Wire(serde_json::to_value(record)?)),
        RenderMode::Native => Ok(Rendered::Native(record.clone())),
    }
}

impl Event {
    /// Render this event as a wire value
    pub fn to_wire(&self) -> SimulationResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse an event from its wire representation
    pub fn from_wire(value: &Value) -> SimulationResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| SimulationError::invalid_event_data("event must be a JSON object"))?;

        let id = EventId::from(parse_uuid(required_str(object, "id")?)?);
        let timestamp = parse_timestamp(required_str(object, "timestamp")?, None)?;
        let customer_id = CustomerId::from(parse_uuid(required_str(object, "customer_id")?)?);
        let event_type: EventType = required_str(object, "event_type")?.parse()?;

        let data = object
            .get("event_data")
            .and_then(Value::as_object)
            .ok_or_else(|| SimulationError::invalid_event_data("missing object field 'event_data'"))?;
        let data_timestamp = parse_timestamp(required_str(data, "timestamp")?, None)?;

        let payload = match event_type {
            EventType::Visit => EventPayload::Visit(VisitData {
                browser: required_str(data, "browser")?.parse::<Browser>()?,
                timestamp: data_timestamp,
            }),
            EventType::AddToCart => {
                let quantity = data
                    .get("quantity")
                    .and_then(Value::as_u64)
                    .and_then(|quantity| u32::try_from(quantity).ok())
                    .filter(|quantity| *quantity >= 1)
                    .ok_or_else(|| {
                        SimulationError::invalid_event_data(
                            "add_to_cart requires a positive integer 'quantity'",
                        )
                    })?;
                EventPayload::AddToCart(AddToCartData {
                    item_id: ProductId::from(parse_uuid(required_str(data, "item_id")?)?),
                    quantity,
                    timestamp: data_timestamp,
                })
            }
            EventType::RemoveFromCart => EventPayload::RemoveFromCart(RemoveFromCartData {
                item_id: ProductId::from(parse_uuid(required_str(data, "item_id")?)?),
                timestamp: data_timestamp,
            }),
            EventType::Checkout => EventPayload::Checkout(CheckoutData {
                status: required_str(data, "status")?.parse::<CheckoutStatus>()?,
                order_id: OrderId::from(parse_uuid(required_str(data, "order_id")?)?),
                timestamp: data_timestamp,
            }),
        };

        Ok(Event { id, timestamp, customer_id, payload })
    }
}

fn required_str<'a>(object: &'a Map<String, Value>, field: &str) -> SimulationResult<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| SimulationError::invalid_event_data(format!("missing string field '{}'", field)))
}
