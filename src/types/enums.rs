//! Enumeration types for the storefront event simulator
//!
//! This module contains the closed value sets used by customer events
//! (event kinds, browsers, checkout outcomes) together with the rendering
//! and output selectors used at the process boundary.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::simulation::SimulationError;

/// Kind of customer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Customer visited the storefront
    Visit,
    /// Customer added a product to the cart
    AddToCart,
    /// Customer removed a product from the cart
    RemoveFromCart,
    /// Customer went through checkout
    Checkout,
}

impl EventType {
    /// All event types in declaration order
    pub const ALL: [EventType; 4] =
        [EventType::Visit, EventType::AddToCart, EventType::RemoveFromCart, EventType::Checkout];

    /// Literal name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Visit => "visit",
            EventType::AddToCart => "add_to_cart",
            EventType::RemoveFromCart => "remove_from_cart",
            EventType::Checkout => "checkout",
        }
    }

    /// Whether this event mutates the cart
    pub fn is_cart_update(&self) -> bool {
        matches!(self, EventType::AddToCart | EventType::RemoveFromCart)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visit" => Ok(EventType::Visit),
            "add_to_cart" => Ok(EventType::AddToCart),
            "remove_from_cart" => Ok(EventType::RemoveFromCart),
            "checkout" => Ok(EventType::Checkout),
            _ => Err(SimulationError::invalid_event_data(format!("unknown event type: {}", s))),
        }
    }
}

/// Browser used during a storefront visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    /// Google Chrome
    Chrome,
    /// DuckDuckGo browser
    Duckduckgo,
    /// Mozilla Firefox
    Firefox,
    /// Opera
    Opera,
}

impl Browser {
    /// All browsers in declaration order
    pub const ALL: [Browser; 4] =
        [Browser::Chrome, Browser::Duckduckgo, Browser::Firefox, Browser::Opera];

    /// Pick a browser uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Browser::Chrome)
    }

    /// Literal name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Duckduckgo => "duckduckgo",
            Browser::Firefox => "firefox",
            Browser::Opera => "opera",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chrome" => Ok(Browser::Chrome),
            "duckduckgo" => Ok(Browser::Duckduckgo),
            "firefox" => Ok(Browser::Firefox),
            "opera" => Ok(Browser::Opera),
            _ => Err(SimulationError::invalid_event_data(format!("unknown browser: {}", s))),
        }
    }
}

/// Outcome of a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStatus {
    /// Payment went through
    Success,
    /// Payment failed
    Failed,
    /// Customer cancelled the order
    Cancelled,
}

impl CheckoutStatus {
    /// All checkout statuses in declaration order
    pub const ALL: [CheckoutStatus; 3] =
        [CheckoutStatus::Success, CheckoutStatus::Failed, CheckoutStatus::Cancelled];

    /// Pick a status uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&CheckoutStatus::Success)
    }

    /// Literal name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Success => "success",
            CheckoutStatus::Failed => "failed",
            CheckoutStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckoutStatus {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(CheckoutStatus::Success),
            "failed" => Ok(CheckoutStatus::Failed),
            "cancelled" => Ok(CheckoutStatus::Cancelled),
            _ => Err(SimulationError::invalid_event_data(format!(
                "unknown checkout status: {}",
                s
            ))),
        }
    }
}

/// How a record is handed back from the renderer
///
/// `Wire` renders ids and timestamps as strings suitable for transport,
/// `Native` keeps the typed record for in-process use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// JSON-compatible value with string ids and timestamps
    #[default]
    Wire,
    /// Richly typed record
    Native,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Wire => write!(f, "wire"),
            RenderMode::Native => write!(f, "native"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wire" | "json" => Ok(RenderMode::Wire),
            "native" | "python" => Ok(RenderMode::Native),
            _ => Err(SimulationError::invalid_event_data(format!("unsupported render mode: {}", s))),
        }
    }
}

/// Output file formats for the directory sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One JSON object per line
    JsonLines,
    /// A single pretty-printed JSON array
    Json,
}

impl OutputFormat {
    /// File extension used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::JsonLines => "jsonl",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" | "jsonlines" | "ndjson" => Ok(OutputFormat::JsonLines),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
