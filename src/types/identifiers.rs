//! Unique identifier types for the storefront event simulator
//!
//! This module contains UUID-based identifier types for customers, events,
//! products and orders. Every identifier serializes as the canonical lowercase
//! hyphenated UUID string so records can cross a wire boundary unchanged.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::{Builder, Uuid};

use crate::simulation::{SimulationError, SimulationResult};

/// Build a v4 UUID from bytes drawn out of the given randomness stream
///
/// Ids created this way are reproducible whenever the stream is seeded.
pub fn uuid_from_rng<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    Builder::from_random_bytes(bytes).into_uuid()
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier from the process entropy source
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create a new identifier drawn from an explicit randomness stream
            pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
                Self(uuid_from_rng(rng))
            }

            /// Borrow the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = SimulationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_uuid(s).map(Self)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a synthetic customer
    CustomerId
);

uuid_identifier!(
    /// Unique identifier for a single customer event
    EventId
);

uuid_identifier!(
    /// Unique identifier for a catalog product
    ProductId
);

uuid_identifier!(
    /// Unique identifier for an order created at checkout
    OrderId
);

/// Parse a UUID from its canonical string form
pub fn parse_uuid(value: &str) -> SimulationResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|e| {
        SimulationError::malformed_input(format!("invalid UUID '{}': {}", value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_customer_id_creation() {
        let id1 = CustomerId::new();
        let id2 = CustomerId::new();

        // IDs should be unique
        assert_ne!(id1, id2);

        // Default should create a new ID
        let id3 = CustomerId::default();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_ids_from_seeded_stream_are_reproducible() {
        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);

        assert_eq!(EventId::from_rng(&mut first), EventId::from_rng(&mut second));
        assert_eq!(OrderId::from_rng(&mut first), OrderId::from_rng(&mut second));
    }

    #[test]
    fn test_ids_from_stream_are_version_4() {
        let mut rng = StdRng::seed_from_u64(99);
        let id = ProductId::from_rng(&mut rng);
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_display_is_canonical_lowercase() {
        let id = EventId::new();
        let display_str = id.to_string();

        // 32 hex digits + 4 hyphens
        assert_eq!(display_str.len(), 36);
        assert_eq!(display_str, display_str.to_lowercase());
        assert_eq!(display_str.matches('-').count(), 4);
    }

    #[test]
    fn test_id_serialization_is_plain_uuid_string() {
        let id = CustomerId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0.hyphenated()));

        let parsed: CustomerId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_uuid_rejects_garbage() {
        let err = parse_uuid("not-a-uuid").unwrap_err();
        assert!(matches!(err, SimulationError::MalformedInput(_)));

        let err = "1234".parse::<OrderId>().unwrap_err();
        assert_eq!(err.category(), "Malformed Input");
    }

    #[test]
    fn test_parse_uuid_accepts_canonical_form() {
        let uuid = Uuid::new_v4();
        let parsed = parse_uuid(&uuid.hyphenated().to_string()).unwrap();
        assert_eq!(parsed, uuid);

        let id: ProductId = uuid.to_string().parse().unwrap();
        assert_eq!(id.0, uuid);
    }
}
