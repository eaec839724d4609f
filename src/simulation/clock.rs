//! Wall-clock access
//!
//! Every "now" reading of the simulation goes through a [`Clock`] so that a
//! run can be pinned to a fixed instant. Readings are truncated to the
//! microsecond precision carried on the wire.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::types::timestamp::to_wire_precision;

/// Source of the current time
pub trait Clock: fmt::Debug + Send + Sync {
    /// Current time, truncated to microseconds
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        to_wire_precision(Utc::now())
    }
}

/// Clock that always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock frozen at `instant`
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant: to_wire_precision(instant) }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
