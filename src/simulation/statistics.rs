//! Statistics collection and reporting
//!
//! This module contains the per-run statistics gathered by the batch driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::events::CustomerDataset;
use crate::types::{CheckoutStatus, EventType};

/// Counters describing one simulation batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    /// Number of customer datasets generated
    pub customers: usize,
    /// Total number of events across all datasets
    pub total_events: usize,
    /// Number of visit events (historic and live)
    pub visit_events: usize,
    /// Number of add-to-cart events
    pub add_to_cart_events: usize,
    /// Number of remove-from-cart events
    pub remove_from_cart_events: usize,
    /// Number of checkout events that survived abandonment
    pub checkout_events: usize,
    /// Number of checkouts decided, including abandoned ones
    pub checkouts_attempted: usize,
    /// Number of checkouts abandoned after being decided
    pub abandoned_carts: usize,
    /// Completed orders with status `success`
    pub successful_orders: usize,
    /// Completed orders with status `failed`
    pub failed_orders: usize,
    /// Completed orders with status `cancelled`
    pub cancelled_orders: usize,
    /// Line items across all completed orders
    pub line_items: usize,
    /// Wall time spent generating the batch
    pub simulation_duration: Duration,
}

impl BatchStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics over a whole batch
    pub fn from_datasets(batch: &[CustomerDataset]) -> Self {
        let mut statistics = Self::new();
        for dataset in batch {
            statistics.record_dataset(dataset);
        }
        statistics
    }

    /// Add one dataset to the counters
    pub fn record_dataset(&mut self, dataset: &CustomerDataset) {
        self.customers += 1;
        self.total_events += dataset.events.len();

        for event in &dataset.events {
            match event.event_type() {
                EventType::Visit => self.visit_events += 1,
                EventType::AddToCart => self.add_to_cart_events += 1,
                EventType::RemoveFromCart => self.remove_from_cart_events += 1,
                EventType::Checkout => self.checkout_events += 1,
            }
        }

        if dataset.checkout_abandoned {
            self.abandoned_carts += 1;
            self.checkouts_attempted += 1;
        }

        if let Some(order) = &dataset.order {
            self.checkouts_attempted += 1;
            self.line_items += order.line_items.len();
            match order.status {
                CheckoutStatus::Success => self.successful_orders += 1,
                CheckoutStatus::Failed => self.failed_orders += 1,
                CheckoutStatus::Cancelled => self.cancelled_orders += 1,
            }
        }
    }

    /// Number of events of the given type
    pub fn events_of(&self, event_type: EventType) -> usize {
        match event_type {
            EventType::Visit => self.visit_events,
            EventType::AddToCart => self.add_to_cart_events,
            EventType::RemoveFromCart => self.remove_from_cart_events,
            EventType::Checkout => self.checkout_events,
        }
    }

    /// Number of completed orders
    pub fn total_orders(&self) -> usize {
        self.successful_orders + self.failed_orders + self.cancelled_orders
    }

    /// Share of all events with the given type, in percent
    pub fn event_percentage(&self, event_type: EventType) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            (self.events_of(event_type) as f64 / self.total_events as f64) * 100.0
        }
    }

    /// Share of decided checkouts that were abandoned, in percent
    pub fn abandonment_rate(&self) -> f64 {
        if self.checkouts_attempted == 0 {
            0.0
        } else {
            (self.abandoned_carts as f64 / self.checkouts_attempted as f64) * 100.0
        }
    }

    /// Average number of events per customer
    pub fn average_events_per_customer(&self) -> f64 {
        if self.customers == 0 {
            0.0
        } else {
            self.total_events as f64 / self.customers as f64
        }
    }

    /// One-line summary suitable for logging
    pub fn summary(&self) -> String {
        format!(
            "Batch Summary: {} customers, {} events | Visits: {} ({:.1}%) | Adds: {} ({:.1}%) | Removes: {} ({:.1}%) | Checkouts: {} ({:.1}%) | Abandoned: {} of {} ({:.1}%) | Orders: {} ({} line items) | Duration: {:.2?}",
            self.customers,
            self.total_events,
            self.visit_events, self.event_percentage(EventType::Visit),
            self.add_to_cart_events, self.event_percentage(EventType::AddToCart),
            self.remove_from_cart_events, self.event_percentage(EventType::RemoveFromCart),
            self.checkout_events, self.event_percentage(EventType::Checkout),
            self.abandoned_carts, self.checkouts_attempted, self.abandonment_rate(),
            self.total_orders(),
            self.line_items,
            self.simulation_duration,
        )
    }

    /// Multi-line breakdown of events and orders
    pub fn detailed_breakdown(&self) -> String {
        let mut breakdown = String::new();
        breakdown.push_str("=== Batch Breakdown ===\n");
        breakdown.push_str(&format!("Customers Generated: {}\n", self.customers));
        breakdown.push_str(&format!(
            "Total Events Generated: {} ({:.1} per customer)\n\n",
            self.total_events,
            self.average_events_per_customer()
        ));

        breakdown.push_str("Events:\n");
        for event_type in EventType::ALL {
            breakdown.push_str(&format!(
                "  - {}: {} ({:.1}%)\n",
                event_type,
                self.events_of(event_type),
                self.event_percentage(event_type)
            ));
        }

        breakdown.push_str("\nCheckouts:\n");
        breakdown.push_str(&format!("  - Attempted: {}\n", self.checkouts_attempted));
        breakdown.push_str(&format!(
            "  - Abandoned: {} ({:.1}%)\n",
            self.abandoned_carts,
            self.abandonment_rate()
        ));
        breakdown.push_str(&format!("  - Success: {}\n", self.successful_orders));
        breakdown.push_str(&format!("  - Failed: {}\n", self.failed_orders));
        breakdown.push_str(&format!("  - Cancelled: {}\n", self.cancelled_orders));
        breakdown.push_str(&format!("  - Line Items: {}\n", self.line_items));

        breakdown
    }
}

impl fmt::Display for BatchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
