//! Scenario tests driving the batch runner against stub product sources

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rand::RngCore;
use storefront_event_simulator::catalog::ProductSource;
use storefront_event_simulator::events::EventFactory;
use storefront_event_simulator::simulation::{
    CustomerSimulator, FixedClock, SimulationError, SimulationResult, SimulationRunner,
};
use storefront_event_simulator::types::{EventType, ProductId, SimulationConfig};

/// Source that always hands out the same products in order
#[derive(Debug)]
struct StubProducts(Vec<ProductId>);

impl ProductSource for StubProducts {
    fn fetch_random_product_ids(
        &self,
        count: usize,
        _rng: &mut dyn RngCore,
    ) -> SimulationResult<Vec<ProductId>> {
        Ok(self.0.iter().copied().take(count).collect())
    }
}

#[derive(Debug)]
struct UnavailableProducts;

impl ProductSource for UnavailableProducts {
    fn fetch_random_product_ids(
        &self,
        _count: usize,
        _rng: &mut dyn RngCore,
    ) -> SimulationResult<Vec<ProductId>> {
        Err(SimulationError::dependency("connection refused"))
    }
}

fn frozen_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 29, 9, 30, 0).unwrap()
}

fn runner(config: SimulationConfig, source: Arc<dyn ProductSource>) -> SimulationRunner {
    let factory = EventFactory::new(Arc::new(FixedClock::new(frozen_now())));
    SimulationRunner::new(CustomerSimulator::new(config, factory, source).unwrap())
}

fn three_products() -> Arc<dyn ProductSource> {
    Arc::new(StubProducts((0..3).map(|_| ProductId::new()).collect()))
}

#[test]
fn test_single_seeded_customer_with_three_products() {
    let config = SimulationConfig { min_product_picks: 3, max_product_picks: 3, ..Default::default() };
    let mut runner = runner(config, three_products());

    let batch = runner.run_simulation(1, Some(42)).unwrap();
    assert_eq!(batch.len(), 1);

    let dataset = &batch[0];
    assert_eq!(dataset.count(EventType::AddToCart), 3);
    assert!(dataset.count(EventType::RemoveFromCart) <= 3);
    assert!(dataset.count(EventType::Visit) >= 1);
    assert!(dataset.count(EventType::Checkout) <= 1);
    assert!(dataset.is_referentially_consistent());
}

#[test]
fn test_checkout_only_when_cart_net_positive() {
    let mut runner = runner(SimulationConfig::default(), three_products());
    let batch = runner.run_simulation(200, Some(7)).unwrap();

    for dataset in &batch {
        let checkouts = dataset.count(EventType::Checkout);
        assert!(checkouts <= 1);
        if checkouts == 1 {
            assert!(dataset.cart_is_net_positive());
        }
        if !dataset.cart_is_net_positive() {
            assert_eq!(checkouts, 0);
            assert!(dataset.order.is_none());
            assert!(!dataset.checkout_abandoned);
        }
    }
}

#[test]
fn test_abandonment_and_orders_are_exclusive() {
    let mut runner = runner(SimulationConfig::default(), three_products());
    let batch = runner.run_simulation(200, Some(11)).unwrap();

    for dataset in &batch {
        assert!(!(dataset.checkout_abandoned && dataset.order.is_some()));
        assert_eq!(dataset.order.is_some(), dataset.checkout().is_some());
    }
}

#[test]
fn test_empty_product_source_yields_no_cart_or_checkout() {
    let mut runner = runner(SimulationConfig::default(), Arc::new(StubProducts(Vec::new())));
    let batch = runner.run_simulation(25, Some(3)).unwrap();

    for dataset in &batch {
        assert_eq!(dataset.count(EventType::AddToCart), 0);
        assert_eq!(dataset.count(EventType::RemoveFromCart), 0);
        assert_eq!(dataset.count(EventType::Checkout), 0);
        assert!(dataset.count(EventType::Visit) >= 1);
    }
    assert_eq!(runner.statistics().checkouts_attempted, 0);
}

#[test]
fn test_forced_abandonment_removes_every_checkout() {
    let config = SimulationConfig {
        remove_from_cart_probability: 0.0,
        abandon_cart_probability: 1.0,
        ..Default::default()
    };
    let mut runner = runner(config, three_products());
    let batch = runner.run_simulation(30, Some(5)).unwrap();

    for dataset in &batch {
        assert!(dataset.count(EventType::AddToCart) >= 1);
        assert_eq!(dataset.count(EventType::Checkout), 0);
        assert!(dataset.checkout_abandoned);
        assert!(dataset.order.is_none());
    }
    assert_eq!(runner.statistics().abandoned_carts, 30);
    assert_eq!(runner.statistics().total_orders(), 0);
}

#[test]
fn test_forced_checkout_produces_orders() {
    let config = SimulationConfig {
        remove_from_cart_probability: 0.0,
        abandon_cart_probability: 0.0,
        ..Default::default()
    };
    let mut runner = runner(config, three_products());
    let batch = runner.run_simulation(30, Some(5)).unwrap();

    for dataset in &batch {
        assert_eq!(dataset.count(EventType::Checkout), 1);
        let order = dataset.order.as_ref().unwrap();
        assert_eq!(order.line_items.len(), dataset.count(EventType::AddToCart));
    }
    assert_eq!(runner.statistics().total_orders(), 30);
}

#[test]
fn test_forced_historic_visits() {
    let always = SimulationConfig { historic_visit_probability: 1.0, ..Default::default() };
    let batch = runner(always, three_products()).run_simulation(20, Some(9)).unwrap();
    for dataset in &batch {
        let historic = dataset
            .events_of(EventType::Visit)
            .filter(|event| event.timestamp < dataset.customer.timestamp)
            .count();
        assert!((1..=5).contains(&historic));
    }

    let never = SimulationConfig { historic_visit_probability: 0.0, ..Default::default() };
    let batch = runner(never, three_products()).run_simulation(20, Some(9)).unwrap();
    for dataset in &batch {
        assert!(dataset.events.iter().all(|event| event.timestamp >= dataset.customer.timestamp));
    }
}

#[test]
fn test_same_seed_and_clock_reproduce_the_batch() {
    let source = three_products();
    let mut a = runner(SimulationConfig::default(), Arc::clone(&source));
    let mut b = runner(SimulationConfig::default(), source);

    let batch_a = a.run_simulation(50, Some(1234)).unwrap();
    let batch_b = b.run_simulation(50, Some(1234)).unwrap();

    assert_eq!(batch_a, batch_b);
    assert_eq!(
        serde_json::to_string(&batch_a).unwrap(),
        serde_json::to_string(&batch_b).unwrap()
    );
}

#[test]
fn test_different_seeds_diverge() {
    let source = three_products();
    let batch_a = runner(SimulationConfig::default(), Arc::clone(&source))
        .run_simulation(10, Some(1))
        .unwrap();
    let batch_b = runner(SimulationConfig::default(), source).run_simulation(10, Some(2)).unwrap();

    assert_ne!(batch_a, batch_b);
}

#[test]
fn test_dependency_failure_aborts_batch() {
    let mut runner = runner(SimulationConfig::default(), Arc::new(UnavailableProducts));
    let result = runner.run_simulation(10, Some(1));

    let error = result.unwrap_err();
    assert!(error.is_dependency_failure());
    assert_eq!(runner.statistics().customers, 0);
}
