//! Per-customer simulation engine
//!
//! [`CustomerSimulator`] produces one customer's dataset per call, walking a
//! fixed sequence of phases: customer creation, historic visits, live visits,
//! cart activity and the checkout decision. Whether and how much each phase
//! generates is drawn from the randomness stream lent by the caller.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, warn};

use crate::catalog::ProductSource;
use crate::customer::CustomerGenerator;
use crate::events::{
    CartItemDraft, CheckoutDraft, CustomerDataset, EventFactory, Order, VisitDraft,
};
use crate::simulation::temporal::{add_random_minutes, random_past_timestamps};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{
    Browser, CheckoutStatus, EventId, EventType, OrderId, SimulationConfig,
};

/// Generates complete customer datasets
#[derive(Debug, Clone)]
pub struct CustomerSimulator {
    config: SimulationConfig,
    factory: EventFactory,
    customers: CustomerGenerator,
    products: Arc<dyn ProductSource>,
}

impl CustomerSimulator {
    /// Create a simulator from a validated configuration
    pub fn new(
        config: SimulationConfig,
        factory: EventFactory,
        products: Arc<dyn ProductSource>,
    ) -> SimulationResult<Self> {
        config.validate().map_err(|e| SimulationError::configuration(e.to_string()))?;

        Ok(Self { config, factory, customers: CustomerGenerator::new(), products })
    }

    /// Configuration driving the simulator
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Event factory used for every record
    pub fn factory(&self) -> &EventFactory {
        &self.factory
    }

    /// Generate one customer and their events
    #[instrument(skip_all)]
    pub fn generate_customer_dataset<R>(&self, rng: &mut R) -> SimulationResult<CustomerDataset>
    where
        R: Rng + SeedableRng,
    {
        let now = self.factory.now();
        let customer = self.customers.generate(rng, now)?;
        let customer_id = customer.id;
        let mut dataset = CustomerDataset::new(customer);

        self.historic_visits(&mut dataset, rng)?;
        self.live_visits(&mut dataset, rng)?;
        self.cart_activity(&mut dataset, rng)?;
        self.checkout(&mut dataset, rng)?;

        debug!(
            customer_id = %customer_id,
            events = dataset.events.len(),
            adds = dataset.count(EventType::AddToCart),
            removes = dataset.count(EventType::RemoveFromCart),
            checked_out = dataset.order.is_some(),
            abandoned = dataset.checkout_abandoned,
            "Generated customer dataset"
        );
        Ok(dataset)
    }

    fn historic_visits<R>(&self, dataset: &mut CustomerDataset, rng: &mut R) -> SimulationResult<()>
    where
        R: Rng + SeedableRng,
    {
        if !rng.gen_bool(self.config.historic_visit_probability) {
            return Ok(());
        }

        let customer_id = dataset.customer_id();
        for timestamp in random_past_timestamps(rng, dataset.customer.timestamp, None) {
            let draft = VisitDraft::new(customer_id, Browser::random(rng))
                .with_id(EventId::from_rng(rng))
                .at(timestamp);
            dataset.push(self.factory.visit(draft)?);
        }
        Ok(())
    }

    fn live_visits<R: Rng>(&self, dataset: &mut CustomerDataset, rng: &mut R) -> SimulationResult<()> {
        let customer_id = dataset.customer_id();
        let (min, max) = self.config.live_visits();

        for _ in 0..rng.gen_range(min..=max) {
            let draft =
                VisitDraft::new(customer_id, Browser::random(rng)).with_id(EventId::from_rng(rng));
            dataset.push(self.factory.visit(draft)?);
        }
        Ok(())
    }

    fn cart_activity<R: Rng>(&self, dataset: &mut CustomerDataset, rng: &mut R) -> SimulationResult<()> {
        let customer_id = dataset.customer_id();
        let (min_picks, max_picks) = self.config.product_picks();
        let (min_quantity, max_quantity) = self.config.quantity();

        let requested = rng.gen_range(min_picks..=max_picks);
        let item_ids = self.products.fetch_random_product_ids(requested, rng)?;
        if item_ids.len() < requested {
            warn!(
                "Product source returned {} of {} requested products for customer {}",
                item_ids.len(),
                requested,
                customer_id
            );
        }

        for item_id in item_ids {
            let quantity = rng.gen_range(min_quantity..=max_quantity);
            let add = CartItemDraft::add(customer_id, item_id, quantity)
                .with_id(EventId::from_rng(rng));
            dataset.push(self.factory.cart_update(add)?);

            if rng.gen_bool(self.config.remove_from_cart_probability) {
                let remove =
                    CartItemDraft::remove(customer_id, item_id).with_id(EventId::from_rng(rng));
                dataset.push(self.factory.cart_update(remove)?);
            }
        }
        Ok(())
    }

    fn checkout<R>(&self, dataset: &mut CustomerDataset, rng: &mut R) -> SimulationResult<()>
    where
        R: Rng + SeedableRng,
    {
        if !dataset.cart_is_net_positive() {
            return Ok(());
        }

        let customer_id = dataset.customer_id();
        let order_id = OrderId::from_rng(rng);
        let status = CheckoutStatus::random(rng);
        let checked_out_at = add_random_minutes(rng, self.factory.now(), None);

        let draft = CheckoutDraft::new(customer_id, order_id, status, checked_out_at)
            .with_id(EventId::from_rng(rng));
        dataset.push(self.factory.checkout(draft)?);

        if rng.gen_bool(self.config.abandon_cart_probability) {
            dataset.events.retain(|event| !event.is(EventType::Checkout));
            dataset.checkout_abandoned = true;
            debug!("Customer {} abandoned order {}", customer_id, order_id);
        } else {
            let line_items = dataset.line_items_for(order_id);
            dataset.order = Some(Order { order_id, status, checked_out_at, line_items });
        }
        Ok(())
    }
}
