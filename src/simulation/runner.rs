//! Batch driver
//!
//! This module contains the SimulationRunner, which owns the randomness stream
//! and invokes the simulation engine once per customer.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, instrument};

use crate::events::CustomerDataset;
use crate::simulation::{BatchStatistics, CustomerSimulator, SimulationResult};

/// Runs the simulation engine over a whole batch
#[derive(Debug)]
pub struct SimulationRunner {
    simulator: CustomerSimulator,
    rng: StdRng,
    statistics: BatchStatistics,
}

impl SimulationRunner {
    /// Create a runner with an entropy-seeded randomness stream
    pub fn new(simulator: CustomerSimulator) -> Self {
        Self { simulator, rng: StdRng::from_entropy(), statistics: BatchStatistics::new() }
    }

    /// Generate `n` customer datasets in call order
    ///
    /// When `seed` is given the randomness stream is reset once before the
    /// first customer. Any failure aborts the whole batch.
    #[instrument(skip(self))]
    pub fn run_simulation(
        &mut self,
        n: usize,
        seed: Option<u64>,
    ) -> SimulationResult<Vec<CustomerDataset>> {
        match seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                self.rng = StdRng::seed_from_u64(seed);
            }
            None => debug!("Using entropy-based random seed"),
        }

        info!("Starting simulation for {} customers", n);
        let start_time = Instant::now();

        let mut batch = Vec::with_capacity(n);
        for index in 0..n {
            match self.simulator.generate_customer_dataset(&mut self.rng) {
                Ok(dataset) => batch.push(dataset),
                Err(e) => {
                    error!(
                        "Generation failed for customer {} of {} ({}): {}",
                        index + 1,
                        n,
                        e.category(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        let mut statistics = BatchStatistics::from_datasets(&batch);
        statistics.simulation_duration = start_time.elapsed();
        info!("{}", statistics.summary());
        self.statistics = statistics;

        Ok(batch)
    }

    /// Statistics of the most recent completed run
    pub fn statistics(&self) -> &BatchStatistics {
        &self.statistics
    }

    /// The engine driven by this runner
    pub fn simulator(&self) -> &CustomerSimulator {
        &self.simulator
    }
}
