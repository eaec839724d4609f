// Storefront Event Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/storefront-event-simulator --customer-count 500 --seed 42 > events.jsonl
// ```
//
// Or write one file per table into a directory:
//
// ```console
// $ ./target/release/storefront-event-simulator -n 1000 --output-dir out --output-format json --verbose
// ```
//
// Pin the clock too for output that is byte-identical across runs:
//
// ```console
// $ ./target/release/storefront-event-simulator -n 50 --seed 42 --start-time 2024-06-01T12:00:00Z
// ```

use std::io;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use storefront_event_simulator::catalog::{
    DirectorySink, EventSink, ProductCatalog, ProductSource, WriterSink,
};
use storefront_event_simulator::events::EventFactory;
use storefront_event_simulator::perf_span;
use storefront_event_simulator::simulation::{CustomerSimulator, LoggingConfig, SimulationRunner};
use storefront_event_simulator::types::config::CliArgs;
use storefront_event_simulator::types::SimulationConfig;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _log_guard = match LoggingConfig::from_cli_args(&args).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Storefront Event Simulator");

    if let Err(e) = run(args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Storefront Event Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let config = SimulationConfig::from_cli_args(args.clone())
        .context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_configuration_summary(&config);

    let clock = config.clock();
    let catalog = Arc::new(
        ProductCatalog::for_config(&config, clock.now())
            .context("Failed to build product catalog")?,
    );
    info!("Product catalog ready with {} products", catalog.len());

    let products: Arc<dyn ProductSource> = catalog.clone();
    let simulator = CustomerSimulator::new(config.clone(), EventFactory::new(clock), products)
        .context("Failed to create simulator")?;
    let mut runner = SimulationRunner::new(simulator);

    let batch = runner
        .run_simulation(config.customer_count, config.seed)
        .context("Batch generation failed")?;

    let mut sink = open_sink(&config)?;
    {
        let _span = perf_span!("write_batch", customers = batch.len()).entered();
        sink.write_products(catalog.products()).context("Failed to write product catalog")?;
        sink.write_batch(&batch).context("Failed to write batch")?;
    }

    eprintln!("{}", runner.statistics().detailed_breakdown());
    eprintln!("{}", runner.statistics().summary());
    Ok(())
}

fn open_sink(config: &SimulationConfig) -> Result<Box<dyn EventSink>> {
    match &config.output_dir {
        Some(dir) => {
            let format = config
                .get_output_format()
                .map_err(anyhow::Error::msg)
                .context("Invalid output format")?;
            info!("Writing {} output to {}", format, dir);
            Ok(Box::new(DirectorySink::new(dir, format)))
        }
        None => {
            info!("Writing tagged JSON lines to stdout");
            Ok(Box::new(WriterSink::new(io::stdout().lock())))
        }
    }
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Customer Count: {}", config.customer_count);
    eprintln!(
        "  Historic Visit Probability: {:.1}%",
        config.historic_visit_probability * 100.0
    );
    eprintln!(
        "  Remove From Cart Probability: {:.1}%",
        config.remove_from_cart_probability * 100.0
    );
    eprintln!("  Abandon Cart Probability: {:.1}%", config.abandon_cart_probability * 100.0);
    eprintln!("  Live Visits: {} - {}", config.min_live_visits, config.max_live_visits);
    eprintln!("  Product Picks: {} - {}", config.min_product_picks, config.max_product_picks);
    eprintln!("  Quantity: {} - {}", config.min_quantity, config.max_quantity);
    match &config.product_catalog {
        Some(path) => eprintln!("  Product Catalog: {}", path),
        None => eprintln!("  Product Catalog: built-in"),
    }
    match &config.output_dir {
        Some(dir) => eprintln!("  Output: {} ({})", dir, config.output_format),
        None => eprintln!("  Output: stdout"),
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    if let Some(start_time) = config.start_time {
        eprintln!("  Start Time: {}", start_time.to_rfc3339());
    }
    eprintln!();
}
