//! Output sink tests over generated batches

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use clap::Parser;
use serde_json::Value;
use storefront_event_simulator::catalog::{
    DirectorySink, EventSink, FlattenedBatch, Product, ProductCatalog, WriterSink,
};
use storefront_event_simulator::customer::Customer;
use storefront_event_simulator::events::{CustomerDataset, Event, EventFactory, LineItem};
use storefront_event_simulator::simulation::{CustomerSimulator, FixedClock, SimulationRunner};
use storefront_event_simulator::types::config::CliArgs;
use storefront_event_simulator::types::{OutputFormat, SimulationConfig};

fn catalog_and_batch(n: usize, seed: u64) -> (Arc<ProductCatalog>, Vec<CustomerDataset>) {
    let now = Utc.with_ymd_and_hms(2024, 12, 1, 10, 0, 0).unwrap();
    let catalog = Arc::new(ProductCatalog::builtin(&mut StdRng::seed_from_u64(seed), now).unwrap());
    let factory = EventFactory::new(Arc::new(FixedClock::new(now)));
    let config = SimulationConfig { abandon_cart_probability: 0.2, ..Default::default() };
    let simulator = CustomerSimulator::new(config, factory, catalog.clone()).unwrap();
    let batch = SimulationRunner::new(simulator).run_simulation(n, Some(seed)).unwrap();
    (catalog, batch)
}

fn batch(n: usize, seed: u64) -> Vec<CustomerDataset> {
    catalog_and_batch(n, seed).1
}

/// Full pipeline as the binary runs it, writing into memory
fn run_cli(argv: &[&str]) -> Vec<u8> {
    let args = CliArgs::try_parse_from(argv.iter().copied()).unwrap();
    let config = SimulationConfig::from_cli_args(args).unwrap();
    let clock = config.clock();
    let catalog = Arc::new(ProductCatalog::for_config(&config, clock.now()).unwrap());
    let simulator =
        CustomerSimulator::new(config.clone(), EventFactory::new(clock), catalog.clone()).unwrap();
    let batch = SimulationRunner::new(simulator)
        .run_simulation(config.customer_count, config.seed)
        .unwrap();

    let mut sink = WriterSink::new(Vec::new());
    sink.write_products(catalog.products()).unwrap();
    sink.write_batch(&batch).unwrap();
    sink.into_inner()
}

fn read_lines<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Vec<T> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_directory_sink_tables_reload_as_records() {
    let batch = batch(40, 8);
    let expected = FlattenedBatch::from_datasets(&batch);

    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path(), OutputFormat::JsonLines);
    sink.write_batch(&batch).unwrap();

    let customers: Vec<Customer> = read_lines(&sink.table_path("customers"));
    let events: Vec<Event> = read_lines(&sink.table_path("events"));
    let line_items: Vec<LineItem> = read_lines(&sink.table_path("line_items"));

    assert_eq!(customers, expected.customers);
    assert_eq!(events, expected.events);
    assert_eq!(line_items, expected.line_items);

    // every event and line item points at something written alongside it
    let customer_ids: HashSet<_> = customers.iter().map(|customer| customer.id).collect();
    assert!(events.iter().all(|event| customer_ids.contains(&event.customer_id)));
    let order_ids: HashSet<_> =
        batch.iter().filter_map(|dataset| dataset.order.as_ref()).map(|order| order.order_id).collect();
    assert!(line_items.iter().all(|line| order_ids.contains(&line.order_id)));
}

#[test]
fn test_every_item_id_resolves_to_a_written_product() {
    let (catalog, batch) = catalog_and_batch(40, 13);
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path(), OutputFormat::JsonLines);
    sink.write_products(catalog.products()).unwrap();
    sink.write_batch(&batch).unwrap();

    let products: Vec<Product> = read_lines(&sink.table_path("products"));
    assert_eq!(products, catalog.products());
    let product_ids: HashSet<_> = products.iter().map(|product| product.id).collect();

    let events: Vec<Event> = read_lines(&sink.table_path("events"));
    let line_items: Vec<LineItem> = read_lines(&sink.table_path("line_items"));
    assert!(events.iter().any(|event| event.item_id().is_some()));
    assert!(!line_items.is_empty());

    for event in &events {
        if let Some(item_id) = event.item_id() {
            assert!(product_ids.contains(&item_id), "dangling item_id {}", item_id);
        }
    }
    for line in &line_items {
        assert!(product_ids.contains(&line.item_id), "dangling item_id {}", line.item_id);
    }
}

#[test]
fn test_writer_sink_products_precede_the_batch() {
    let (catalog, batch) = catalog_and_batch(8, 14);
    let mut sink = WriterSink::new(Vec::new());
    sink.write_products(catalog.products()).unwrap();
    sink.write_batch(&batch).unwrap();

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<Value> = output.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    let product_count = catalog.products().len();

    assert!(lines[..product_count].iter().all(|line| line["table"] == "products"));
    assert!(lines[product_count..].iter().all(|line| line["table"] != "products"));

    let written: HashSet<String> = lines[..product_count]
        .iter()
        .map(|line| line["record"]["id"].as_str().unwrap().to_string())
        .collect();
    for line in lines.iter().filter(|line| line["table"] == "line_items") {
        assert!(written.contains(line["record"]["item_id"].as_str().unwrap()));
    }
}

#[test]
fn test_seed_and_start_time_reproduce_output_bytes() {
    let argv = ["test", "-n", "30", "--seed", "42", "--start-time", "2024-12-01T10:00:00Z"];
    let first = run_cli(&argv);
    let second = run_cli(&argv);

    assert!(!first.is_empty());
    assert_eq!(first, second);

    let other_seed = run_cli(&["test", "-n", "30", "--seed", "43", "--start-time", "2024-12-01T10:00:00Z"]);
    assert_ne!(first, other_seed);
}

#[test]
fn test_directory_sink_json_arrays() {
    let batch = batch(10, 9);
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path(), OutputFormat::Json);
    sink.write_batch(&batch).unwrap();

    let events: Vec<Event> =
        serde_json::from_str(&fs::read_to_string(sink.table_path("events")).unwrap()).unwrap();
    assert_eq!(events.len(), batch.iter().map(|dataset| dataset.events.len()).sum::<usize>());
}

#[test]
fn test_directory_sink_replaces_previous_batch() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path(), OutputFormat::JsonLines);

    sink.write_batch(&batch(30, 10)).unwrap();
    let second = batch(5, 11);
    sink.write_batch(&second).unwrap();

    let customers: Vec<Customer> = read_lines(&sink.table_path("customers"));
    assert_eq!(customers.len(), 5);
    assert_eq!(customers[0], second[0].customer);
}

#[test]
fn test_writer_sink_stream_groups_by_table() {
    let batch = batch(12, 12);
    let expected = FlattenedBatch::from_datasets(&batch);

    let mut sink = WriterSink::new(Vec::new());
    sink.write_batch(&batch).unwrap();
    assert_eq!(sink.records_written(), expected.record_count());

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let tables: Vec<String> = output
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).unwrap();
            value["table"].as_str().unwrap().to_string()
        })
        .collect();

    let customers_end = expected.customers.len();
    let events_end = customers_end + expected.events.len();
    assert!(tables[..customers_end].iter().all(|table| table == "customers"));
    assert!(tables[customers_end..events_end].iter().all(|table| table == "events"));
    assert!(tables[events_end..].iter().all(|table| table == "line_items"));
}
