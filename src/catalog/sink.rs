//! Event sinks
//!
//! A batch of customer datasets is flattened into three tables (customers,
//! events and line items) before it is handed to a sink. The product catalog
//! the batch references goes out as a fourth table, `products`, so every
//! `item_id` can be joined back to its product. [`WriterSink`] streams
//! table-tagged JSON lines to any writer; [`DirectorySink`] writes one file
//! per table.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::catalog::Product;
use crate::customer::Customer;
use crate::events::{CustomerDataset, Event, LineItem};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::OutputFormat;

/// Destination for generated batches
pub trait EventSink: fmt::Debug {
    /// Persist the product catalog referenced by cart events and line items
    fn write_products(&mut self, products: &[Product]) -> SimulationResult<()>;

    /// Persist every customer, event and line item in `batch`
    fn write_batch(&mut self, batch: &[CustomerDataset]) -> SimulationResult<()>;
}

/// A batch split into its three output tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedBatch {
    /// One record per dataset
    pub customers: Vec<Customer>,
    /// Every event of every dataset, in generation order
    pub events: Vec<Event>,
    /// Line items of every completed order
    pub line_items: Vec<LineItem>,
}

impl FlattenedBatch {
    /// Flatten `batch` into its tables
    pub fn from_datasets(batch: &[CustomerDataset]) -> Self {
        let mut flattened = Self::default();
        for dataset in batch {
            flattened.customers.push(dataset.customer.clone());
            flattened.events.extend(dataset.events.iter().cloned());
            if let Some(order) = &dataset.order {
                flattened.line_items.extend(order.line_items.iter().cloned());
            }
        }
        flattened
    }

    /// Total number of records across the three tables
    pub fn record_count(&self) -> usize {
        self.customers.len() + self.events.len() + self.line_items.len()
    }
}

#[derive(Serialize)]
#[serde(tag = "table", content = "record", rename_all = "snake_case")]
enum TableRecord<'a> {
    Products(&'a Product),
    Customers(&'a Customer),
    Events(&'a Event),
    LineItems(&'a LineItem),
}

/// Sink writing one table-tagged JSON object per line
///
/// Each line looks like `{"table": "events", "record": {...}}`.
pub struct WriterSink<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> WriterSink<W> {
    /// Wrap `writer`
    pub fn new(writer: W) -> Self {
        Self { writer, records_written: 0 }
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &TableRecord<'_>) -> SimulationResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }
}

impl<W: Write> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").field("records_written", &self.records_written).finish()
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn write_products(&mut self, products: &[Product]) -> SimulationResult<()> {
        for product in products {
            self.write_record(&TableRecord::Products(product))?;
        }
        self.writer.flush()?;

        info!("Wrote {} product records", products.len());
        Ok(())
    }

    fn write_batch(&mut self, batch: &[CustomerDataset]) -> SimulationResult<()> {
        let flattened = FlattenedBatch::from_datasets(batch);
        info!("Writing {} records", flattened.record_count());

        for customer in &flattened.customers {
            self.write_record(&TableRecord::Customers(customer))?;
        }
        for event in &flattened.events {
            self.write_record(&TableRecord::Events(event))?;
        }
        for line_item in &flattened.line_items {
            self.write_record(&TableRecord::LineItems(line_item))?;
        }
        self.writer.flush()?;

        info!("Records written successfully");
        Ok(())
    }
}

/// Sink writing `products`, `customers`, `events` and `line_items` files into a directory
///
/// Each batch replaces the files written by the previous one.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    format: OutputFormat,
}

impl DirectorySink {
    /// Write into `dir` using `format`
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self { dir: dir.into(), format }
    }

    /// Path of the file holding `table`
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", table, self.format.extension()))
    }

    fn write_table<T: Serialize>(&self, table: &str, records: &[T]) -> SimulationResult<()> {
        let path = self.table_path(table);
        let file = File::create(&path).map_err(|e| {
            SimulationError::dependency(format!("failed to create {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);

        match self.format {
            OutputFormat::JsonLines => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writer.write_all(b"\n")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, records)?;
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()?;

        info!("Wrote {} {} records to {}", records.len(), table, path.display());
        Ok(())
    }
}

impl EventSink for DirectorySink {
    fn write_products(&mut self, products: &[Product]) -> SimulationResult<()> {
        ensure_dir(&self.dir)?;
        self.write_table("products", products)
    }

    fn write_batch(&mut self, batch: &[CustomerDataset]) -> SimulationResult<()> {
        ensure_dir(&self.dir)?;

        let flattened = FlattenedBatch::from_datasets(batch);
        self.write_table("customers", &flattened.customers)?;
        self.write_table("events", &flattened.events)?;
        self.write_table("line_items", &flattened.line_items)?;
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> SimulationResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        SimulationError::dependency(format!("failed to create output directory {}: {}", dir.display(), e))
    })
}
