//! Configuration structures for the storefront event simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the behavior and parameters of the simulation system.

use super::OutputFormat;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::simulation::temporal::parse_timestamp;
use crate::simulation::{Clock, FixedClock, SystemClock};

/// Default values for the per-customer generation process
pub mod defaults {
    /// Number of customers simulated in one run
    pub const CUSTOMER_COUNT: usize = 100;

    /// Probability that a customer has historic (backdated) visits
    pub const HISTORIC_VISIT_PROBABILITY: f64 = 0.5;

    /// Probability that an added product is removed from the cart again
    pub const REMOVE_FROM_CART_PROBABILITY: f64 = 0.5;

    /// Probability that a checkout is abandoned after it was decided
    pub const ABANDON_CART_PROBABILITY: f64 = 0.5;

    /// Minimum live visits per customer
    pub const MIN_LIVE_VISITS: usize = 1;

    /// Maximum live visits per customer
    pub const MAX_LIVE_VISITS: usize = 5;

    /// Minimum products requested from the product source
    pub const MIN_PRODUCT_PICKS: usize = 1;

    /// Maximum products requested from the product source
    pub const MAX_PRODUCT_PICKS: usize = 12;

    /// Minimum quantity of an add-to-cart event
    pub const MIN_QUANTITY: u32 = 1;

    /// Maximum quantity of an add-to-cart event
    pub const MAX_QUANTITY: u32 = 5;

    /// Default output format for the directory sink
    pub const OUTPUT_FORMAT: &str = "jsonl";

    /// Mixed into the run seed to derive the product catalog's seed
    pub const CATALOG_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
}

/// Fixed ranges used by the temporal utilities
pub mod time_ranges {
    /// Minimum number of backdated timestamps produced per call
    pub const MIN_PAST_TIMESTAMPS: usize = 1;

    /// Maximum number of backdated timestamps produced per call
    pub const MAX_PAST_TIMESTAMPS: usize = 5;

    /// Minimum days subtracted from the base time
    pub const MIN_DAYS_BEFORE: i64 = 1;

    /// Maximum days subtracted from the base time
    pub const MAX_DAYS_BEFORE: i64 = 10;

    /// Maximum hours subtracted from the base time
    pub const MAX_HOURS_BEFORE: i64 = 23;

    /// Maximum minutes subtracted from the base time
    pub const MAX_MINUTES_BEFORE: i64 = 59;

    /// Maximum seconds subtracted from the base time
    pub const MAX_SECONDS_BEFORE: i64 = 59;

    /// Maximum microseconds subtracted from the base time
    pub const MAX_MICROSECONDS_BEFORE: i64 = 999_999;

    /// Minimum minutes between the checkout decision and the checkout itself
    pub const MIN_CHECKOUT_DELAY_MINUTES: i64 = 3;

    /// Maximum minutes between the checkout decision and the checkout itself
    pub const MAX_CHECKOUT_DELAY_MINUTES: i64 = 17;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "storefront-event-simulator",
    version,
    about = "Storefront Event Simulator - Generates synthetic e-commerce customer event streams",
    long_about = "Generates per-customer storefront event streams (visits, cart activity, checkouts and abandoned carts) for seeding analytics or test databases.

EXAMPLES:
    # Run with default settings, records go to stdout as JSON lines
    storefront-event-simulator

    # Reproducible run of 500 customers written to a directory
    storefront-event-simulator --customer-count 500 --seed 42 --output-dir ./out

    # Byte-identical output across processes: pin the clock as well as the seed
    storefront-event-simulator -n 50 --seed 42 --start-time 2024-06-01T12:00:00Z

    # Use a configuration file and a custom product catalog
    storefront-event-simulator --config config.json --product-catalog products.json

    # Generate configuration template
    storefront-event-simulator --print-config > my-config.json

    # Validate configuration without running
    storefront-event-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of customers to simulate
    #[arg(
        short = 'n',
        long,
        help = "Number of customers to simulate",
        long_help = "Number of synthetic customers generated in the batch. Must be greater than 0. Default: 100"
    )]
    pub customer_count: Option<usize>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Fixed simulation time used as "now" instead of the system clock
    #[arg(
        long,
        value_parser = parse_start_time,
        help = "Fixed simulation time (ISO-8601)",
        long_help = "Pin the simulation clock to this instant instead of reading the system time. Combined with --seed, two runs produce byte-identical output."
    )]
    pub start_time: Option<DateTime<Utc>>,

    /// Probability that a customer has historic visits (0.0-1.0)
    #[arg(long, help = "Historic visit probability (0.0-1.0)")]
    pub historic_visit_probability: Option<f64>,

    /// Probability that an added product is removed again (0.0-1.0)
    #[arg(long, help = "Remove-from-cart probability (0.0-1.0)")]
    pub remove_from_cart_probability: Option<f64>,

    /// Probability that a checkout is abandoned (0.0-1.0)
    #[arg(long, help = "Abandoned checkout probability (0.0-1.0)")]
    pub abandon_cart_probability: Option<f64>,

    /// Minimum number of live visits per customer
    #[arg(long, help = "Minimum live visits per customer")]
    pub min_live_visits: Option<usize>,

    /// Maximum number of live visits per customer
    #[arg(long, help = "Maximum live visits per customer")]
    pub max_live_visits: Option<usize>,

    /// Minimum number of products requested per customer
    #[arg(long, help = "Minimum products requested per customer")]
    pub min_product_picks: Option<usize>,

    /// Maximum number of products requested per customer
    #[arg(long, help = "Maximum products requested per customer")]
    pub max_product_picks: Option<usize>,

    /// Minimum units per add-to-cart event
    #[arg(long, help = "Minimum add-to-cart quantity")]
    pub min_quantity: Option<u32>,

    /// Maximum units per add-to-cart event
    #[arg(long, help = "Maximum add-to-cart quantity")]
    pub max_quantity: Option<u32>,

    /// Product catalog file used to seed an empty catalog
    #[arg(
        long,
        help = "Product catalog JSON file",
        long_help = "JSON array of {\"name\", \"price\"} objects used to seed the product catalog. The built-in catalog is used when omitted."
    )]
    pub product_catalog: Option<String>,

    /// Directory for customers/events/line_items files
    #[arg(
        short,
        long,
        help = "Output directory (stdout when omitted)",
        long_help = "Directory that receives customers, events and line_items files. When omitted, tagged JSON lines are written to stdout."
    )]
    pub output_dir: Option<String>,

    /// Output format for the directory sink
    #[arg(long, help = "Output format (jsonl or json)")]
    pub output_format: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit console logs as JSON
    #[arg(long, help = "Emit console logs as JSON")]
    pub json_logs: bool,

    /// Directory for daily-rolling JSON log files
    #[arg(long, help = "Also write JSON logs to daily-rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of customers to simulate
    pub customer_count: Option<usize>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Fixed simulation time
    pub start_time: Option<DateTime<Utc>>,

    /// Probability that a customer has historic visits
    pub historic_visit_probability: Option<f64>,

    /// Probability that an added product is removed again
    pub remove_from_cart_probability: Option<f64>,

    /// Probability that a checkout is abandoned
    pub abandon_cart_probability: Option<f64>,

    /// Minimum live visits per customer
    pub min_live_visits: Option<usize>,

    /// Maximum live visits per customer
    pub max_live_visits: Option<usize>,

    /// Minimum products requested per customer
    pub min_product_picks: Option<usize>,

    /// Maximum products requested per customer
    pub max_product_picks: Option<usize>,

    /// Minimum add-to-cart quantity
    pub min_quantity: Option<u32>,

    /// Maximum add-to-cart quantity
    pub max_quantity: Option<u32>,

    /// Product catalog file used to seed an empty catalog
    pub product_catalog: Option<String>,

    /// Output directory
    pub output_dir: Option<String>,

    /// Output format for the directory sink
    pub output_format: Option<String>,
}

/// Configuration for the storefront simulation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Number of customers to simulate
    pub customer_count: usize,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Fixed simulation time; the system clock is used when `None`
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    /// Probability that a customer has historic visits (0.0-1.0)
    pub historic_visit_probability: f64,

    /// Probability that an added product is removed again (0.0-1.0)
    pub remove_from_cart_probability: f64,

    /// Probability that a checkout is abandoned (0.0-1.0)
    pub abandon_cart_probability: f64,

    /// Minimum live visits per customer
    pub min_live_visits: usize,

    /// Maximum live visits per customer
    pub max_live_visits: usize,

    /// Minimum products requested per customer
    pub min_product_picks: usize,

    /// Maximum products requested per customer
    pub max_product_picks: usize,

    /// Minimum add-to-cart quantity
    pub min_quantity: u32,

    /// Maximum add-to-cart quantity
    pub max_quantity: u32,

    /// Product catalog file used to seed an empty catalog
    pub product_catalog: Option<String>,

    /// Output directory (stdout when `None`)
    pub output_dir: Option<String>,

    /// Output format for the directory sink
    pub output_format: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Customer count is invalid
    #[error("Customer count must be greater than 0, got {0}")]
    InvalidCustomerCount(usize),

    /// A count range is inverted or starts at zero
    #[error("Invalid {field} range: min ({min}) must be >= 1 and <= max ({max})")]
    InvalidRange {
        /// Name of the range
        field: String,
        /// Configured minimum
        min: u64,
        /// Configured maximum
        max: u64,
    },

    /// Probability value is out of range
    #[error("Invalid probability for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability {
        /// Name of the field with invalid probability
        field: String,
        /// The invalid probability value
        value: f64,
    },

    /// Output format is not supported
    #[error("Unsupported output format: {0} (supported: jsonl, json)")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            customer_count: defaults::CUSTOMER_COUNT,
            seed: None,
            start_time: None,
            historic_visit_probability: defaults::HISTORIC_VISIT_PROBABILITY,
            remove_from_cart_probability: defaults::REMOVE_FROM_CART_PROBABILITY,
            abandon_cart_probability: defaults::ABANDON_CART_PROBABILITY,
            min_live_visits: defaults::MIN_LIVE_VISITS,
            max_live_visits: defaults::MAX_LIVE_VISITS,
            min_product_picks: defaults::MIN_PRODUCT_PICKS,
            max_product_picks: defaults::MAX_PRODUCT_PICKS,
            min_quantity: defaults::MIN_QUANTITY,
            max_quantity: defaults::MAX_QUANTITY,
            product_catalog: None,
            output_dir: None,
            output_format: defaults::OUTPUT_FORMAT.to_string(),
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            customer_count: config_file.customer_count.unwrap_or(defaults.customer_count),
            seed: config_file.seed.or(defaults.seed),
            start_time: config_file.start_time.or(defaults.start_time),
            historic_visit_probability: config_file
                .historic_visit_probability
                .unwrap_or(defaults.historic_visit_probability),
            remove_from_cart_probability: config_file
                .remove_from_cart_probability
                .unwrap_or(defaults.remove_from_cart_probability),
            abandon_cart_probability: config_file
                .abandon_cart_probability
                .unwrap_or(defaults.abandon_cart_probability),
            min_live_visits: config_file.min_live_visits.unwrap_or(defaults.min_live_visits),
            max_live_visits: config_file.max_live_visits.unwrap_or(defaults.max_live_visits),
            min_product_picks: config_file.min_product_picks.unwrap_or(defaults.min_product_picks),
            max_product_picks: config_file.max_product_picks.unwrap_or(defaults.max_product_picks),
            min_quantity: config_file.min_quantity.unwrap_or(defaults.min_quantity),
            max_quantity: config_file.max_quantity.unwrap_or(defaults.max_quantity),
            product_catalog: config_file.product_catalog.or(defaults.product_catalog),
            output_dir: config_file.output_dir.or(defaults.output_dir),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.customer_count {
            config.customer_count = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.start_time {
            config.start_time = Some(value);
        }
        if let Some(value) = args.historic_visit_probability {
            config.historic_visit_probability = value;
        }
        if let Some(value) = args.remove_from_cart_probability {
            config.remove_from_cart_probability = value;
        }
        if let Some(value) = args.abandon_cart_probability {
            config.abandon_cart_probability = value;
        }
        if let Some(value) = args.min_live_visits {
            config.min_live_visits = value;
        }
        if let Some(value) = args.max_live_visits {
            config.max_live_visits = value;
        }
        if let Some(value) = args.min_product_picks {
            config.min_product_picks = value;
        }
        if let Some(value) = args.max_product_picks {
            config.max_product_picks = value;
        }
        if let Some(value) = args.min_quantity {
            config.min_quantity = value;
        }
        if let Some(value) = args.max_quantity {
            config.max_quantity = value;
        }
        if let Some(value) = args.product_catalog {
            config.product_catalog = Some(value);
        }
        if let Some(value) = args.output_dir {
            config.output_dir = Some(value);
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.customer_count == 0 {
            return Err(ConfigValidationError::InvalidCustomerCount(self.customer_count));
        }

        self.validate_probability("historic_visit_probability", self.historic_visit_probability)?;
        self.validate_probability(
            "remove_from_cart_probability",
            self.remove_from_cart_probability,
        )?;
        self.validate_probability("abandon_cart_probability", self.abandon_cart_probability)?;

        Self::validate_range("live_visits", self.min_live_visits as u64, self.max_live_visits as u64)?;
        Self::validate_range(
            "product_picks",
            self.min_product_picks as u64,
            self.max_product_picks as u64,
        )?;
        Self::validate_range("quantity", self.min_quantity as u64, self.max_quantity as u64)?;

        self.get_output_format().map_err(|_| {
            ConfigValidationError::InvalidOutputFormat(self.output_format.clone())
        })?;

        Ok(())
    }

    fn validate_probability(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidProbability {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn validate_range(field: &str, min: u64, max: u64) -> Result<(), ConfigValidationError> {
        if min == 0 || min > max {
            return Err(ConfigValidationError::InvalidRange { field: field.to_string(), min, max });
        }
        Ok(())
    }

    /// Get the live visit count range as a tuple
    pub fn live_visits(&self) -> (usize, usize) {
        (self.min_live_visits, self.max_live_visits)
    }

    /// Get the product pick count range as a tuple
    pub fn product_picks(&self) -> (usize, usize) {
        (self.min_product_picks, self.max_product_picks)
    }

    /// Get the add-to-cart quantity range as a tuple
    pub fn quantity(&self) -> (u32, u32) {
        (self.min_quantity, self.max_quantity)
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }

    /// Seed for the product catalog's own randomness stream
    ///
    /// Derived from the run seed so that catalog ids never replay the bytes
    /// the simulation stream draws for customer, event and order ids.
    pub fn catalog_seed(&self) -> Option<u64> {
        self.seed.map(|seed| seed ^ defaults::CATALOG_SEED_SALT)
    }

    /// Clock for the run: pinned at `start_time` when set, the system time otherwise
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.start_time {
            Some(instant) => Arc::new(FixedClock::new(instant)),
            None => Arc::new(SystemClock),
        }
    }
}

fn parse_start_time(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(value, None).map_err(|e| e.to_string())
}
