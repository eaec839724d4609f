//! Logging and tracing configuration
//!
//! Console output always goes to stderr so stdout stays free for the record
//! stream written by the stdout sink.

use std::io::{self, IsTerminal};
use tracing::{info, Level};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use crate::types::config::CliArgs;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Result of logging initialization
pub type LoggingResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting on the console
    pub json_format: bool,
    /// Log file directory; file logging is off when `None`
    pub log_directory: Option<String>,
    /// Log file prefix
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_directory: None,
            log_file_prefix: "storefront-event-simulator".to_string(),
            enable_span_events: false,
            enable_ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the `--verbose` / `--debug` command line flags
    ///
    /// `debug` wins over `verbose`; neither keeps the quiet default.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::new().with_level(Level::DEBUG).with_span_events()
        } else if verbose {
            Self::new().with_level(Level::INFO)
        } else {
            Self::new()
        }
    }

    /// Configuration for the command line: verbosity, `--json-logs` and `--log-dir`
    ///
    /// Colors are dropped when stderr is not a terminal.
    pub fn from_cli_args(args: &CliArgs) -> Self {
        let mut config = Self::from_flags(args.verbose, args.debug);
        if args.json_logs {
            config = config.with_json_format();
        }
        if let Some(dir) = &args.log_dir {
            config = config.with_file_logging(dir.clone());
        }
        if !io::stderr().is_terminal() {
            config = config.without_ansi();
        }
        config
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable daily-rolling file logging into `directory`
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = Some(directory.into());
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), self.level)
    }

    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// The returned guard flushes the file writer on drop; keep it alive for
    /// the lifetime of the process.
    pub fn init(self) -> LoggingResult<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()));

        let console_layer = if self.json_format {
            fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
                .boxed()
        } else {
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(self.enable_ansi)
                .with_span_events(self.span_events())
                .boxed()
        };

        let registry = Registry::default().with(env_filter).with(console_layer);

        let guard = match &self.log_directory {
            Some(log_dir) => {
                let file_appender = rolling::daily(log_dir, &self.log_file_prefix);
                let (file_writer, guard) = non_blocking(file_appender);
                let file_layer = fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_span_events(self.span_events());
                registry.with(file_layer).try_init()?;
                Some(guard)
            }
            None => {
                registry.try_init()?;
                None
            }
        };

        info!("Logging initialized at level {}", self.level);
        Ok(guard)
    }
}

/// Macro for creating performance measurement spans
#[macro_export]
macro_rules! perf_span {
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info_span!(
            $name,
            component = "performance",
            $($key = $value,)*
        )
    };
    ($name:expr) => {
        tracing::info_span!(
            $name,
            component = "performance",
        )
    };
}
