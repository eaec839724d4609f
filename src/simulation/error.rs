//! Error types and handling
//!
//! This module contains the error taxonomy shared by every layer of the
//! simulation. Nothing here recovers locally: an error aborts the current
//! customer and, through the runner, the whole batch.

use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A timestamp or UUID string could not be parsed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A constructed event violates its schema
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    /// The product source or the sink failed
    #[error("Dependency failure: {0}")]
    Dependency(String),

    /// Configuration could not be turned into a runnable simulation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create a malformed input error
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an invalid event data error
    pub fn invalid_event_data(msg: impl Into<String>) -> Self {
        Self::InvalidEventData(msg.into())
    }

    /// Create a dependency error
    pub fn dependency(msg: impl Into<String>) -> Self {
        Self::Dependency(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::MalformedInput(_) => "Malformed Input",
            SimulationError::InvalidEventData(_) => "Invalid Event Data",
            SimulationError::Dependency(_) => "Dependency",
            SimulationError::Configuration(_) => "Configuration",
            SimulationError::Io(_) => "IO",
            SimulationError::Serialization(_) => "Serialization",
        }
    }

    /// Whether the error came from outside the engine (product source, sink, filesystem)
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, SimulationError::Dependency(_) | SimulationError::Io(_))
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let malformed = SimulationError::malformed_input("bad uuid");
        assert!(matches!(malformed, SimulationError::MalformedInput(_)));
        assert_eq!(malformed.to_string(), "Malformed input: bad uuid");

        let invalid = SimulationError::invalid_event_data("quantity must be >= 1");
        assert_eq!(invalid.to_string(), "Invalid event data: quantity must be >= 1");

        let dependency = SimulationError::dependency("catalog offline");
        assert_eq!(dependency.to_string(), "Dependency failure: catalog offline");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::Io(_)));
        assert!(sim_error.is_dependency_failure());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::malformed_input("x").category(), "Malformed Input");
        assert_eq!(SimulationError::invalid_event_data("x").category(), "Invalid Event Data");
        assert_eq!(SimulationError::dependency("x").category(), "Dependency");
        assert_eq!(SimulationError::configuration("x").category(), "Configuration");

        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(SimulationError::from(json_error).category(), "Serialization");
    }

    #[test]
    fn test_simulation_result_type() {
        let success: SimulationResult<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: SimulationResult<i32> = Err(SimulationError::dependency("Test"));
        assert!(failure.is_err());
        assert!(!SimulationError::invalid_event_data("x").is_dependency_failure());
    }
}
