//! Error types and handling
//!
//! This module contains error types for the simulation. Every failure is raised
//! synchronously by the call that detects it; nothing here is retried.

use crate::types::ConfigValidationError;
use thiserror::Error;

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A run parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Aggregation was attempted without observations or without elapsed time
    #[error("Empty run: {0}")]
    EmptyRun(String),

    /// The scheduler ran dry while some employee was still in the system
    #[error("Incomplete run: {0}")]
    IncompleteRun(String),

    /// An employee process was driven through an illegal state change
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Configuration(#[from] ConfigValidationError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create an empty run error
    pub fn empty_run(msg: impl Into<String>) -> Self {
        Self::EmptyRun(msg.into())
    }

    /// Create an incomplete run error
    pub fn incomplete_run(msg: impl Into<String>) -> Self {
        Self::IncompleteRun(msg.into())
    }

    /// Create an invalid transition error
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Check if this is a recoverable error
    ///
    /// The model is deterministic and does no I/O while running, so a failed
    /// configuration fails the same way every time. Only output errors are worth
    /// another attempt.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::InvalidParameter(_) => false,
            SimulationError::EmptyRun(_) => false,
            SimulationError::IncompleteRun(_) => false,
            SimulationError::InvalidTransition(_) => false,
            SimulationError::Configuration(_) => false,
            SimulationError::Io(_) => true,
            SimulationError::Serialization(_) => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::InvalidParameter(_) => "Invalid Parameter",
            SimulationError::EmptyRun(_) => "Empty Run",
            SimulationError::IncompleteRun(_) => "Incomplete Run",
            SimulationError::InvalidTransition(_) => "Invalid Transition",
            SimulationError::Configuration(_) => "Configuration",
            SimulationError::Io(_) => "IO",
            SimulationError::Serialization(_) => "Serialization",
        }
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
        let error = SimulationError::invalid_parameter("capacity must be at least 1");
        assert!(matches!(error, SimulationError::InvalidParameter(_)));
        assert_eq!(error.to_string(), "Invalid parameter: capacity must be at least 1");

        let error = SimulationError::empty_run("no observations");
        assert!(matches!(error, SimulationError::EmptyRun(_)));
        assert_eq!(error.to_string(), "Empty run: no observations");
    }

    #[test]
    fn test_error_from_config_validation() {
        let error: SimulationError = ConfigValidationError::EmptyScannerCounts.into();
        assert!(matches!(error, SimulationError::Configuration(_)));
        assert_eq!(error.category(), "Configuration");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::Io(_)));
        assert!(sim_error.is_recoverable());
    }

    #[test]
    fn test_simulation_errors_are_fatal() {
        assert!(!SimulationError::invalid_parameter("x").is_recoverable());
        assert!(!SimulationError::empty_run("x").is_recoverable());
        assert!(!SimulationError::incomplete_run("x").is_recoverable());
        assert!(!SimulationError::invalid_transition("x").is_recoverable());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(SimulationError::invalid_parameter("x").category(), "Invalid Parameter");
        assert_eq!(SimulationError::empty_run("x").category(), "Empty Run");
        assert_eq!(SimulationError::incomplete_run("x").category(), "Incomplete Run");
    }
}
