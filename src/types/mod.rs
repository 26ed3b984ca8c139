//! Core types and identifiers for the scanner entry simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: Arrival-order identifiers for employees
//! - **Enums**: Reporting units and output formats
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use scanner_entry_simulator::types::*;
//!
//! let employee = EmployeeId::new(3);
//! assert_eq!(employee.to_string(), "EMP_000003");
//!
//! let config = SimulationConfig {
//!     employee_count: 500,
//!     scanner_counts: vec![2, 4],
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
