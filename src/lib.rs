//! Scanner Entry Simulator
//!
//! A discrete-event simulation of employees passing through a bank of badge scanners
//! at a building entrance, used to decide how many scanners keep the morning rush
//! moving.
//!
//! # Overview
//!
//! Employees arrive at uniformly random times over an arrival window. Each one takes a
//! free scanner if there is one and otherwise waits in a single FIFO line. Scanning
//! takes a fixed amount of time. Every run is seeded, so the same configuration always
//! produces the same numbers, and a sweep replays one arrival sequence against several
//! scanner counts so the results are directly comparable.
//!
//! ## Key Features
//!
//! - **Event Engine**: Time-ordered event delivery with FIFO tie-breaking
//! - **Scanner Pool**: Bounded pool with direct hand-off to the head of the line
//! - **Employee Lifecycle**: Explicit state machine from arrival to departure
//! - **Run Statistics**: Mean wait, mean queue length, throughput and utilization
//! - **Scanner Sweep**: Side-by-side comparison of scanner counts
//! - **Configurable**: JSON configuration files with command line overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use scanner_entry_simulator::*;
//!
//! let config = SimulationConfig {
//!     employee_count: 500,
//!     window_end: 900.0,
//!     scanner_counts: vec![2, 4, 8],
//!     seed: 7,
//!     ..Default::default()
//! };
//!
//! let report = ScannerSweep::new(config)?.run()?;
//! for entry in &report.entries {
//!     println!("{}", entry.result.summary());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, and configuration
//! - [`simulation`]: Event engine, scanner pool, statistics, sweep and reporting
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────────┐    ┌─────────────┐
//! │   Types     │    │    Simulation    │    │   Report    │
//! │             │    │                  │    │             │
//! │ Config      │───►│ ArrivalGenerator │───►│ Text table  │
//! │ Enums       │    │ ScannerBank      │    │ JSON        │
//! │ Identifiers │    │ RunResult/Sweep  │    │             │
//! └─────────────┘    └──────────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigError, ConfigValidationError, EmployeeId, OutputFormat, SimulationConfig, TimeUnit,
};

// Simulation types and functionality
pub use simulation::{
    run_with_arrivals, ArrivalGenerator, ArrivalWindow, EmployeeProcess, EmployeeRecord,
    LoggingConfig, ProcessState, ResourcePool, RunResult, ScannerBankSimulation, ScannerSweep,
    SimulationClock, SimulationError, SimulationResult, SweepEntry, SweepReport,
};
