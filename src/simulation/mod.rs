//! Discrete-event simulation of the scanner bank
//!
//! This module contains the event clock, the scanner pool, the employee state machine,
//! arrival generation, run statistics and the scanner count sweep.
//!
//! # Overview
//!
//! - **SimulationClock**: Time-ordered event queue with FIFO tie-breaking
//! - **ResourcePool**: Fixed number of scanners with a FIFO waiting line
//! - **EmployeeProcess**: Lifecycle of one employee from arrival to departure
//! - **ArrivalGenerator**: Uniform arrival times over a window from a seeded source
//! - **ScannerBankSimulation**: One run for one scanner count
//! - **RunResult**: Summary statistics of a completed run
//! - **ScannerSweep**: Several scanner counts replayed against the same arrivals
//!
//! # Usage Example
//!
//! ```rust
//! use scanner_entry_simulator::simulation::*;
//!
//! // Three employees, one scanner, eight seconds per scan
//! let result = run_with_arrivals(&[0.0, 1.0, 2.0], 8.0, 1).unwrap();
//! assert_eq!(result.mean_wait_time, 7.0);
//! assert_eq!(result.total_run_span, 24.0);
//!
//! // Seeded arrivals are reproducible
//! let window = ArrivalWindow::new(0.0, 600.0);
//! let first = run(200, window, 8.0, 3, 42).unwrap();
//! let second = run(200, window, 8.0, 3, 42).unwrap();
//! assert_eq!(first, second);
//! ```

pub mod arrivals;
pub mod clock;
pub mod engine;
pub mod error;
pub mod logging;
pub mod process;
pub mod report;
pub mod resource;
pub mod statistics;
pub mod sweep;

// Re-export all public types for convenience
pub use arrivals::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use process::*;
pub use report::*;
pub use resource::*;
pub use statistics::*;
pub use sweep::*;
