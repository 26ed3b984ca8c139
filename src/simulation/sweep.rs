//! Scanner count sweep
//!
//! Replays one arrival sequence against several scanner counts so the variants are
//! directly comparable. Each variant produces its own immutable [`RunResult`]; the
//! sweep simply collects them in the configured order.

use crate::simulation::{run_with_arrivals, ArrivalGenerator, ArrivalWindow, RunResult, SimulationResult};
use crate::types::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Result for one scanner count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    /// Number of scanners simulated
    pub scanners: usize,
    /// Outcome of the run
    pub result: RunResult,
}

/// Ordered results of a sweep together with the scenario that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Employees per run
    pub employee_count: usize,
    /// Seconds per scan
    pub scan_time: f64,
    /// Arrival window
    pub window: ArrivalWindow,
    /// Seed of the shared arrival sequence
    pub seed: u64,
    /// One entry per scanner count, in configured order
    pub entries: Vec<SweepEntry>,
}

impl SweepReport {
    /// Entry for a given scanner count
    pub fn entry(&self, scanners: usize) -> Option<&SweepEntry> {
        self.entries.iter().find(|entry| entry.scanners == scanners)
    }

    /// Smallest scanner count whose mean wait is at most `target_wait` seconds
    pub fn smallest_meeting_wait(&self, target_wait: f64) -> Option<usize> {
        self.entries
            .iter()
            .filter(|entry| entry.result.mean_wait_time <= target_wait)
            .map(|entry| entry.scanners)
            .min()
    }

    /// Scanner counts, in ascending order, whose mean wait is higher than that of a
    /// smaller count
    pub fn wait_regressions(&self) -> Vec<usize> {
        let mut by_capacity: Vec<&SweepEntry> = self.entries.iter().collect();
        by_capacity.sort_by_key(|entry| entry.scanners);
        by_capacity
            .windows(2)
            .filter(|pair| pair[1].result.mean_wait_time > pair[0].result.mean_wait_time)
            .map(|pair| pair[1].scanners)
            .collect()
    }
}

/// Runs the configured scanner counts against one shared arrival sequence
#[derive(Debug, Clone)]
pub struct ScannerSweep {
    config: SimulationConfig,
    elapsed: Option<Duration>,
}

impl ScannerSweep {
    /// Create a sweep from a validated configuration
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self { config, elapsed: None })
    }

    /// Configuration driving the sweep
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Wall-clock time the last call to [`ScannerSweep::run`] took
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Simulate every configured scanner count
    ///
    /// Stops at the first failing scanner count and returns its error.
    #[instrument(skip(self), fields(employees = self.config.employee_count, variants = self.config.scanner_counts.len()))]
    pub fn run(&mut self) -> SimulationResult<SweepReport> {
        let started = Instant::now();
        let window = self.config.arrival_window();
        let arrivals = ArrivalGenerator::new(self.config.employee_count, window)?
            .generate_seeded(self.config.seed);

        info!(
            "Replaying {} arrivals (seed {}) against {} scanner counts",
            arrivals.len(),
            self.config.seed,
            self.config.scanner_counts.len()
        );

        let mut entries = Vec::with_capacity(self.config.scanner_counts.len());
        for &scanners in &self.config.scanner_counts {
            debug!(
                scanners,
                offered_load = self.config.offered_load(scanners),
                "simulating scanner count"
            );
            let result = run_with_arrivals(&arrivals, self.config.scan_time, scanners)?;
            info!("{}", result.summary());
            entries.push(SweepEntry { scanners, result });
        }

        let report = SweepReport {
            employee_count: self.config.employee_count,
            scan_time: self.config.scan_time,
            window,
            seed: self.config.seed,
            entries,
        };

        let regressions = report.wait_regressions();
        if !regressions.is_empty() {
            warn!(
                "Mean wait increased with more scanners at counts {:?}; check the scenario",
                regressions
            );
        }

        self.elapsed = Some(started.elapsed());
        Ok(report)
    }
}
