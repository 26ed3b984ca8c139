//! Run statistics
//!
//! Summary statistics for one completed run. All values are computed in seconds;
//! unit conversion is left to the report layer.

use crate::simulation::{EmployeeRecord, RunObservations, SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one simulation run
///
/// `total_run_span` is the last arrival time plus the largest wait of the run plus
/// one scan. The largest wait does not have to belong to the last arrival, so this
/// can exceed the true makespan; `last_departure` carries the exact value. Because
/// the approximation never falls below the true makespan, utilization stays within
/// `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of scanners
    pub capacity: usize,
    /// Employees observed
    pub employee_count: usize,
    /// Last arrival + largest wait + one scan, in seconds
    pub total_run_span: f64,
    /// Mean time spent in line, in seconds
    pub mean_wait_time: f64,
    /// Mean number of employees still in line when someone stepped up to a scanner
    pub mean_queue_length: f64,
    /// Employees per second over `total_run_span`
    pub throughput: f64,
    /// Busy scanner time over available scanner time
    pub utilization: f64,
    /// Largest single wait, in seconds
    pub max_wait_time: f64,
    /// Time the last employee left a scanner, in seconds
    pub last_departure: f64,
}

impl RunResult {
    /// Aggregate the observations of a drained run
    pub fn from_observations(observations: &RunObservations) -> SimulationResult<Self> {
        Self::aggregate(
            &observations.records,
            observations.capacity,
            observations.service_duration,
            observations.busy_time,
        )
    }

    /// Aggregate per-employee records
    ///
    /// Fails with [`SimulationError::EmptyRun`] when there are no records or the run
    /// span is zero.
    pub fn aggregate(
        records: &[EmployeeRecord],
        capacity: usize,
        service_duration: f64,
        busy_time: f64,
    ) -> SimulationResult<Self> {
        if records.is_empty() {
            return Err(SimulationError::empty_run("no employee observations to aggregate"));
        }
        if capacity == 0 {
            return Err(SimulationError::invalid_parameter("capacity must be at least 1"));
        }

        let count = records.len() as f64;
        let last_arrival = records.iter().map(|r| r.arrival_time).fold(f64::MIN, f64::max);
        let max_wait_time = records.iter().map(|r| r.wait_time).fold(f64::MIN, f64::max);
        let last_departure = records.iter().map(|r| r.departure).fold(f64::MIN, f64::max);

        let total_run_span = last_arrival + max_wait_time + service_duration;
        if !total_run_span.is_finite() || total_run_span <= 0.0 {
            return Err(SimulationError::empty_run(format!(
                "run span must be positive, got {}",
                total_run_span
            )));
        }

        let mean_wait_time = records.iter().map(|r| r.wait_time).sum::<f64>() / count;
        let mean_queue_length =
            records.iter().map(|r| r.queue_length_at_entry as f64).sum::<f64>() / count;
        let throughput = count / total_run_span;
        let utilization = busy_time / (capacity as f64 * total_run_span);

        Ok(Self {
            capacity,
            employee_count: records.len(),
            total_run_span,
            mean_wait_time,
            mean_queue_length,
            throughput,
            utilization,
            max_wait_time,
            last_departure,
        })
    }

    /// How far `total_run_span` lies past the true makespan
    pub fn span_overestimate(&self) -> f64 {
        self.total_run_span - self.last_departure
    }

    /// Compact single line summary
    pub fn summary(&self) -> String {
        format!(
            "{} scanners: span {:.1}s | mean wait {:.2}s | mean queue {:.2} | throughput {:.3}/s | utilization {:.1}%",
            self.capacity,
            self.total_run_span,
            self.mean_wait_time,
            self.mean_queue_length,
            self.throughput,
            self.utilization * 100.0
        )
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeId;

    fn record(index: usize, arrival: f64, start: f64, service: f64, seen: usize) -> EmployeeRecord {
        EmployeeRecord {
            id: EmployeeId::new(index),
            arrival_time: arrival,
            queued_at: arrival,
            service_start: start,
            departure: start + service,
            wait_time: start - arrival,
            queue_length_at_entry: seen,
        }
    }

    #[test]
    fn test_single_scanner_scenario() {
        let records = vec![
            record(0, 0.0, 0.0, 8.0, 0),
            record(1, 1.0, 8.0, 8.0, 1),
            record(2, 2.0, 16.0, 8.0, 0),
        ];
        let result = RunResult::aggregate(&records, 1, 8.0, 24.0).unwrap();

        assert_eq!(result.mean_wait_time, 7.0);
        assert_eq!(result.total_run_span, 24.0);
        assert_eq!(result.throughput, 0.125);
        assert_eq!(result.utilization, 1.0);
        assert_eq!(result.max_wait_time, 14.0);
        assert_eq!(result.last_departure, 24.0);
        assert_eq!(result.employee_count, 3);
        assert!((result.mean_queue_length - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.span_overestimate(), 0.0);
    }

    #[test]
    fn test_span_uses_global_max_wait() {
        // The long wait belongs to employee 1, not to the last arrival
        let records = vec![
            record(0, 0.0, 0.0, 10.0, 0),
            record(1, 1.0, 10.0, 10.0, 0),
            record(2, 30.0, 30.0, 10.0, 0),
        ];
        let result = RunResult::aggregate(&records, 1, 10.0, 30.0).unwrap();

        assert_eq!(result.total_run_span, 30.0 + 9.0 + 10.0);
        assert_eq!(result.last_departure, 40.0);
        assert_eq!(result.span_overestimate(), 9.0);
        assert!(result.utilization <= 1.0);
    }

    #[test]
    fn test_empty_run_rejected() {
        assert!(matches!(
            RunResult::aggregate(&[], 1, 8.0, 0.0),
            Err(SimulationError::EmptyRun(_))
        ));
    }

    #[test]
    fn test_zero_span_rejected() {
        let records = vec![record(0, 0.0, 0.0, 0.0, 0)];
        assert!(matches!(
            RunResult::aggregate(&records, 1, 0.0, 0.0),
            Err(SimulationError::EmptyRun(_))
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let records = vec![record(0, 0.0, 0.0, 8.0, 0)];
        assert!(matches!(
            RunResult::aggregate(&records, 0, 8.0, 8.0),
            Err(SimulationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_summary_line() {
        let records = vec![record(0, 0.0, 0.0, 8.0, 0)];
        let result = RunResult::aggregate(&records, 2, 8.0, 8.0).unwrap();
        let summary = result.to_string();
        assert!(summary.starts_with("2 scanners"));
        assert!(summary.contains("utilization 50.0%"));
    }
}
