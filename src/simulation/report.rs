//! Sweep report formatting
//!
//! Turns a [`SweepReport`] into a text table or a JSON document. Nothing here feeds
//! back into the simulation.

use crate::simulation::{SimulationResult, SweepEntry, SweepReport};
use crate::types::TimeUnit;
use chrono::{Duration, NaiveTime};
use std::fmt::Write;

/// One report row with values converted to the reporting unit
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Number of scanners
    pub scanners: usize,
    /// Total run span in the reporting unit
    pub total_entry_time: f64,
    /// Mean wait in the reporting unit
    pub average_wait: f64,
    /// Mean queue length seen at entry
    pub average_queue_length: f64,
    /// Employees per reporting unit
    pub throughput: f64,
    /// Utilization as a fraction
    pub utilization: f64,
    /// Wall-clock time the last employee cleared the scanners
    pub last_through_at: NaiveTime,
}

impl ReportRow {
    /// Convert one sweep entry
    pub fn from_entry(entry: &SweepEntry, unit: TimeUnit, opens_at: NaiveTime) -> Self {
        let result = &entry.result;
        let offset = Duration::milliseconds((result.last_departure * 1000.0).round() as i64);
        Self {
            scanners: entry.scanners,
            total_entry_time: unit.from_seconds(result.total_run_span),
            average_wait: unit.from_seconds(result.mean_wait_time),
            average_queue_length: result.mean_queue_length,
            throughput: unit.rate_from_per_second(result.throughput),
            utilization: result.utilization,
            last_through_at: opens_at + offset,
        }
    }
}

impl SweepReport {
    /// Rows converted to `unit`, in sweep order
    pub fn rows(&self, unit: TimeUnit, opens_at: NaiveTime) -> Vec<ReportRow> {
        self.entries.iter().map(|entry| ReportRow::from_entry(entry, unit, opens_at)).collect()
    }

    /// Render the sweep as a text table
    pub fn render_text(&self, unit: TimeUnit, opens_at: NaiveTime) -> String {
        let suffix = unit.suffix();
        let mut out = String::new();

        let _ = writeln!(out, "=== Scanner Sweep ===");
        let _ = writeln!(
            out,
            "{} employees arriving over {:.1} {} from {}, {:.1}s per scan, seed {}",
            self.employee_count,
            unit.from_seconds(self.window.length()),
            unit,
            opens_at.format("%H:%M:%S"),
            self.scan_time,
            self.seed
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>8}  {:>14}  {:>12}  {:>10}  {:>16}  {:>11}  {:>10}",
            "Scanners",
            format!("Total ({})", suffix),
            format!("Wait ({})", suffix),
            "Avg Queue",
            format!("Throughput (/{})", suffix),
            "Utilization",
            "Last Thru"
        );

        for row in self.rows(unit, opens_at) {
            let _ = writeln!(
                out,
                "{:>8}  {:>14.2}  {:>12.2}  {:>10.2}  {:>16.2}  {:>10.1}%  {:>10}",
                row.scanners,
                row.total_entry_time,
                row.average_wait,
                row.average_queue_length,
                row.throughput,
                row.utilization * 100.0,
                row.last_through_at.format("%H:%M:%S").to_string()
            );
        }

        if let Some(best) = self.entries.iter().min_by(|a, b| {
            a.result.mean_wait_time.total_cmp(&b.result.mean_wait_time)
        }) {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Lowest average wait: {} scanners ({:.2} {})",
                best.scanners,
                unit.from_seconds(best.result.mean_wait_time),
                suffix
            );
        }

        out
    }

    /// Render the sweep as pretty-printed JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{ArrivalWindow, RunResult};

    fn sample_report() -> SweepReport {
        SweepReport {
            employee_count: 3,
            scan_time: 8.0,
            window: ArrivalWindow::new(0.0, 10.0),
            seed: 0,
            entries: vec![
                SweepEntry {
                    scanners: 1,
                    result: RunResult {
                        capacity: 1,
                        employee_count: 3,
                        total_run_span: 24.0,
                        mean_wait_time: 7.0,
                        mean_queue_length: 0.5,
                        throughput: 0.125,
                        utilization: 1.0,
                        max_wait_time: 14.0,
                        last_departure: 24.0,
                    },
                },
                SweepEntry {
                    scanners: 3,
                    result: RunResult {
                        capacity: 3,
                        employee_count: 3,
                        total_run_span: 10.0,
                        mean_wait_time: 0.0,
                        mean_queue_length: 0.0,
                        throughput: 0.3,
                        utilization: 0.8,
                        max_wait_time: 0.0,
                        last_departure: 10.0,
                    },
                },
            ],
        }
    }

    #[test]
    fn test_rows_convert_units() {
        let opens_at = NaiveTime::from_hms_opt(7, 20, 0).unwrap();
        let rows = sample_report().rows(TimeUnit::Minutes, opens_at);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_entry_time, 24.0 / 60.0);
        assert_eq!(rows[0].throughput, 0.125 * 60.0);
        assert_eq!(rows[0].last_through_at, NaiveTime::from_hms_opt(7, 20, 24).unwrap());

        let rows = sample_report().rows(TimeUnit::Seconds, opens_at);
        assert_eq!(rows[0].average_wait, 7.0);
    }

    #[test]
    fn test_render_text_table() {
        let opens_at = NaiveTime::from_hms_opt(7, 20, 0).unwrap();
        let text = sample_report().render_text(TimeUnit::Seconds, opens_at);

        assert!(text.contains("=== Scanner Sweep ==="));
        assert!(text.contains("3 employees arriving over 10.0 seconds from 07:20:00"));
        assert!(text.contains("Throughput (/s)"));
        assert!(text.contains("07:20:24"));
        assert!(text.contains("100.0%"));
        assert!(text.contains("Lowest average wait: 3 scanners (0.00 s)"));
    }

    #[test]
    fn test_json_output() {
        let json = sample_report().to_json().unwrap();
        let back: SweepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_report());
    }
}
