//! Configuration structures for the scanner entry simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the parameters of a scanner sweep.

use super::{OutputFormat, TimeUnit};
use crate::simulation::ArrivalWindow;
use chrono::NaiveTime;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Defaults for the morning arrival scenario
pub mod defaults {
    /// Employees passing through the scanner bank
    pub const EMPLOYEE_COUNT: usize = 10_000;

    /// Seconds a scanner spends on one employee
    pub const SCAN_TIME: f64 = 8.0;

    /// Start of the arrival window in seconds
    pub const WINDOW_START: f64 = 0.0;

    /// End of the arrival window in seconds (40 minutes after the start)
    pub const WINDOW_END: f64 = 40.0 * 60.0;

    /// Scanner counts compared by a default sweep
    pub const SCANNER_COUNTS: [usize; 5] = [5, 10, 20, 30, 35];

    /// Wall-clock time at which the arrival window opens
    pub const WINDOW_OPENS_AT: &str = "07:20:00";
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scanner-entry-simulator",
    version = "0.1.0",
    about = "Scanner Entry Simulator - Models employee entry through a bank of ID scanners",
    long_about = "Replays a morning arrival window through a bank of identical security scanners and reports how the scanner count affects wait time, queue length, throughput, and utilization.

EXAMPLES:
    # Run the default sweep (10000 employees, 5/10/20/30/35 scanners)
    scanner-entry-simulator

    # Use a configuration file
    scanner-entry-simulator --config config.json

    # Override specific settings
    scanner-entry-simulator --employee-count 2000 --scanners 2,4,8 --scan-time 6

    # Generate configuration template
    scanner-entry-simulator --print-config > my-config.json

    # Validate configuration without running
    scanner-entry-simulator --config my-config.json --dry-run

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

    /// Number of employees arriving during the window
    #[arg(
        long,
        help = "Number of employees to simulate",
        long_help = "Total number of employees arriving during the window. Must be greater than 0. Default: 10000"
    )]
    pub employee_count: Option<usize>,

    /// Seconds each scan takes
    #[arg(long, help = "Seconds a scanner spends on one employee")]
    pub scan_time: Option<f64>,

    /// Start of the arrival window in seconds
    #[arg(long, help = "Start of the arrival window (seconds)")]
    pub window_start: Option<f64>,

    /// End of the arrival window in seconds
    #[arg(long, help = "End of the arrival window (seconds, exclusive)")]
    pub window_end: Option<f64>,

    /// Scanner counts to compare
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma separated scanner counts to compare",
        long_help = "Comma separated list of scanner counts. The same arrival sequence is replayed once per count. Default: 5,10,20,30,35"
    )]
    pub scanners: Option<Vec<usize>>,

    /// Random seed for the arrival sequence
    #[arg(long, help = "Random seed for reproducible arrivals")]
    pub seed: Option<u64>,

    /// Wall-clock time of the window start
    #[arg(long, help = "Wall-clock time the window opens (HH:MM[:SS])")]
    pub window_opens_at: Option<String>,

    /// Unit used in the report
    #[arg(long, help = "Report unit (seconds or minutes)")]
    pub report_unit: Option<TimeUnit>,

    /// Report output format
    #[arg(long, help = "Output format (text or json)")]
    pub output_format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

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
    /// Number of employees arriving during the window
    pub employee_count: Option<usize>,

    /// Seconds each scan takes
    pub scan_time: Option<f64>,

    /// Start of the arrival window in seconds
    pub window_start: Option<f64>,

    /// End of the arrival window in seconds
    pub window_end: Option<f64>,

    /// Scanner counts to compare
    pub scanner_counts: Option<Vec<usize>>,

    /// Random seed for the arrival sequence
    pub seed: Option<u64>,

    /// Wall-clock time of the window start
    pub window_opens_at: Option<String>,

    /// Unit used in the report
    pub report_unit: Option<TimeUnit>,

    /// Report output format
    pub output_format: Option<OutputFormat>,
}

/// Configuration for a scanner sweep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Number of employees arriving during the window
    pub employee_count: usize,

    /// Seconds each scan takes
    pub scan_time: f64,

    /// Start of the arrival window in seconds
    pub window_start: f64,

    /// End of the arrival window in seconds (exclusive)
    pub window_end: f64,

    /// Scanner counts to compare, in report order
    pub scanner_counts: Vec<usize>,

    /// Random seed for the arrival sequence
    pub seed: u64,

    /// Wall-clock time of the window start, `HH:MM:SS`
    pub window_opens_at: String,

    /// Unit used in the report
    pub report_unit: TimeUnit,

    /// Report output format
    pub output_format: OutputFormat,
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
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// Employee count is invalid
    #[error("Employee count must be greater than 0, got {0}")]
    InvalidEmployeeCount(usize),

    /// Scan time is not a positive finite number
    #[error("Scan time must be a positive number of seconds, got {0}")]
    InvalidScanTime(f64),

    /// Arrival window is malformed
    #[error("Invalid arrival window: start ({start}) must be finite and before end ({end})")]
    InvalidWindow {
        /// Start of the window
        start: f64,
        /// End of the window
        end: f64,
    },

    /// No scanner counts were given
    #[error("At least one scanner count is required")]
    EmptyScannerCounts,

    /// A scanner count is zero
    #[error("Scanner count must be greater than 0, got {0}")]
    InvalidScannerCount(usize),

    /// Window opening time could not be parsed
    #[error("Invalid wall-clock time '{0}' (expected HH:MM or HH:MM:SS)")]
    InvalidClockTime(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            employee_count: defaults::EMPLOYEE_COUNT,
            scan_time: defaults::SCAN_TIME,
            window_start: defaults::WINDOW_START,
            window_end: defaults::WINDOW_END,
            scanner_counts: defaults::SCANNER_COUNTS.to_vec(),
            seed: 0,
            window_opens_at: defaults::WINDOW_OPENS_AT.to_string(),
            report_unit: TimeUnit::Minutes,
            output_format: OutputFormat::Text,
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

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
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
            employee_count: config_file.employee_count.unwrap_or(defaults.employee_count),
            scan_time: config_file.scan_time.unwrap_or(defaults.scan_time),
            window_start: config_file.window_start.unwrap_or(defaults.window_start),
            window_end: config_file.window_end.unwrap_or(defaults.window_end),
            scanner_counts: config_file.scanner_counts.unwrap_or(defaults.scanner_counts),
            seed: config_file.seed.unwrap_or(defaults.seed),
            window_opens_at: config_file.window_opens_at.unwrap_or(defaults.window_opens_at),
            report_unit: config_file.report_unit.unwrap_or(defaults.report_unit),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.employee_count {
            config.employee_count = value;
        }
        if let Some(value) = args.scan_time {
            config.scan_time = value;
        }
        if let Some(value) = args.window_start {
            config.window_start = value;
        }
        if let Some(value) = args.window_end {
            config.window_end = value;
        }
        if let Some(value) = args.scanners {
            config.scanner_counts = value;
        }
        if let Some(value) = args.seed {
            config.seed = value;
        }
        if let Some(value) = args.window_opens_at {
            config.window_opens_at = value;
        }
        if let Some(value) = args.report_unit {
            config.report_unit = value;
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
        if self.employee_count == 0 {
            return Err(ConfigValidationError::InvalidEmployeeCount(self.employee_count));
        }

        if !self.scan_time.is_finite() || self.scan_time <= 0.0 {
            return Err(ConfigValidationError::InvalidScanTime(self.scan_time));
        }

        if !self.window_start.is_finite()
            || !self.window_end.is_finite()
            || self.window_start < 0.0
            || self.window_end <= self.window_start
        {
            return Err(ConfigValidationError::InvalidWindow {
                start: self.window_start,
                end: self.window_end,
            });
        }

        if self.scanner_counts.is_empty() {
            return Err(ConfigValidationError::EmptyScannerCounts);
        }
        if let Some(&zero) = self.scanner_counts.iter().find(|&&count| count == 0) {
            return Err(ConfigValidationError::InvalidScannerCount(zero));
        }

        self.opening_time()?;

        Ok(())
    }

    /// Parse the wall-clock time at which the arrival window opens
    pub fn opening_time(&self) -> Result<NaiveTime, ConfigValidationError> {
        NaiveTime::parse_from_str(&self.window_opens_at, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.window_opens_at, "%H:%M"))
            .map_err(|_| ConfigValidationError::InvalidClockTime(self.window_opens_at.clone()))
    }

    /// Arrival window as a half-open `[start, end)` interval
    pub fn arrival_window(&self) -> ArrivalWindow {
        ArrivalWindow::new(self.window_start, self.window_end)
    }

    /// Window length in seconds
    pub fn window_length(&self) -> f64 {
        self.window_end - self.window_start
    }

    /// Offered load: arrival rate times scan time, per scanner count
    ///
    /// Values above 1.0 mean the queue keeps growing for the whole window.
    pub fn offered_load(&self, scanners: usize) -> f64 {
        let arrival_rate = self.employee_count as f64 / self.window_length();
        arrival_rate * self.scan_time / scanners as f64
    }
}
