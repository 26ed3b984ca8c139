//! Enumeration types for the scanner entry simulator
//!
//! This module contains the enumeration types used for reporting: the time unit
//! results are presented in and the output format of a sweep report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one minute of logical time
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Unit used when presenting times and rates
///
/// The simulation core always works in seconds. Conversion happens only when a
/// result is formatted for a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Report times in seconds and rates per second
    Seconds,
    /// Report times in minutes and rates per minute
    Minutes,
}

impl TimeUnit {
    /// Convert a duration measured in seconds into this unit
    pub fn from_seconds(&self, seconds: f64) -> f64 {
        match self {
            TimeUnit::Seconds => seconds,
            TimeUnit::Minutes => seconds / SECONDS_PER_MINUTE,
        }
    }

    /// Convert a rate measured per second into a rate per this unit
    pub fn rate_from_per_second(&self, per_second: f64) -> f64 {
        match self {
            TimeUnit::Seconds => per_second,
            TimeUnit::Minutes => per_second * SECONDS_PER_MINUTE,
        }
    }

    /// Short suffix used in report columns
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
        }
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        TimeUnit::Minutes
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "seconds"),
            TimeUnit::Minutes => write!(f, "minutes"),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => Ok(TimeUnit::Seconds),
            "minutes" | "minute" | "mins" | "min" | "m" => Ok(TimeUnit::Minutes),
            _ => Err(format!("Unknown time unit: {}", s)),
        }
    }
}

/// Output formats for sweep reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable table
    Text,
    /// JSON document for downstream tooling
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "TEXT"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_conversion() {
        assert_eq!(TimeUnit::Seconds.from_seconds(120.0), 120.0);
        assert_eq!(TimeUnit::Minutes.from_seconds(120.0), 2.0);
        assert_eq!(TimeUnit::Seconds.rate_from_per_second(0.5), 0.5);
        assert_eq!(TimeUnit::Minutes.rate_from_per_second(0.5), 30.0);
    }

    #[test]
    fn test_time_unit_from_str() {
        assert_eq!("minutes".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("MIN".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert_eq!("s".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert!("hours".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_time_unit_display_and_suffix() {
        assert_eq!(format!("{}", TimeUnit::Minutes), "minutes");
        assert_eq!(TimeUnit::Minutes.suffix(), "min");
        assert_eq!(TimeUnit::Seconds.suffix(), "s");
        assert_eq!(TimeUnit::default(), TimeUnit::Minutes);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&TimeUnit::Seconds).unwrap(), "\"seconds\"");
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        let unit: TimeUnit = serde_json::from_str("\"minutes\"").unwrap();
        assert_eq!(unit, TimeUnit::Minutes);
    }
}
