//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm) and Imperial (inch) systems
//! and between the feed rate units a job file may be written in.
//! Internally every length is millimeters and every feed rate mm/min,
//! so machine time estimates come out in minutes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Feed rate units selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedRateUnits {
    /// Millimeters per minute
    #[default]
    MmPerMin,
    /// Millimeters per second
    MmPerSec,
    /// Inches per minute
    InPerMin,
    /// Inches per second
    InPerSec,
}

impl FeedRateUnits {
    /// Convert a feed rate given in these units to mm/min
    pub fn to_mm_per_min(self, value: f64) -> f64 {
        match self {
            Self::MmPerMin => value,
            Self::MmPerSec => value * 60.0,
            Self::InPerMin => value * MM_PER_INCH,
            Self::InPerSec => value * MM_PER_INCH * 60.0,
        }
    }

    /// Convert a feed rate in mm/min to these units
    pub fn from_mm_per_min(self, value_mm_per_min: f64) -> f64 {
        match self {
            Self::MmPerMin => value_mm_per_min,
            Self::MmPerSec => value_mm_per_min / 60.0,
            Self::InPerMin => value_mm_per_min / MM_PER_INCH,
            Self::InPerSec => (value_mm_per_min / MM_PER_INCH) / 60.0,
        }
    }
}

impl fmt::Display for FeedRateUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MmPerMin => write!(f, "mm/min"),
            Self::MmPerSec => write!(f, "mm/sec"),
            Self::InPerMin => write!(f, "in/min"),
            Self::InPerSec => write!(f, "in/sec"),
        }
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3}", value_mm),
        MeasurementSystem::Imperial => format!("{:.3}", value_mm / MM_PER_INCH),
    }
}

/// Format feed rate value for display
///
/// * `value_mm_per_min` - Feed rate in mm/min
/// * `units` - Target feed rate units
pub fn format_feed_rate(value_mm_per_min: f64, units: FeedRateUnits) -> String {
    format!("{:.3}", units.from_mm_per_min(value_mm_per_min))
}

/// Format a machine time given in minutes as `H:MM:SS`
pub fn format_machine_time(minutes: f64) -> String {
    if !minutes.is_finite() || minutes < 0.0 {
        return "--:--:--".to_string();
    }
    let total_seconds = (minutes * 60.0).round() as u64;
    format!(
        "{}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60
    )
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metric_format() {
        assert_eq!(format_length(10.5, MeasurementSystem::Metric), "10.500");
    }

    #[test]
    fn test_imperial_format() {
        assert_eq!(format_length(25.4, MeasurementSystem::Imperial), "1.000");
        assert_eq!(format_length(12.7, MeasurementSystem::Imperial), "0.500");
    }

    #[test]
    fn test_feed_rate_conversion() {
        assert_eq!(format_feed_rate(1000.0, FeedRateUnits::MmPerMin), "1000.000");
        assert_eq!(format_feed_rate(1000.0, FeedRateUnits::MmPerSec), "16.667");
        assert_eq!(format_feed_rate(1000.0, FeedRateUnits::InPerMin), "39.370");

        assert_relative_eq!(FeedRateUnits::MmPerSec.to_mm_per_min(10.0), 600.0);
        assert_relative_eq!(FeedRateUnits::InPerMin.to_mm_per_min(10.0), 254.0);
        assert_relative_eq!(FeedRateUnits::InPerSec.to_mm_per_min(1.0), 1524.0);
    }

    #[test]
    fn test_machine_time_format() {
        assert_eq!(format_machine_time(0.5), "0:00:30");
        assert_eq!(format_machine_time(61.25), "1:01:15");
        assert_eq!(format_machine_time(f64::INFINITY), "--:--:--");
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(get_unit_label(MeasurementSystem::Metric), "mm");
        assert_eq!(get_unit_label(MeasurementSystem::Imperial), "in");
    }

    #[test]
    fn test_measurement_system_from_str() {
        assert_eq!("in".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Imperial));
        assert_eq!("Metric".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Metric));
        assert!("furlong".parse::<MeasurementSystem>().is_err());
    }
}
