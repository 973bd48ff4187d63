//! Job configuration files
//!
//! A job file carries the tool, the machining process and the bounds of a
//! single job. Both JSON and TOML are accepted; the format follows the file
//! extension.
//!
//! Feed rates are stored in the units named by `feedrate_units` and are
//! normalized to mm/min when the job settings are built.

use crate::error::{SettingsError, SettingsResult};
pub use millkit_core::units::{FeedRateUnits, MeasurementSystem};
use millkit_core::{BoundsError, BoundsResult};
use millkit_toolpath::{Bounds, BoundsType, ProcessSettings, ReferenceAxes, ToolSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Supported job file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                other.unwrap_or("no extension")
            ))),
        }
    }
}

/// Persisted form of a [`Bounds`]
///
/// The bounds type is stored as its numeric tag (0 relative margin,
/// 1 fixed margin, 2 custom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsConfig {
    pub name: String,
    pub bounds_type: u8,
    pub low: [f64; 3],
    pub high: [f64; 3],
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            name: "Job bounds".to_string(),
            bounds_type: BoundsType::RelativeMargin.tag(),
            low: [0.0; 3],
            high: [0.0; 3],
        }
    }
}

impl BoundsConfig {
    /// Decode the stored type tag
    pub fn bounds_type(&self) -> BoundsResult<BoundsType> {
        BoundsType::from_tag(self.bounds_type).ok_or_else(|| {
            BoundsError::UnsupportedType(format!("bounds type tag {}", self.bounds_type))
        })
    }

    /// Build live bounds around an optional reference object
    ///
    /// Without references the bounds fall back to `Custom`, so the stored
    /// values become the absolute limits.
    pub fn to_bounds(
        &self,
        references: Option<(ReferenceAxes, ReferenceAxes)>,
    ) -> BoundsResult<Bounds> {
        let bounds_type = self.bounds_type()?;
        let (ref_low, ref_high) = match references {
            Some((low, high)) => (Some(low), Some(high)),
            None => (None, None),
        };
        let mut bounds = Bounds::new(
            Some(bounds_type),
            Some(&self.low),
            Some(&self.high),
            ref_low,
            ref_high,
        )?;
        bounds.set_name(self.name.as_str());
        Ok(bounds)
    }

    /// Capture the current state of live bounds
    pub fn from_bounds(bounds: &Bounds) -> Self {
        let (low, high) = bounds.bounds();
        Self {
            name: bounds.name().to_string(),
            bounds_type: bounds.bounds_type().tag(),
            low,
            high,
        }
    }
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobConfig {
    /// Units of `tool.feedrate` in the file
    #[serde(default)]
    pub feedrate_units: FeedRateUnits,
    pub tool: ToolSettings,
    pub process: ProcessSettings,
    #[serde(default)]
    pub bounds: BoundsConfig,
}

impl JobConfig {
    /// Create a job configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a job from a `.json` or `.toml` file and validate it
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded job configuration from {}", path.display());
        Ok(config)
    }

    /// Validate and save the job to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = FileFormat::from_path(path)?;

        let content = match format {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => self.to_toml_string()?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!("Saved job configuration to {}", path.display());
        Ok(())
    }

    /// TOML rendering of the configuration
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Tool feed rate converted to mm/min
    pub fn feedrate_mm_per_min(&self) -> f64 {
        self.feedrate_units.to_mm_per_min(self.tool.feedrate)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !self.tool.feedrate.is_finite() || self.tool.feedrate <= 0.0 {
            return Err(SettingsError::invalid("tool.feedrate", "must be > 0"));
        }

        if !is_non_negative(self.tool.tool_radius) {
            return Err(SettingsError::invalid("tool.tool_radius", "must be >= 0"));
        }

        if !is_non_negative(self.tool.torus_radius) {
            return Err(SettingsError::invalid("tool.torus_radius", "must be >= 0"));
        }

        if !is_non_negative(self.tool.speed) {
            return Err(SettingsError::invalid("tool.speed", "must be >= 0"));
        }

        if !self.process.safety_height.is_finite() {
            return Err(SettingsError::invalid(
                "process.safety_height",
                "must be a finite number",
            ));
        }

        if !(0.0..100.0).contains(&self.process.overlap_percent) {
            return Err(SettingsError::invalid(
                "process.overlap_percent",
                "must be in [0, 100)",
            ));
        }

        self.bounds.bounds_type()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(JobConfig::new().validate().is_ok());
    }

    #[test]
    fn test_feedrate_normalization() {
        let mut config = JobConfig::new();
        config.tool.feedrate = 10.0;
        config.feedrate_units = FeedRateUnits::InPerMin;
        assert!((config.feedrate_mm_per_min() - 254.0).abs() < 1e-9);

        config.feedrate_units = FeedRateUnits::MmPerSec;
        assert!((config.feedrate_mm_per_min() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = JobConfig::new();
        config.tool.feedrate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "tool.feedrate"
        ));

        let mut config = JobConfig::new();
        config.tool.tool_radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = JobConfig::new();
        config.process.overlap_percent = 100.0;
        assert!(config.validate().is_err());

        let mut config = JobConfig::new();
        config.process.safety_height = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_bounds_tag() {
        let mut config = JobConfig::new();
        config.bounds.bounds_type = 9;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Bounds(BoundsError::UnsupportedType(_)))
        ));
    }

    #[test]
    fn test_bounds_without_reference_become_custom() {
        let config = BoundsConfig {
            name: "Stock".to_string(),
            bounds_type: BoundsType::FixedMargin.tag(),
            low: [-1.0, -2.0, -3.0],
            high: [1.0, 2.0, 3.0],
        };
        let bounds = config.to_bounds(None).unwrap();
        assert_eq!(bounds.bounds_type(), BoundsType::Custom);
        assert_eq!(bounds.name(), "Stock");
        assert_eq!(
            bounds.absolute_limits(),
            ([-1.0, -2.0, -3.0], [1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            FileFormat::from_path(Path::new("job.toml")).unwrap(),
            FileFormat::Toml
        );
        assert_eq!(
            FileFormat::from_path(Path::new("job.json")).unwrap(),
            FileFormat::Json
        );
        assert!(matches!(
            FileFormat::from_path(Path::new("job.yaml")),
            Err(SettingsError::UnsupportedFormat(_))
        ));
    }
}
