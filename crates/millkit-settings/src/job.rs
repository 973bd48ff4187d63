//! Job settings handed to toolpaths.

use crate::config::{BoundsConfig, JobConfig};
use crate::error::SettingsResult;
use millkit_core::ToolPathError;
use millkit_toolpath::{
    BoundingBox, Bounds, BoundsType, ProcessSettings, ReferenceAxes, ToolPathSettings,
    ToolSettings,
};
use std::path::Path;
use tracing::debug;

/// The settings of one job, with live bounds
///
/// The tool feed rate is kept in mm/min regardless of the units the job file
/// was written in. The bounds follow their reference object, so
/// [`ToolPathSettings::bounds`] always reports the current working volume.
#[derive(Debug)]
pub struct JobSettings {
    config: JobConfig,
    tool: ToolSettings,
    bounds: Bounds,
    /// Type the bounds ended up with at construction
    built_type: BoundsType,
}

impl JobSettings {
    /// Build job settings from a validated configuration
    ///
    /// `references` are the lower and upper extent of the reference object;
    /// without them the bounds are custom.
    pub fn from_config(
        config: JobConfig,
        references: Option<(ReferenceAxes, ReferenceAxes)>,
    ) -> SettingsResult<Self> {
        config.validate()?;
        let bounds = config.bounds.to_bounds(references)?;
        let built_type = bounds.bounds_type();
        let tool = ToolSettings {
            feedrate: config.feedrate_mm_per_min(),
            ..config.tool.clone()
        };
        debug!(
            "Job settings for '{}' with {} ({} mm/min)",
            config.process.name, tool.name, tool.feedrate
        );
        Ok(Self {
            config,
            tool,
            bounds,
            built_type,
        })
    }

    /// Load a job file and build its settings
    pub fn load(
        path: &Path,
        references: Option<(ReferenceAxes, ReferenceAxes)>,
    ) -> SettingsResult<Self> {
        Self::from_config(JobConfig::load_from_file(path)?, references)
    }

    /// The configuration as it would be saved now, including any bounds
    /// changes made since loading
    ///
    /// A `Custom` type forced by missing references is not written back;
    /// the configured type is kept unless the bounds type was changed
    /// explicitly.
    pub fn config(&self) -> JobConfig {
        let mut bounds = BoundsConfig::from_bounds(&self.bounds);
        if self.bounds.bounds_type() == self.built_type {
            bounds.bounds_type = self.config.bounds.bounds_type;
        }
        JobConfig {
            bounds,
            ..self.config.clone()
        }
    }

    /// Save the current configuration
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.config().save_to_file(path)
    }

    pub fn job_bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn job_bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }

    pub fn process_mut(&mut self) -> &mut ProcessSettings {
        &mut self.config.process
    }
}

impl ToolPathSettings for JobSettings {
    fn process_settings(&self) -> &ProcessSettings {
        &self.config.process
    }

    fn tool_settings(&self) -> &ToolSettings {
        &self.tool
    }

    fn bounds(&self) -> BoundingBox {
        let (low, high) = self.bounds.absolute_limits();
        BoundingBox::from_limits(low, high)
    }

    fn settings_string(&self) -> Result<String, ToolPathError> {
        self.config()
            .to_toml_string()
            .map_err(|e| ToolPathError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use millkit_core::units::FeedRateUnits;
    use millkit_toolpath::fixed_reference;

    #[test]
    fn test_feedrate_is_normalized() {
        let mut config = JobConfig::new();
        config.tool.feedrate = 2.0;
        config.feedrate_units = FeedRateUnits::MmPerSec;
        let job = JobSettings::from_config(config, None).unwrap();
        assert_eq!(job.tool_settings().feedrate, 120.0);
        assert_eq!(job.config().tool.feedrate, 2.0);
    }

    #[test]
    fn test_bounds_follow_references() {
        let mut config = JobConfig::new();
        config.bounds.bounds_type = BoundsType::FixedMargin.tag();
        config.bounds.low = [1.0, 1.0, 0.0];
        config.bounds.high = [1.0, 1.0, 2.0];
        let job = JobSettings::from_config(
            config,
            Some((fixed_reference([0.0; 3]), fixed_reference([10.0, 20.0, 5.0]))),
        )
        .unwrap();
        assert_eq!(
            job.bounds().as_tuple(),
            (-1.0, 11.0, -1.0, 21.0, 0.0, 7.0)
        );
    }

    #[test]
    fn test_config_reflects_bounds_changes() {
        let mut job = JobSettings::from_config(JobConfig::new(), None).unwrap();
        job.job_bounds_mut()
            .set_bounds(Some(&[1.0, 2.0, 3.0]), None)
            .unwrap();
        let config = job.config();
        assert_eq!(config.bounds.low, [1.0, 2.0, 3.0]);
        assert_eq!(config.bounds.bounds_type, BoundsType::RelativeMargin.tag());
    }

    #[test]
    fn test_forced_custom_is_not_persisted() {
        let mut config = JobConfig::new();
        config.bounds.bounds_type = BoundsType::FixedMargin.tag();
        let job = JobSettings::from_config(config, None).unwrap();
        assert_eq!(job.job_bounds().bounds_type(), BoundsType::Custom);
        assert_eq!(job.config().bounds.bounds_type, BoundsType::FixedMargin.tag());
    }

    #[test]
    fn test_explicit_type_change_is_persisted() {
        let mut job = JobSettings::from_config(
            JobConfig::new(),
            Some((fixed_reference([0.0; 3]), fixed_reference([1.0; 3]))),
        )
        .unwrap();
        job.job_bounds_mut().set_type(BoundsType::Custom);
        assert_eq!(job.config().bounds.bounds_type, BoundsType::Custom.tag());

        let mut forced = JobSettings::from_config(JobConfig::new(), None).unwrap();
        forced.job_bounds_mut().set_type(BoundsType::FixedMargin);
        assert_eq!(
            forced.config().bounds.bounds_type,
            BoundsType::FixedMargin.tag()
        );
    }
}
