//! millkit Settings Crate
//!
//! Job configuration files and the job settings toolpaths are generated for.

pub mod config;
pub mod error;
pub mod job;

pub use config::{BoundsConfig, FeedRateUnits, JobConfig, MeasurementSystem};
pub use error::{SettingsError, SettingsResult};
pub use job::JobSettings;
