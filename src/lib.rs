//! # millkit
//!
//! Toolpath data model for 3-axis milling:
//! - Boundary volumes with relative, fixed or custom margins around a live
//!   reference object
//! - Toolpaths with start position, machine time estimation and an embedded
//!   settings block for exported files
//! - Job configuration files in JSON or TOML
//!
//! ## Architecture
//!
//! millkit is organized as a workspace with multiple crates:
//!
//! 1. **millkit-core** - Geometry primitives, units, shared handles, errors
//! 2. **millkit-toolpath** - Bounds, toolpaths and the settings contract
//! 3. **millkit-settings** - Job configuration files and job settings
//! 4. **millkit** - Facade crate and the `millkit` report binary

pub mod report;

pub use millkit_core::{
    shared, thread_safe, units, Axis, BoundsError, BoundsResult, Error, FeedRateUnits,
    MeasurementSystem, Path, Point, Result, Shared, ThreadSafe, ToolPathError,
};

pub use millkit_toolpath::{
    bind_extent, fixed_reference, BoundingBox, Bounds, BoundsType, Color, ProcessSettings,
    Reference, ReferenceAxes, ReferenceExtent, Resolver, SharedSettings, ToolPath, ToolPathList,
    ToolPathSettings, ToolSettings,
};

pub use millkit_settings::{BoundsConfig, JobConfig, JobSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the report
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
