//! Per-job settings consumed by toolpaths.
//!
//! The [`ToolPathSettings`] trait is the contract between a toolpath and
//! whatever owns the job configuration. Tool and process parameters are
//! plain serde structs so that implementors can persist them as they like.

use crate::BoundingBox;
use millkit_core::types::Shared;
use millkit_core::ToolPathError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// First line of the settings block embedded in exported files
pub const META_MARKER_START: &str = "MILLKIT_TOOLPATH_SETTINGS: START";

/// Last line of the settings block embedded in exported files
pub const META_MARKER_END: &str = "MILLKIT_TOOLPATH_SETTINGS: END";

/// Cutter geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ToolShape {
    /// Ball nose cutter
    Spherical,
    /// Flat end mill
    Cylindrical,
    /// Bull nose cutter with a corner radius
    Toroidal,
}

impl fmt::Display for ToolShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spherical => write!(f, "Spherical Cutter"),
            Self::Cylindrical => write!(f, "Cylindrical Cutter"),
            Self::Toroidal => write!(f, "Toroidal Cutter"),
        }
    }
}

/// Direction of the parallel passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDirection {
    X,
    Y,
    XY,
}

/// Relation between cutter rotation and feed direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MillingStyle {
    Ignore,
    Conventional,
    Climb,
}

/// Cutter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Tool name shown in the tool list
    pub name: String,
    /// Cutter geometry
    pub shape: ToolShape,
    /// Cutter radius (mm)
    pub tool_radius: f64,
    /// Corner radius for toroidal cutters (mm)
    pub torus_radius: f64,
    /// Spindle speed (RPM)
    pub speed: f64,
    /// Feed rate (mm/min)
    pub feedrate: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            name: "Default tool".to_string(),
            shape: ToolShape::Spherical,
            tool_radius: 1.0,
            torus_radius: 0.25,
            speed: 1000.0,
            feedrate: 200.0,
        }
    }
}

/// Machining process parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSettings {
    /// Process name shown in the process list
    pub name: String,
    pub path_direction: PathDirection,
    /// Height for collision-free horizontal travel (mm)
    pub safety_height: f64,
    /// Maximum depth per layer (mm)
    pub step_down: f64,
    /// Material left for a finishing pass (mm)
    pub material_allowance: f64,
    /// Overlap between neighbouring passes, percent of the tool diameter
    pub overlap_percent: f64,
    pub milling_style: MillingStyle,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            name: "Default process".to_string(),
            path_direction: PathDirection::X,
            safety_height: 25.0,
            step_down: 1.0,
            material_allowance: 0.0,
            overlap_percent: 0.0,
            milling_style: MillingStyle::Ignore,
        }
    }
}

/// Settings a toolpath queries for its derived values
pub trait ToolPathSettings {
    /// Process parameters (safety height, step down, ...)
    fn process_settings(&self) -> &ProcessSettings;

    /// Cutter parameters (feedrate, radius, ...)
    fn tool_settings(&self) -> &ToolSettings;

    /// Current absolute working volume of the job
    fn bounds(&self) -> BoundingBox;

    /// Text form of the settings, embedded between the meta markers
    fn settings_string(&self) -> Result<String, ToolPathError>;

    fn meta_marker_start(&self) -> &str {
        META_MARKER_START
    }

    fn meta_marker_end(&self) -> &str {
        META_MARKER_END
    }
}

/// Settings handle shared between a job and its toolpaths
pub type SharedSettings = Shared<dyn ToolPathSettings>;
