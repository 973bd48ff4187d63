//! Text report for a job and its generated path geometry.

use anyhow::{Context, Result};
use millkit_core::types::shared;
use millkit_core::units::{format_length, format_machine_time, get_unit_label};
use millkit_core::{MeasurementSystem, Path, Point};
use millkit_settings::JobSettings;
use millkit_toolpath::{bind_extent, ReferenceExtent, ToolPath, ToolPathList, ToolPathSettings};
use std::fmt::Write;
use tracing::debug;

/// Extent of the loaded geometry, used as the reference object of the job
/// bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathExtent {
    pub low: [f64; 3],
    pub high: [f64; 3],
}

impl PathExtent {
    /// Smallest box around every point, `None` if there are no points
    pub fn from_paths(paths: &[Path]) -> Option<Self> {
        let mut points = paths.iter().flat_map(|path| path.points.iter());
        let first = points.next()?.to_array();
        let mut extent = Self {
            low: first,
            high: first,
        };
        for point in points {
            for (i, value) in point.to_array().into_iter().enumerate() {
                extent.low[i] = extent.low[i].min(value);
                extent.high[i] = extent.high[i].max(value);
            }
        }
        Some(extent)
    }
}

impl ReferenceExtent for PathExtent {
    fn extent_low(&self) -> [f64; 3] {
        self.low
    }

    fn extent_high(&self) -> [f64; 3] {
        self.high
    }
}

/// Parse path geometry: a JSON array of sub-paths, each an array of
/// `[x, y, z]` points
pub fn parse_paths(json: &str) -> Result<Vec<Path>> {
    let raw: Vec<Vec<[f64; 3]>> = serde_json::from_str(json)
        .context("Path geometry must be a JSON array of sub-paths of [x, y, z] points")?;
    Ok(raw
        .into_iter()
        .map(|sub_path| sub_path.into_iter().map(Point::from).collect())
        .collect())
}

/// Read path geometry from a file
pub fn load_paths(path: &std::path::Path) -> Result<Vec<Path>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read path geometry from {}", path.display()))?;
    parse_paths(&content)
}

/// Load a job file and wrap the geometry in a toolpath list
///
/// The job bounds use the extent of the geometry as reference object; with
/// no points at all they fall back to custom bounds.
pub fn build_toolpaths(job_file: &std::path::Path, paths: Vec<Path>) -> Result<ToolPathList> {
    let references = PathExtent::from_paths(&paths).map(|extent| bind_extent(&shared(extent)));
    let job = JobSettings::load(job_file, references)
        .with_context(|| format!("Failed to load job from {}", job_file.display()))?;
    let name = job.process_settings().name.clone();
    debug!("Building toolpath '{}' from {} sub-paths", name, paths.len());

    let mut list = ToolPathList::new();
    list.add_toolpath(paths, name, shared(job));
    Ok(list)
}

fn format_point(point: &Point, system: MeasurementSystem) -> String {
    format!(
        "X:{} Y:{} Z:{}",
        format_length(point.x, system),
        format_length(point.y, system),
        format_length(point.z, system)
    )
}

fn render_toolpath(out: &mut String, toolpath: &ToolPath, system: MeasurementSystem) -> Result<()> {
    let unit = get_unit_label(system);
    let (minx, maxx, miny, maxy, minz, maxz) = toolpath.bounding_box();

    writeln!(out, "Toolpath: {}", toolpath.name())?;
    writeln!(
        out,
        "  Start position ({}): {}",
        unit,
        format_point(&toolpath.start_position(), system)
    )?;
    writeln!(
        out,
        "  Bounding box ({}): X {}..{} Y {}..{} Z {}..{}",
        unit,
        format_length(minx, system),
        format_length(maxx, system),
        format_length(miny, system),
        format_length(maxy, system),
        format_length(minz, system),
        format_length(maxz, system)
    )?;
    writeln!(
        out,
        "  Path length: {} {}",
        format_length(toolpath.total_length(), system),
        unit
    )?;
    writeln!(
        out,
        "  Machine time: {}",
        format_machine_time(toolpath.machine_time(None)?)
    )?;
    writeln!(out, "{}", toolpath.meta_data()?)?;
    Ok(())
}

/// Render every toolpath of the list followed by the total machine time
pub fn render_report(list: &ToolPathList, system: MeasurementSystem) -> Result<String> {
    let mut out = String::new();
    for toolpath in list {
        render_toolpath(&mut out, toolpath, system)?;
    }
    writeln!(
        out,
        "Total machine time: {}",
        format_machine_time(list.total_machine_time(None)?)
    )?;
    Ok(out)
}
