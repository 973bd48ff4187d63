//! Generated toolpaths and the values derived from them.

use crate::color::Color;
use crate::settings::{SharedSettings, ToolSettings};
use millkit_core::{Path, Point, ToolPathError};
use rand::Rng;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};
use uuid::Uuid;

/// Line separator used when joining the metadata block
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Line separator used when joining the metadata block
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Tool position and elapsed time while replaying a toolpath at constant
/// feedrate
struct MachineMotion {
    position: Point,
    feedrate: f64,
    minutes: f64,
}

impl MachineMotion {
    fn new(start: Point, feedrate: f64) -> Self {
        Self {
            position: start,
            feedrate,
            minutes: 0.0,
        }
    }

    fn move_to(&mut self, target: Point) {
        let distance = self.position.distance_to(&target);
        self.minutes += distance / self.feedrate;
        trace!("Move {} -> {} ({:.4})", self.position, target, distance);
        self.position = target;
    }
}

/// A generated path together with the settings it was generated for
pub struct ToolPath {
    id: Uuid,
    path: Vec<Path>,
    name: String,
    settings: SharedSettings,
    visible: bool,
    color: Color,
}

impl ToolPath {
    /// Wrap a generated path; the display color is picked at random
    pub fn new(path: Vec<Path>, name: impl Into<String>, settings: SharedSettings) -> Self {
        Self::with_rng(path, name, settings, &mut rand::rng())
    }

    /// Wrap a generated path, drawing the display color from `rng`
    pub fn with_rng<R: Rng + ?Sized>(
        path: Vec<Path>,
        name: impl Into<String>,
        settings: SharedSettings,
        rng: &mut R,
    ) -> Self {
        Self::with_color(path, name, settings, Color::random(rng))
    }

    /// Wrap a generated path with a fixed display color
    pub fn with_color(
        path: Vec<Path>,
        name: impl Into<String>,
        settings: SharedSettings,
        color: Color,
    ) -> Self {
        let toolpath = Self {
            id: Uuid::new_v4(),
            path,
            name: name.into(),
            settings,
            visible: true,
            color,
        };
        debug!(
            "Created toolpath '{}' with {} sub-paths ({} points)",
            toolpath.name,
            toolpath.path.len(),
            toolpath.point_count()
        );
        toolpath
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The generated sub-paths in machining order
    pub fn path(&self) -> &[Path] {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Use the given color, or a fresh random one
    pub fn set_color(&mut self, color: Option<Color>) {
        self.set_color_with_rng(color, &mut rand::rng());
    }

    /// Use the given color, or one drawn from `rng`
    pub fn set_color_with_rng<R: Rng + ?Sized>(&mut self, color: Option<Color>, rng: &mut R) {
        self.color = color.unwrap_or_else(|| Color::random(rng));
    }

    /// Where the tool waits before the job starts: above the first point of
    /// the first non-empty sub-path, at safety height
    pub fn start_position(&self) -> Point {
        let safety_height = self.safety_height();
        self.path
            .iter()
            .find_map(|path| path.first())
            .map_or(Point::new(0.0, 0.0, safety_height), |p| p.with_z(safety_height))
    }

    /// Where the tool parks after the job: above the last point of the last
    /// non-empty sub-path, at safety height
    pub fn end_position(&self) -> Option<Point> {
        let safety_height = self.safety_height();
        self.path
            .iter()
            .rev()
            .find_map(|path| path.last())
            .map(|p| p.with_z(safety_height))
    }

    /// `(minx, maxx, miny, maxy, minz, maxz)` of the job's working volume
    pub fn bounding_box(&self) -> (f64, f64, f64, f64, f64, f64) {
        self.settings.borrow().bounds().as_tuple()
    }

    pub fn tool_settings(&self) -> ToolSettings {
        self.settings.borrow().tool_settings().clone()
    }

    pub fn toolpath_settings(&self) -> SharedSettings {
        Rc::clone(&self.settings)
    }

    /// The settings framed by the start and end markers, one per line
    pub fn meta_data(&self) -> Result<String, ToolPathError> {
        let settings = self.settings.borrow();
        let meta = settings.settings_string()?;
        Ok([settings.meta_marker_start(), meta.as_str(), settings.meta_marker_end()]
            .join(LINE_SEPARATOR))
    }

    /// Estimate the machining time in minutes (the feedrate is mm/min)
    ///
    /// The tool starts at `start_position` (origin if omitted), rises to
    /// safety height, then for every non-empty sub-path travels above its
    /// first point, follows all of its points, and retracts straight up.
    /// Every move runs at the tool feedrate.
    pub fn machine_time(&self, start_position: Option<Point>) -> Result<f64, ToolPathError> {
        let start = start_position.unwrap_or_default();
        let (feedrate, safety_height) = {
            let settings = self.settings.borrow();
            (
                settings.tool_settings().feedrate,
                settings.process_settings().safety_height,
            )
        };
        if !feedrate.is_finite() || feedrate <= 0.0 {
            return Err(ToolPathError::InvalidFeedrate { feedrate });
        }

        let mut motion = MachineMotion::new(start, feedrate);
        motion.move_to(start.with_z(safety_height));
        for path in &self.path {
            let (Some(first), Some(last)) = (path.first(), path.last()) else {
                continue;
            };
            motion.move_to(first.with_z(safety_height));
            for point in &path.points {
                motion.move_to(*point);
            }
            motion.move_to(last.with_z(safety_height));
        }

        debug!(
            "Estimated machine time for '{}': {:.3} min",
            self.name, motion.minutes
        );
        Ok(motion.minutes)
    }

    /// Length of all cutting moves, without the travel between sub-paths
    pub fn total_length(&self) -> f64 {
        self.path.iter().map(Path::length).sum()
    }

    pub fn point_count(&self) -> usize {
        self.path.iter().map(Path::len).sum()
    }

    fn safety_height(&self) -> f64 {
        self.settings.borrow().process_settings().safety_height
    }
}

impl fmt::Debug for ToolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolPath")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("sub_paths", &self.path.len())
            .field("visible", &self.visible)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}
