//! Ordered collection of toolpaths in display and export order.

use crate::settings::SharedSettings;
use crate::toolpath::ToolPath;
use millkit_core::{Path, Point, ToolPathError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::Index;
use tracing::debug;
use uuid::Uuid;

/// Toolpaths in insertion order
///
/// Display colors of toolpaths added through [`add_toolpath`] come from the
/// list's own generator, so a list built with [`with_seed`] assigns the same
/// colors on every run.
///
/// [`add_toolpath`]: ToolPathList::add_toolpath
/// [`with_seed`]: ToolPathList::with_seed
#[derive(Debug)]
pub struct ToolPathList {
    toolpaths: Vec<ToolPath>,
    rng: StdRng,
}

impl ToolPathList {
    /// Create an empty list with an entropy-seeded color generator
    pub fn new() -> Self {
        Self {
            toolpaths: Vec::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create an empty list with a deterministic color generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            toolpaths: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build a toolpath from its parts and append it
    pub fn add_toolpath(
        &mut self,
        path: Vec<Path>,
        name: impl Into<String>,
        settings: SharedSettings,
    ) -> &mut ToolPath {
        let toolpath = ToolPath::with_rng(path, name, settings, &mut self.rng);
        self.push(toolpath)
    }

    /// Append an already built toolpath
    pub fn push(&mut self, toolpath: ToolPath) -> &mut ToolPath {
        debug!(
            "Adding toolpath '{}' at position {}",
            toolpath.name(),
            self.toolpaths.len()
        );
        self.toolpaths.push(toolpath);
        let last = self.toolpaths.len() - 1;
        &mut self.toolpaths[last]
    }

    /// Remove the toolpath with the given id
    pub fn remove(&mut self, id: Uuid) -> Option<ToolPath> {
        let index = self.toolpaths.iter().position(|t| t.id() == id)?;
        let removed = self.toolpaths.remove(index);
        debug!("Removed toolpath '{}'", removed.name());
        Some(removed)
    }

    pub fn get(&self, index: usize) -> Option<&ToolPath> {
        self.toolpaths.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ToolPath> {
        self.toolpaths.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.toolpaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolpaths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolPath> {
        self.toolpaths.iter()
    }

    /// Toolpaths currently shown
    pub fn visible(&self) -> impl Iterator<Item = &ToolPath> {
        self.toolpaths.iter().filter(|t| t.is_visible())
    }

    /// Machine time of all toolpaths run back to back
    ///
    /// The first toolpath starts at `start_position` (origin if omitted);
    /// each following one starts where the previous one parked.
    pub fn total_machine_time(&self, start_position: Option<Point>) -> Result<f64, ToolPathError> {
        let mut position = start_position.unwrap_or_default();
        let mut total = 0.0;
        for toolpath in &self.toolpaths {
            total += toolpath.machine_time(Some(position))?;
            if let Some(end) = toolpath.end_position() {
                position = end;
            } else {
                position = position.with_z(toolpath.start_position().z);
            }
        }
        Ok(total)
    }
}

impl Default for ToolPathList {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for ToolPathList {
    type Output = ToolPath;

    fn index(&self, index: usize) -> &ToolPath {
        &self.toolpaths[index]
    }
}

impl<'a> IntoIterator for &'a ToolPathList {
    type Item = &'a ToolPath;
    type IntoIter = std::slice::Iter<'a, ToolPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.toolpaths.iter()
    }
}
