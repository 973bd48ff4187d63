//! Axis-aligned box in the flat `minx..maxz` layout used by export code.

use millkit_core::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub minx: f64,
    pub maxx: f64,
    pub miny: f64,
    pub maxy: f64,
    pub minz: f64,
    pub maxz: f64,
}

impl BoundingBox {
    /// Build a box from the low and high corners returned by
    /// [`Bounds::absolute_limits`](crate::Bounds::absolute_limits)
    pub fn from_limits(low: [f64; 3], high: [f64; 3]) -> Self {
        Self {
            minx: low[0],
            maxx: high[0],
            miny: low[1],
            maxy: high[1],
            minz: low[2],
            maxz: high[2],
        }
    }

    /// `(minx, maxx, miny, maxy, minz, maxz)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.minx, self.maxx, self.miny, self.maxy, self.minz, self.maxz,
        )
    }

    pub fn low(&self) -> Point {
        Point::new(self.minx, self.miny, self.minz)
    }

    pub fn high(&self) -> Point {
        Point::new(self.maxx, self.maxy, self.maxz)
    }

    /// Edge lengths along x, y and z
    pub fn size(&self) -> Point {
        self.high() - self.low()
    }

    /// Whether the point lies inside the box (edges included)
    pub fn contains(&self, p: &Point) -> bool {
        (self.minx..=self.maxx).contains(&p.x)
            && (self.miny..=self.maxy).contains(&p.y)
            && (self.minz..=self.maxz).contains(&p.z)
    }
}
