//! # millkit Toolpath
//!
//! The toolpath and bounds data model shared by the generators, the UI and
//! the exporters.
//!
//! ## Contents
//!
//! - **Bounds**: boundary volumes with relative, fixed or custom margins
//!   around a live reference object
//! - **ToolPath**: generated sub-paths plus their settings, with start
//!   position, machine time estimation and metadata export
//! - **ToolPathList**: toolpaths in display/export order
//! - **ToolPathSettings**: the settings contract a job implements
//!
//! ## Example
//!
//! ```
//! use millkit_toolpath::{Bounds, BoundsType, fixed_reference};
//!
//! let bounds = Bounds::with_reference(
//!     BoundsType::FixedMargin,
//!     [5.0, 5.0, 0.0],
//!     [5.0, 5.0, 2.0],
//!     fixed_reference([0.0, 0.0, 0.0]),
//!     fixed_reference([100.0, 50.0, 10.0]),
//! );
//! let (low, high) = bounds.absolute_limits();
//! assert_eq!(low, [-5.0, -5.0, 0.0]);
//! assert_eq!(high, [105.0, 55.0, 12.0]);
//! ```

pub mod bounding_box;
pub mod bounds;
pub mod color;
pub mod settings;
pub mod toolpath;
pub mod toolpath_list;

pub use bounding_box::BoundingBox;
pub use bounds::{
    bind_extent, effective_bounds_type, fixed_reference, Binding, Bounds, BoundsType, Constant,
    Reference, ReferenceAxes, ReferenceExtent, Resolver, SyncBinding, DEFAULT_BOUNDS_NAME,
};
pub use color::Color;
pub use settings::{
    MillingStyle, PathDirection, ProcessSettings, SharedSettings, ToolPathSettings, ToolSettings,
    ToolShape, META_MARKER_END, META_MARKER_START,
};
pub use toolpath::{ToolPath, LINE_SEPARATOR};
pub use toolpath_list::ToolPathList;
