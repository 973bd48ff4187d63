//! # millkit Core
//!
//! Core types, traits, and utilities for millkit.
//! Provides the geometry primitives shared by the toolpath and settings
//! crates, unit helpers, shared-handle aliases, and the error types.

pub mod data;
pub mod error;
pub mod types;
pub mod units;

pub use data::{Axis, Path, Point};

pub use error::{BoundsError, BoundsResult, Error, Result, ToolPathError};

pub use types::{shared, thread_safe, Shared, ThreadSafe};

pub use units::{FeedRateUnits, MeasurementSystem};
