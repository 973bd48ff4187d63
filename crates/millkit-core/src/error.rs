//! Error handling for millkit
//!
//! Provides the error types for the data model layers:
//! - Bounds errors (margin vectors, bounds types, degenerate references)
//! - Toolpath errors (machine time estimation, metadata serialization)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::Axis;
use thiserror::Error;

/// Bounds error type
///
/// Represents failures while building, adjusting, or resolving a
/// boundary volume.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    /// A vector had the wrong number of entries or a type tag was unknown
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bounds type outside the known variants reached a computation
    #[error("Unsupported bounds type: {0}")]
    UnsupportedType(String),

    /// A relative margin would have to be divided by a zero-width reference
    #[error("Degenerate reference on {axis} axis: lower {low} equals upper {high}")]
    DegenerateReference {
        /// The axis with zero reference width.
        axis: Axis,
        /// The resolved lower reference value.
        low: f64,
        /// The resolved upper reference value.
        high: f64,
    },
}

impl BoundsError {
    /// Create an invalid argument error from a message
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        BoundsError::InvalidArgument(msg.into())
    }
}

/// Toolpath error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolPathError {
    /// Feedrate cannot be used to convert distance into time
    #[error("Invalid feedrate: {feedrate}")]
    InvalidFeedrate {
        /// The offending feedrate.
        feedrate: f64,
    },

    /// The settings object could not be rendered as text
    #[error("Failed to serialize toolpath settings: {0}")]
    Serialization(String),
}

/// Main error type for millkit
///
/// A unified error type that can represent any error from the data model.
#[derive(Error, Debug)]
pub enum Error {
    /// Bounds error
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    /// Toolpath error
    #[error(transparent)]
    ToolPath(#[from] ToolPathError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a bounds error
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Error::Bounds(_))
    }

    /// Check if this is a toolpath error
    pub fn is_toolpath_error(&self) -> bool {
        matches!(self, Error::ToolPath(_))
    }

    /// Check if this error comes from a zero-width reference
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::Bounds(BoundsError::DegenerateReference { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for bounds operations.
pub type BoundsResult<T> = std::result::Result<T, BoundsError>;
