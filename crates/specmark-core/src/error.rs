//! Error handling for Specmark
//!
//! Provides error types for each boundary of the editor:
//! - Geometry errors (degenerate boxes, inverted ranges)
//! - Validation errors (record limits at the persistence boundary)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a rectangle or its derived time/frequency range breaks the
/// bounding-box invariants. Interactive paths recover from these locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Width or height is not strictly positive
    #[error("Degenerate box: width {width}, height {height}")]
    DegenerateBox {
        /// The offending width.
        width: f64,
        /// The offending height.
        height: f64,
    },

    /// End time does not come after start time
    #[error("Invalid time range: start {start}s, end {end}s")]
    InvalidTimeRange {
        /// Start of the range in seconds.
        start: f64,
        /// End of the range in seconds.
        end: f64,
    },

    /// Maximum frequency is below minimum frequency
    #[error("Invalid frequency range: min {min}Hz, max {max}Hz")]
    InvalidFrequencyRange {
        /// Lower bound in Hz.
        min: f64,
        /// Upper bound in Hz.
        max: f64,
    },

    /// A numeric field is NaN or infinite
    #[error("Non-finite value in field '{field}'")]
    NonFinite {
        /// Name of the field.
        field: &'static str,
    },

    /// A box index does not exist in the collection
    #[error("Box index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Collection length.
        len: usize,
    },
}

/// Validation error type
///
/// Record-level limits enforced when boxes cross the persistence boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Coordinate '{field}' must be non-negative, got {value}")]
    NegativeCoordinate { field: &'static str, value: f64 },

    #[error("Coordinate '{field}' = {value} exceeds limit {limit}")]
    CoordinateTooLarge {
        field: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("Start time must be non-negative, got {start}")]
    NegativeStartTime { start: f64 },

    #[error("End time {end}s exceeds maximum duration of {limit}s")]
    DurationExceeded { end: f64, limit: f64 },

    #[error("Minimum frequency must be non-negative, got {min}")]
    NegativeFrequency { min: f64 },

    #[error("Maximum frequency {max}Hz exceeds limit {limit}Hz")]
    FrequencyAboveLimit { max: f64, limit: f64 },

    #[error("Label cannot be empty")]
    EmptyLabel,
}

/// Main error type for Specmark
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A loaded record breaks the bounding-box invariants
    #[error("Box {index}: {source}")]
    InvalidRecord {
        /// Index of the offending record.
        index: usize,
        /// The underlying geometry failure.
        source: GeometryError,
    },

    /// Record validation error
    #[error("Box {index}: {source}")]
    Validation {
        /// Index of the offending record.
        index: usize,
        /// The underlying validation failure.
        source: ValidationError,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_) | Error::InvalidRecord { .. })
    }

    /// Check if this is a record validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
