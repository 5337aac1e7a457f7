//! Error handling for the wall plotter toolchain
//!
//! Provides error types for every stage of the conversion pipeline:
//! - Geometry errors (degenerate bounds, unsolvable circle intersections)
//! - Boundary errors (points outside their coordinate space)
//! - Parameter errors (invalid stage parameters)
//! - File format errors (SVG and instruction file parsing)
//! - Configuration errors (loading, saving, validation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::space::CoordinateSpace;
use std::fmt;
use thiserror::Error;

/// Axis of a planar coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Geometry error type
///
/// Raised for degenerate input geometry. None of these may be coerced
/// into a default point; they abort the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// All points share one coordinate, so no fit scale exists on that axis
    #[error("Degenerate bounds: zero extent along the {axis} axis")]
    DegenerateBounds {
        /// The axis with zero extent.
        axis: Axis,
    },

    /// The two circles are too far apart to meet
    #[error(
        "Circles do not intersect: centers {distance:.4} mm apart, radii {r0:.4} mm and {r1:.4} mm"
    )]
    NoIntersection {
        /// Distance between the circle centers.
        distance: f64,
        /// Radius of the first circle.
        r0: f64,
        /// Radius of the second circle.
        r1: f64,
    },

    /// One circle lies completely inside the other
    #[error(
        "One circle contains the other: centers {distance:.4} mm apart, radii {r0:.4} mm and {r1:.4} mm"
    )]
    ContainedCircle {
        /// Distance between the circle centers.
        distance: f64,
        /// Radius of the first circle.
        r0: f64,
        /// Radius of the second circle.
        r1: f64,
    },

    /// Both circles share a center, so no unique intersection exists
    #[error("Circle centers coincide")]
    CoincidentCenters,

    /// A radius was negative or not finite
    #[error("Invalid radius: {value}")]
    InvalidRadius {
        /// The offending radius.
        value: f64,
    },

    /// A path was constructed without any point
    #[error("Path must contain at least one point")]
    EmptyPath,

    /// A pack holds no points to operate on
    #[error("Pack contains no points")]
    EmptyPack,
}

/// Boundary error type
///
/// Raised when a coordinate falls outside the valid range of its space.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// Point lies outside the declared range of its coordinate space
    #[error("Point ({x:.4}, {y:.4}) outside {space} space (valid: {min:.4}..{max_x:.4} x {min:.4}..{max_y:.4})")]
    OutOfRange {
        /// The coordinate space that rejected the point.
        space: CoordinateSpace,
        /// The x coordinate.
        x: f64,
        /// The y coordinate.
        y: f64,
        /// Lower limit on both axes.
        min: f64,
        /// Upper x limit.
        max_x: f64,
        /// Upper y limit.
        max_y: f64,
    },

    /// Coordinate is NaN or infinite
    #[error("Non-finite coordinate ({x}, {y}) in {space} space")]
    NonFinite {
        /// The coordinate space that rejected the point.
        space: CoordinateSpace,
        /// The x coordinate.
        x: f64,
        /// The y coordinate.
        y: f64,
    },
}

/// Errors related to stage parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Two inputs that must match in shape do not.
    #[error("Shape mismatch: {0}")]
    Mismatch(String),
}

/// Errors related to file format parsing and conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileFormatError {
    /// The SVG document could not be parsed.
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    /// The file is empty or contains no usable data.
    #[error("Empty file: {0}")]
    EmptyFile(String),

    /// A line of an instruction file could not be parsed.
    #[error("Instruction file error at line {line}: {reason}")]
    InstructionParse { line: usize, reason: String },

    /// The declared path count does not match the file body.
    #[error("Instruction file declares {expected} paths but contains {found}")]
    PathCount { expected: usize, found: usize },
}

/// Errors related to configuration handling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be loaded.
    #[error("Failed to load config: {0}")]
    Load(String),

    /// The configuration file could not be saved.
    #[error("Failed to save config: {0}")]
    Save(String),

    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: String, reason: String },

    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Main error type for the wall plotter toolchain
///
/// A unified error type that can represent any error from all stages.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Boundary error
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    /// Parameter error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// File format error
    #[error(transparent)]
    FileFormat(#[from] FileFormatError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

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

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a boundary error
    pub fn is_boundary_error(&self) -> bool {
        matches!(self, Error::Boundary(_))
    }

    /// Check if this is a file format error
    pub fn is_file_format_error(&self) -> bool {
        matches!(self, Error::FileFormat(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
