//! # Wall Plotter Core
//!
//! Core types shared by every stage of the wall plotter toolchain.
//! Provides typed coordinate spaces, strokes and drawing jobs,
//! the physical workspace layout, error types and quality diagnostics.

pub mod diagnostics;
pub mod error;
pub mod path;
pub mod policy;
pub mod space;

pub use diagnostics::{QualityReport, QualityWarning};

pub use error::{
    Axis, BoundaryError, ConfigError, Error, FileFormatError, GeometryError, ParameterError,
    Result,
};

pub use path::{Bounds, PlotPack, PlotPath};

pub use policy::InstructionPolicy;

pub use space::{
    BoardPoint, CanvasGeometry, CanvasPoint, CoordinateSpace, DrawableSide, Offset, PlanarPoint,
    Size, SourcePoint, Workspace,
};
