//! # Wall Plotter
//!
//! Turns SVG line art into motor instructions for a two-motor,
//! rope-suspended wall plotter, and replays them on a mock plotter to
//! check the robot will draw what was intended.
//!
//! ## Architecture
//!
//! The toolchain is organized as a workspace with multiple crates:
//!
//! 1. **wallplotter-core** - Coordinate spaces, strokes, errors, diagnostics
//! 2. **wallplotter-settings** - Configuration files and validation
//! 3. **wallplotter-camtools** - SVG import, sampling, normalization, sequencing
//! 4. **wallplotter-kinematics** - Rope kinematics and motor instructions
//! 5. **wallplotter-visualizer** - Mock plotter and previews
//! 6. **wallplotter** - Pipeline and command line binary

pub mod pipeline;

pub use pipeline::{
    convert_document, convert_file, generator_params, sample_document, simulate_file,
    write_outputs, Conversion, OutputFiles,
};

pub use wallplotter_core::{
    BoardPoint, CanvasPoint, Error, PlotPack, PlotPath, QualityReport, QualityWarning, Result,
    SourcePoint,
};
pub use wallplotter_kinematics::{InstructionPack, KinematicsModel};
pub use wallplotter_settings::{Config, InstructionPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
