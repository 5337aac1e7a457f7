//! # Wall Plotter Visualizer
//!
//! Replays motor instructions on a mock plotter and renders previews of
//! the board.

pub mod preview;
pub mod simulator;

pub use preview::{Layer, LayerKind, PreviewScene};
pub use simulator::{MockPlotter, SimulationParams, SimulationReport};
