//! Wall Plotter Settings Crate
//!
//! Handles the plotter configuration: physical layout, calibration,
//! motor constants and per-stage parameters, persisted as TOML or JSON.

pub mod config;

pub use config::{
    default_config_path, AnchorSettings, BoardSettings, CalibrationSettings, CanvasSettings,
    Config, InstructionSettings, MotorSettings, SamplingSettings, SimulationSettings,
};

pub use wallplotter_core::InstructionPolicy;
