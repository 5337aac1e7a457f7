//! Configuration and settings management for the wall plotter
//!
//! Provides configuration file handling, defaults and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Board, anchors and canvas (the physical layout)
//! - Calibration (the hand-measured pen reference position)
//! - Motor constants (rope per degree, rope speed, resolvable move)
//! - Sampling, instruction and simulation parameters

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use wallplotter_core::{
    CanvasGeometry, ConfigError, DrawableSide, InstructionPolicy, Offset, Result, Size, Workspace,
};

/// Name of the configuration file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "wallplotter.toml";

/// Physical mounting panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Panel width in mm
    pub width: f64,
    /// Panel height in mm
    pub height: f64,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 1250.0,
        }
    }
}

/// Rope anchor positions on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSettings {
    /// Left anchor, board mm
    pub left: Offset,
    /// Right anchor, board mm
    pub right: Offset,
    /// Side of the anchor baseline the paper is on
    pub drawable_side: DrawableSide,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self {
            left: Offset::new(45.0, 33.0),
            right: Offset::new(865.0, 33.0),
            drawable_side: DrawableSide::Below,
        }
    }
}

/// The paper taped to the board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Paper width in mm
    pub width: f64,
    /// Paper height in mm
    pub height: f64,
    /// Top-left paper corner on the board
    pub offset: Offset,
    /// Free margin on every side in mm
    pub padding: f64,
    /// Accepted slack outside the paper in mm
    pub tolerance: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            offset: Offset::new(345.0, 335.0),
            padding: 10.0,
            tolerance: 1.0,
        }
    }
}

/// Hand-measured start position of the robot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Measured reference point on the robot body, board mm
    pub measure_point: Offset,
    /// Pen position relative to the measured point
    pub pen_offset: Offset,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            measure_point: Offset::new(493.0, 473.0),
            pen_offset: Offset::new(0.0, 22.0),
        }
    }
}

impl CalibrationSettings {
    /// Pen position on the board at the start of a run
    pub fn pen_position(&self) -> Offset {
        Offset::new(
            self.measure_point.x + self.pen_offset.x,
            self.measure_point.y + self.pen_offset.y,
        )
    }
}

/// Motor and rope constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorSettings {
    /// Rope length wound per motor degree
    pub mm_per_degree: f64,
    /// Rope length moved in one second at full speed
    pub rope_mm_per_second: f64,
    /// Smallest rope change the motors resolve reliably
    pub min_move_mm: f64,
    /// Distance at which the device treats a target as reached
    pub point_reached_tolerance_mm: f64,
}

impl Default for MotorSettings {
    fn default() -> Self {
        Self {
            mm_per_degree: 3760.0 / 137816.0,
            rope_mm_per_second: 1000.0,
            min_move_mm: 0.5,
            point_reached_tolerance_mm: 1.0,
        }
    }
}

/// Curve flattening parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Spacing of sampled points on the canvas in mm
    pub distance_mm: f64,
    /// Relative tolerance for merging collinear points
    pub collinear_tolerance: f64,
    /// Moves shorter than this are reported
    pub quality_threshold_mm: f64,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            distance_mm: 1.0,
            collinear_tolerance: 1e-3,
            quality_threshold_mm: 0.5,
        }
    }
}

/// Instruction generation and file output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionSettings {
    /// Decimal places for degrees in the instruction file; durations are written in full
    pub precision: usize,
    pub policy: InstructionPolicy,
}

impl Default for InstructionSettings {
    fn default() -> Self {
        Self {
            precision: 4,
            policy: InstructionPolicy::Absolute,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Reconstructed points further than this from their target are drift
    pub drift_tolerance_mm: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            drift_tolerance_mm: 1.0,
        }
    }
}

/// Complete plotter configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub board: BoardSettings,
    pub anchors: AnchorSettings,
    pub canvas: CanvasSettings,
    pub calibration: CalibrationSettings,
    pub motor: MotorSettings,
    pub sampling: SamplingSettings,
    pub instructions: InstructionSettings,
    pub simulation: SimulationSettings,
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn require_positive(key: &str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, format!("must be > 0, got {value}")))
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Load(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ConfigError::Load(format!("Invalid JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| ConfigError::Load(format!("Invalid TOML config: {}", e)))?,
            _ => return Err(unsupported(path).into()),
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Save(format!("Failed to serialize config: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Save(format!("Failed to serialize config: {}", e)))?,
            _ => return Err(unsupported(path).into()),
        };

        std::fs::write(path, content).map_err(|e| {
            ConfigError::Save(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// Checks every scalar section, then builds the workspace so that
    /// anchors and paper are verified against the board.
    pub fn validate(&self) -> Result<()> {
        require_positive("board.width", self.board.width)?;
        require_positive("board.height", self.board.height)?;
        require_positive("canvas.width", self.canvas.width)?;
        require_positive("canvas.height", self.canvas.height)?;

        if self.canvas.padding < 0.0 {
            return Err(invalid("canvas.padding", "must not be negative").into());
        }
        if 2.0 * self.canvas.padding >= self.canvas.width.min(self.canvas.height) {
            return Err(invalid("canvas.padding", "leaves no drawable area").into());
        }
        if self.canvas.tolerance < 0.0 {
            return Err(invalid("canvas.tolerance", "must not be negative").into());
        }

        require_positive("motor.mm_per_degree", self.motor.mm_per_degree)?;
        require_positive("motor.rope_mm_per_second", self.motor.rope_mm_per_second)?;
        if self.motor.min_move_mm < 0.0 {
            return Err(invalid("motor.min_move_mm", "must not be negative").into());
        }
        require_positive(
            "motor.point_reached_tolerance_mm",
            self.motor.point_reached_tolerance_mm,
        )?;

        require_positive("sampling.distance_mm", self.sampling.distance_mm)?;
        require_positive(
            "sampling.collinear_tolerance",
            self.sampling.collinear_tolerance,
        )?;
        if self.sampling.quality_threshold_mm < 0.0 {
            return Err(invalid("sampling.quality_threshold_mm", "must not be negative").into());
        }

        if self.instructions.precision > 12 {
            return Err(invalid("instructions.precision", "must be at most 12 decimals").into());
        }

        require_positive(
            "simulation.drift_tolerance_mm",
            self.simulation.drift_tolerance_mm,
        )?;

        let workspace = self.workspace()?;
        // The pen must start on the board for the forward mapping to hold.
        let pen = self.calibration.pen_position();
        wallplotter_core::BoardPoint::new(pen.x, pen.y, &workspace.board())?;

        Ok(())
    }

    /// Canvas geometry described by the `canvas` section
    pub fn canvas_geometry(&self) -> CanvasGeometry {
        CanvasGeometry {
            size: Size::new(self.canvas.width, self.canvas.height),
            offset: self.canvas.offset,
            padding: self.canvas.padding,
            tolerance: self.canvas.tolerance,
        }
    }

    /// Build the validated physical workspace
    pub fn workspace(&self) -> Result<Workspace> {
        Workspace::new(
            Size::new(self.board.width, self.board.height),
            self.canvas_geometry(),
            self.anchors.left,
            self.anchors.right,
            self.anchors.drawable_side,
        )
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn unsupported(path: &Path) -> ConfigError {
    ConfigError::UnsupportedFormat(format!(
        "{} (config file must be .json or .toml)",
        path.display()
    ))
}

/// Default config location in the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wallplotter").join(CONFIG_FILE_NAME))
}
