//! Run calibration
//!
//! The motors know nothing about absolute rope length. At the start of a
//! run the robot hangs at a hand-measured position; the rope lengths and
//! motor degrees for that position become the zero reference every
//! absolute instruction is expressed against.

use crate::model::{KinematicsModel, MotorDegrees, RopeLengths};
use tracing::info;
use wallplotter_core::{BoardPoint, Offset, Result};

/// Zero reference established once per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pen_position: BoardPoint,
    initial_lengths: RopeLengths,
    initial_degrees: MotorDegrees,
}

impl Calibration {
    /// Calibrate with the pen at `pen_position`.
    pub fn new(model: &KinematicsModel, pen_position: BoardPoint) -> Self {
        let initial_lengths = model.rope_lengths(&pen_position);
        let initial_degrees = model.degrees_for(&initial_lengths);
        Self {
            pen_position,
            initial_lengths,
            initial_degrees,
        }
    }

    /// Calibrate with the pen at a hand-measured board position.
    ///
    /// Fails when `pen` lies off the board.
    pub fn from_measurement(model: &KinematicsModel, pen: Offset) -> Result<Self> {
        let pen_position = BoardPoint::new(pen.x, pen.y, &model.workspace().board())?;
        let calibration = Self::new(model, pen_position);
        info!(
            pen_x = pen.x,
            pen_y = pen.y,
            left_degrees = calibration.initial_degrees.left,
            right_degrees = calibration.initial_degrees.right,
            "Calibrated start position"
        );
        Ok(calibration)
    }

    pub fn pen_position(&self) -> BoardPoint {
        self.pen_position
    }

    pub fn initial_lengths(&self) -> RopeLengths {
        self.initial_lengths
    }

    pub fn initial_degrees(&self) -> MotorDegrees {
        self.initial_degrees
    }
}
