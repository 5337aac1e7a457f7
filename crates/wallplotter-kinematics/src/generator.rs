//! Instruction Generator
//!
//! Turns a sequenced canvas pack into one motor instruction per point.
//!
//! Two policies are supported:
//!
//! - **Absolute**: target motor degrees relative to the calibration zero.
//!   Each instruction is independent of the previous ones.
//! - **Timed**: speed percentages and a duration relative to the previous
//!   target. The motor with the larger rope change runs at full speed and
//!   the other one at the rounded ratio. The generator tracks the rope
//!   lengths the rounded command really produces, so rounding error is
//!   carried into the next move instead of piling up.

use crate::calibration::Calibration;
use crate::instructions::{
    AbsoluteInstruction, InstructionPack, InstructionPath, TimedInstruction,
};
use crate::model::{KinematicsModel, RopeLengths};
use tracing::{debug, info};
use wallplotter_core::{
    CanvasPoint, InstructionPolicy, ParameterError, PlanarPoint, PlotPack, QualityReport,
    QualityWarning, Result,
};

/// Generator settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParams {
    pub policy: InstructionPolicy,
    /// Rope paid out per second at full speed, in mm
    pub rope_mm_per_second: f64,
    /// Smallest rope change the motors resolve, in mm
    pub min_move_mm: f64,
    /// Allowed distance between reconstructed and intended position, in mm
    pub drift_tolerance_mm: f64,
}

impl GeneratorParams {
    fn validate(&self) -> std::result::Result<(), ParameterError> {
        if !self.rope_mm_per_second.is_finite() || self.rope_mm_per_second <= 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "rope_mm_per_second".to_string(),
                value: self.rope_mm_per_second,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            policy: InstructionPolicy::Absolute,
            rope_mm_per_second: 1000.0,
            min_move_mm: 0.5,
            drift_tolerance_mm: 1.0,
        }
    }
}

/// Generator output
#[derive(Debug, Clone)]
pub struct Generated {
    pub instructions: InstructionPack,
    pub report: QualityReport,
}

/// Speed ratio command for a rope change, and the change it really makes.
pub fn timed_command(delta: &RopeLengths, rope_mm_per_second: f64) -> (TimedInstruction, RopeLengths) {
    let major = delta.max_abs();
    if major == 0.0 {
        return (TimedInstruction::idle(), RopeLengths::new(0.0, 0.0));
    }

    let full = |d: f64| if d < 0.0 { -100 } else { 100 };
    let ratio = |d: f64| ((d.abs() / major) * 100.0).round().copysign(d) as i32;

    let (left_speed, right_speed) = if delta.left.abs() >= delta.right.abs() {
        (full(delta.left), ratio(delta.right))
    } else {
        (ratio(delta.left), full(delta.right))
    };
    let duration = major / rope_mm_per_second;

    let achieved = RopeLengths::new(
        f64::from(left_speed) / 100.0 * rope_mm_per_second * duration,
        f64::from(right_speed) / 100.0 * rope_mm_per_second * duration,
    );
    (
        TimedInstruction::new(left_speed, right_speed, duration),
        achieved,
    )
}

/// Builds instruction packs for one calibrated workspace.
pub struct InstructionGenerator<'a> {
    model: &'a KinematicsModel,
    calibration: &'a Calibration,
    params: GeneratorParams,
}

impl<'a> InstructionGenerator<'a> {
    pub fn new(
        model: &'a KinematicsModel,
        calibration: &'a Calibration,
        params: GeneratorParams,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            model,
            calibration,
            params,
        })
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Generate instructions for every point of `pack`, in order.
    ///
    /// Fails when a point cannot be placed on the board or, for the timed
    /// policy, when the tracked rope lengths have no inverse solution.
    pub fn generate(&self, pack: &PlotPack<CanvasPoint>) -> Result<Generated> {
        info!(
            paths = pack.len(),
            points = pack.point_count(),
            policy = %self.params.policy,
            "Generating motor instructions"
        );

        let mut report = QualityReport::new();
        let instructions = match self.params.policy {
            InstructionPolicy::Absolute => {
                InstructionPack::Absolute(self.absolute_paths(pack, &mut report)?)
            }
            InstructionPolicy::Timed => InstructionPack::Timed(self.timed_paths(pack, &mut report)?),
        };

        info!(
            paths = instructions.len(),
            warnings = report.len(),
            "Generating motor instructions - done"
        );
        Ok(Generated {
            instructions,
            report,
        })
    }

    fn check_actuation(
        &self,
        delta: &RopeLengths,
        path: usize,
        point: usize,
        report: &mut QualityReport,
    ) {
        let delta_mm = delta.max_abs();
        if delta_mm < self.params.min_move_mm {
            report.push(QualityWarning::ShortActuation {
                path,
                point,
                delta_mm,
            });
        }
    }

    fn absolute_paths(
        &self,
        pack: &PlotPack<CanvasPoint>,
        report: &mut QualityReport,
    ) -> Result<Vec<InstructionPath<AbsoluteInstruction>>> {
        let initial = self.calibration.initial_degrees();
        let mut previous = self.calibration.initial_lengths();
        let mut paths = Vec::with_capacity(pack.len());

        for (path_index, path) in pack.iter().enumerate() {
            let mut instructions = Vec::with_capacity(path.len());
            for (point_index, point) in path.iter().enumerate() {
                let lengths = self.model.canvas_rope_lengths(point)?;
                self.check_actuation(&previous.delta_to(&lengths), path_index, point_index, report);
                previous = lengths;

                let degrees = self.model.degrees_for(&lengths);
                instructions.push(AbsoluteInstruction::new(
                    degrees.left - initial.left,
                    degrees.right - initial.right,
                ));
            }
            debug!(path = path_index, instructions = instructions.len(), "Generated path");
            paths.push(InstructionPath::new(instructions)?);
        }
        Ok(paths)
    }

    fn timed_paths(
        &self,
        pack: &PlotPack<CanvasPoint>,
        report: &mut QualityReport,
    ) -> Result<Vec<InstructionPath<TimedInstruction>>> {
        let workspace = self.model.workspace();
        let mut state = self.calibration.initial_lengths();
        let mut paths = Vec::with_capacity(pack.len());

        for (path_index, path) in pack.iter().enumerate() {
            let mut instructions = Vec::with_capacity(path.len());
            for (point_index, point) in path.iter().enumerate() {
                let target = point.to_board(workspace)?;
                let delta = state.delta_to(&self.model.rope_lengths(&target));
                self.check_actuation(&delta, path_index, point_index, report);

                let (instruction, achieved) = timed_command(&delta, self.params.rope_mm_per_second);
                state = state.offset_by(&achieved);

                let reached = self.model.position_for(&state)?;
                let deviation = reached.distance_to(&target);
                if deviation > self.params.drift_tolerance_mm {
                    report.push(QualityWarning::Drift {
                        path: path_index,
                        point: point_index,
                        deviation,
                    });
                }
                instructions.push(instruction);
            }
            debug!(path = path_index, instructions = instructions.len(), "Generated path");
            paths.push(InstructionPath::new(instructions)?);
        }
        Ok(paths)
    }
}
