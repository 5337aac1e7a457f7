//! Motion Simulator
//!
//! A mock plotter that executes instructions the way the robot does and
//! reconstructs where the pen ends up. Positions come only from the
//! inverse rope mapping, so a bug in instruction generation shows up as a
//! difference between the intended and the replayed drawing.

use tracing::{debug, info};
use wallplotter_core::{
    BoardPoint, CanvasPoint, ParameterError, PlanarPoint, PlotPack, PlotPath, QualityReport,
    QualityWarning, Result,
};
use wallplotter_kinematics::{
    execute, Calibration, DeviceContract, Instruction, InstructionPack, KinematicsModel,
    MotorDegrees, RopeLengths,
};
use wallplotter_settings::Config;

/// Replay settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    /// Rope paid out per second at full speed, in mm
    pub rope_mm_per_second: f64,
    /// Deviations above this are reported as drift, in mm
    pub drift_tolerance_mm: f64,
    /// Distance at which the device counts a target as reached, in mm.
    /// A deviation inside it is never drift.
    pub point_reached_tolerance_mm: f64,
}

impl SimulationParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rope_mm_per_second: config.motor.rope_mm_per_second,
            drift_tolerance_mm: config.simulation.drift_tolerance_mm,
            point_reached_tolerance_mm: config.motor.point_reached_tolerance_mm,
        }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of comparing a replay with the intended drawing.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Replayed pen positions, shaped like the instruction pack
    pub plotted: PlotPack<BoardPoint>,
    /// Distance to the intended point, per path and point
    pub deviations: Vec<Vec<f64>>,
    pub max_deviation: f64,
    pub report: QualityReport,
}

impl SimulationReport {
    pub fn drift_count(&self) -> usize {
        self.report.drift_count()
    }
}

/// In-memory plotter driven through [`DeviceContract`].
#[derive(Debug, Clone)]
pub struct MockPlotter {
    model: KinematicsModel,
    calibration: Calibration,
    params: SimulationParams,
    lengths: RopeLengths,
    position: BoardPoint,
    pen_down: bool,
    stroke: Vec<BoardPoint>,
    strokes: Vec<PlotPath<BoardPoint>>,
}

impl MockPlotter {
    pub fn new(model: KinematicsModel, calibration: Calibration) -> Self {
        Self::with_params(model, calibration, SimulationParams::default())
    }

    pub fn with_params(
        model: KinematicsModel,
        calibration: Calibration,
        params: SimulationParams,
    ) -> Self {
        Self {
            model,
            calibration,
            params,
            lengths: calibration.initial_lengths(),
            position: calibration.pen_position(),
            pen_down: false,
            stroke: Vec::new(),
            strokes: Vec::new(),
        }
    }

    /// Current pen position
    pub fn position(&self) -> BoardPoint {
        self.position
    }

    pub fn rope_lengths(&self) -> RopeLengths {
        self.lengths
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Put the pen back at the calibration position and forget past strokes.
    pub fn reset(&mut self) {
        self.lengths = self.calibration.initial_lengths();
        self.position = self.calibration.pen_position();
        self.pen_down = false;
        self.stroke.clear();
        self.strokes.clear();
    }

    fn target_lengths(&self, instruction: &Instruction) -> RopeLengths {
        match instruction {
            Instruction::Absolute(i) => {
                let initial = self.calibration.initial_degrees();
                self.model.lengths_for(&MotorDegrees::new(
                    i.left_degrees + initial.left,
                    i.right_degrees + initial.right,
                ))
            }
            Instruction::Timed(i) => {
                let travel = |speed: i32| {
                    f64::from(speed) / 100.0 * self.params.rope_mm_per_second * i.duration
                };
                self.lengths
                    .offset_by(&RopeLengths::new(travel(i.left_speed), travel(i.right_speed)))
            }
        }
    }

    fn finish_stroke(&mut self) -> Result<()> {
        if !self.stroke.is_empty() {
            let stroke = PlotPath::new(std::mem::take(&mut self.stroke))?;
            self.strokes.push(stroke);
        }
        Ok(())
    }

    /// Replay `pack` from the calibration position.
    ///
    /// The output has one point per instruction, grouped like the pack.
    pub fn plot(&mut self, pack: &InstructionPack) -> Result<PlotPack<BoardPoint>> {
        info!(paths = pack.len(), policy = %pack.policy(), "Simulating plotter");
        self.reset();
        execute(self, pack)?;
        self.finish_stroke()?;

        let plotted = PlotPack::new(std::mem::take(&mut self.strokes));
        info!(points = plotted.point_count(), "Simulating plotter - done");
        Ok(plotted)
    }

    /// Replay `pack` and compare every position with `intended`.
    ///
    /// Deviations above both the drift tolerance and the device's reach
    /// tolerance are reported as drift.
    pub fn verify(
        &mut self,
        pack: &InstructionPack,
        intended: &PlotPack<CanvasPoint>,
    ) -> Result<SimulationReport> {
        if !pack.matches_shape(intended) {
            return Err(ParameterError::Mismatch(format!(
                "instruction paths {:?} do not match drawing paths {:?}",
                pack.path_lengths(),
                intended.iter().map(PlotPath::len).collect::<Vec<_>>()
            ))
            .into());
        }

        let plotted = self.plot(pack)?;
        let workspace = *self.model.workspace();
        let tolerance = self
            .params
            .drift_tolerance_mm
            .max(self.point_reached_tolerance_mm());
        let mut report = QualityReport::new();
        let mut deviations = Vec::with_capacity(plotted.len());
        let mut max_deviation = 0.0f64;

        for (path_index, (replayed, wanted)) in plotted.iter().zip(intended.iter()).enumerate() {
            let mut path_deviations = Vec::with_capacity(replayed.len());
            for (point_index, (got, want)) in replayed.iter().zip(wanted.iter()).enumerate() {
                let deviation = got.distance_to(&want.to_board(&workspace)?);
                if deviation > tolerance {
                    report.push(QualityWarning::Drift {
                        path: path_index,
                        point: point_index,
                        deviation,
                    });
                }
                max_deviation = max_deviation.max(deviation);
                path_deviations.push(deviation);
            }
            deviations.push(path_deviations);
        }

        info!(max_deviation, drift = report.drift_count(), "Verified simulation");
        Ok(SimulationReport {
            plotted,
            deviations,
            max_deviation,
            report,
        })
    }
}

impl DeviceContract for MockPlotter {
    fn move_to(&mut self, instruction: &Instruction) -> Result<()> {
        let lengths = self.target_lengths(instruction);
        let position = self.model.position_for(&lengths)?;
        debug!(%instruction, x = position.x(), y = position.y(), pen_down = self.pen_down, "Moved");
        self.lengths = lengths;
        self.position = position;
        self.stroke.push(position);
        Ok(())
    }

    fn pen_down(&mut self) -> Result<()> {
        self.pen_down = true;
        Ok(())
    }

    fn pen_up(&mut self) -> Result<()> {
        self.pen_down = false;
        self.finish_stroke()
    }

    fn point_reached_tolerance_mm(&self) -> f64 {
        self.params.point_reached_tolerance_mm
    }
}
