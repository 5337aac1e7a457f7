//! Motor instruction types
//!
//! One instruction per sampled point. The first instruction of every
//! path is a travel move with the pen up; the remaining ones draw.

use serde::{Deserialize, Serialize};
use std::fmt;
use wallplotter_core::{GeometryError, InstructionPolicy, PlotPack, PlanarPoint};

/// Target motor rotation relative to the calibration zero, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteInstruction {
    pub left_degrees: f64,
    pub right_degrees: f64,
}

impl AbsoluteInstruction {
    pub fn new(left_degrees: f64, right_degrees: f64) -> Self {
        Self {
            left_degrees,
            right_degrees,
        }
    }
}

/// Signed speed percentages held for `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedInstruction {
    pub left_speed: i32,
    pub right_speed: i32,
    pub duration: f64,
}

impl TimedInstruction {
    pub fn new(left_speed: i32, right_speed: i32, duration: f64) -> Self {
        Self {
            left_speed,
            right_speed,
            duration,
        }
    }

    /// The command that leaves both motors still.
    pub fn idle() -> Self {
        Self::new(0, 0, 0.0)
    }
}

/// Either instruction kind, for consumers that handle both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instruction {
    Absolute(AbsoluteInstruction),
    Timed(TimedInstruction),
}

impl From<AbsoluteInstruction> for Instruction {
    fn from(i: AbsoluteInstruction) -> Self {
        Self::Absolute(i)
    }
}

impl From<TimedInstruction> for Instruction {
    fn from(i: TimedInstruction) -> Self {
        Self::Timed(i)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(i) => write!(f, "A({:.4}, {:.4})", i.left_degrees, i.right_degrees),
            Self::Timed(i) => write!(
                f,
                "T({}%, {}%, {:.4}s)",
                i.left_speed, i.right_speed, i.duration
            ),
        }
    }
}

/// Whether a move is made with the pen up or down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Travel,
    Draw,
}

/// Instructions for one stroke. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionPath<I> {
    instructions: Vec<I>,
}

impl<I> InstructionPath<I> {
    pub fn new(instructions: Vec<I>) -> Result<Self, GeometryError> {
        if instructions.is_empty() {
            return Err(GeometryError::EmptyPath);
        }
        Ok(Self { instructions })
    }

    pub fn instructions(&self) -> &[I] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions tagged with the pen state they are executed in.
    pub fn moves(&self) -> impl Iterator<Item = (MoveKind, &I)> {
        self.instructions.iter().enumerate().map(|(i, instruction)| {
            let kind = if i == 0 { MoveKind::Travel } else { MoveKind::Draw };
            (kind, instruction)
        })
    }
}

/// One step of device execution, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceStep {
    Travel(Instruction),
    PenDown,
    Draw(Instruction),
    PenUp,
}

/// A complete instruction job. A pack holds a single instruction kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "policy", content = "paths", rename_all = "lowercase")]
pub enum InstructionPack {
    Absolute(Vec<InstructionPath<AbsoluteInstruction>>),
    Timed(Vec<InstructionPath<TimedInstruction>>),
}

impl InstructionPack {
    pub fn policy(&self) -> InstructionPolicy {
        match self {
            Self::Absolute(_) => InstructionPolicy::Absolute,
            Self::Timed(_) => InstructionPolicy::Timed,
        }
    }

    /// Number of paths
    pub fn len(&self) -> usize {
        match self {
            Self::Absolute(paths) => paths.len(),
            Self::Timed(paths) => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instruction count of every path, in order.
    pub fn path_lengths(&self) -> Vec<usize> {
        match self {
            Self::Absolute(paths) => paths.iter().map(InstructionPath::len).collect(),
            Self::Timed(paths) => paths.iter().map(InstructionPath::len).collect(),
        }
    }

    /// Instructions of every path as the untyped [`Instruction`].
    pub fn paths(&self) -> Vec<Vec<Instruction>> {
        fn erase<I: Copy + Into<Instruction>>(paths: &[InstructionPath<I>]) -> Vec<Vec<Instruction>> {
            paths
                .iter()
                .map(|p| p.instructions().iter().map(|&i| i.into()).collect())
                .collect()
        }
        match self {
            Self::Absolute(paths) => erase(paths),
            Self::Timed(paths) => erase(paths),
        }
    }

    /// Check that this pack has one instruction per point of `pack`.
    pub fn matches_shape<P: PlanarPoint>(&self, pack: &PlotPack<P>) -> bool {
        let lengths = self.path_lengths();
        lengths.len() == pack.len()
            && lengths
                .iter()
                .zip(pack.iter())
                .all(|(&n, path)| n == path.len())
    }

    /// Steps in the order the device executes them.
    ///
    /// Per path: travel to the first target, lower the pen, draw through
    /// the remaining targets, raise the pen.
    pub fn device_steps(&self) -> Vec<DeviceStep> {
        let mut steps = Vec::new();
        for path in self.paths() {
            for (i, instruction) in path.into_iter().enumerate() {
                if i == 0 {
                    steps.push(DeviceStep::Travel(instruction));
                    steps.push(DeviceStep::PenDown);
                } else {
                    steps.push(DeviceStep::Draw(instruction));
                }
            }
            steps.push(DeviceStep::PenUp);
        }
        steps
    }
}
