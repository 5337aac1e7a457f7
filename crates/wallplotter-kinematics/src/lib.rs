//! # Wall Plotter Kinematics
//!
//! Rope geometry of a two-anchor V-plotter and the motor instructions
//! derived from it.
//!
//! - **Model**: pen position to rope lengths and back
//! - **Calibration**: zero reference for a run
//! - **Generator**: absolute and timed instruction policies
//! - **Instruction file**: the text format the robot reads
//! - **Device**: the execution contract of the robot

pub mod calibration;
pub mod device;
pub mod generator;
pub mod instruction_file;
pub mod instructions;
pub mod model;

pub use calibration::Calibration;
pub use device::{execute, DeviceContract};
pub use generator::{timed_command, Generated, GeneratorParams, InstructionGenerator};
pub use instruction_file::{
    format_instructions, load_instructions, parse_instructions, save_instructions,
};
pub use instructions::{
    AbsoluteInstruction, DeviceStep, Instruction, InstructionPack, InstructionPath, MoveKind,
    TimedInstruction,
};
pub use model::{circle_intersections, KinematicsModel, MotorDegrees, RopeLengths};
