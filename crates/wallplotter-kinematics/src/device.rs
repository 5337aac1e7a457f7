//! Device contract
//!
//! What the on-robot control loop must do with an [`InstructionPack`].
//! The loop itself runs on the robot; this crate only fixes the order of
//! operations so that hosts and simulators drive it the same way.

use crate::instructions::{DeviceStep, Instruction, InstructionPack};
use tracing::debug;
use wallplotter_core::Result;

/// Obligations of a plotter that executes instructions.
pub trait DeviceContract {
    /// Drive both motors until the target is reached within
    /// [`point_reached_tolerance_mm`](Self::point_reached_tolerance_mm).
    fn move_to(&mut self, instruction: &Instruction) -> Result<()>;

    /// Lower the pen. Called once the first point of a path is reached.
    fn pen_down(&mut self) -> Result<()>;

    /// Raise the pen. Called before travelling to the next path.
    fn pen_up(&mut self) -> Result<()>;

    /// Distance at which a target counts as reached, in mm. A replay
    /// never reports a deviation inside it as drift.
    fn point_reached_tolerance_mm(&self) -> f64;
}

/// Run every step of `pack` on `device`, stopping at the first failure.
pub fn execute<D: DeviceContract + ?Sized>(device: &mut D, pack: &InstructionPack) -> Result<()> {
    let steps = pack.device_steps();
    debug!(steps = steps.len(), policy = %pack.policy(), "Executing instructions");
    for step in &steps {
        match step {
            DeviceStep::Travel(i) | DeviceStep::Draw(i) => device.move_to(i)?,
            DeviceStep::PenDown => device.pen_down()?,
            DeviceStep::PenUp => device.pen_up()?,
        }
    }
    Ok(())
}
