//! Trait definitions at the seams of the simulation.
//!
//! - `timing`: [`Delay`], the pause source the mover sleeps through
//! - `control`: [`ElevatorControl`], what request sources talk to
//!
//! Concrete implementations live in [`crate::hal`] (real sleeps, mocks) and
//! on [`Elevator`](crate::Elevator) / [`Building`](crate::Building).

pub mod control;
pub mod timing;

pub use control::*;
pub use timing::*;
