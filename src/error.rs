//! Error taxonomy for elevator control operations.
//!
//! Every fallible operation on [`Building`](crate::Building) and
//! [`Elevator`](crate::Elevator) reports one of three kinds synchronously to
//! its caller. None of them are retried internally.
//!
//! | Variant | When | Status code |
//! |---------|------|-------------|
//! | [`InvalidArgument`](ElevatorError::InvalidArgument) | floor outside `[1, N]`, unknown category | `-22` |
//! | [`InvalidState`](ElevatorError::InvalidState) | `start` while not offline | `-22` |
//! | [`OutOfMemory`](ElevatorError::OutOfMemory) | passenger storage could not grow | `-12` |
//!
//! Capacity and weight limits are not errors: an excess passenger simply
//! stays queued at its floor until a later loading cycle.

use thiserror::Error;

use crate::cabin::CabinState;

/// Status code returned by the entry points on success.
pub const STATUS_OK: i32 = 0;
/// Status code for rejected arguments or state (EINVAL).
pub const STATUS_INVALID: i32 = -22;
/// Status code for allocation failure (ENOMEM).
pub const STATUS_NO_MEMORY: i32 = -12;

/// Which request argument failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidArgument {
    /// Start floor outside `[1, N]`.
    StartFloor(i32),
    /// Destination floor outside `[1, N]`.
    DestinationFloor(i32),
    /// Category code outside `0..=3`.
    Category(i32),
}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidArgument::StartFloor(floor) => write!(f, "start floor {floor} out of range"),
            InvalidArgument::DestinationFloor(floor) => {
                write!(f, "destination floor {floor} out of range")
            }
            InvalidArgument::Category(code) => write!(f, "unknown passenger category {code}"),
        }
    }
}

/// Errors reported by elevator control operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ElevatorError {
    /// A request argument was out of range or unrecognized.
    #[error("invalid argument: {0}")]
    InvalidArgument(InvalidArgument),

    /// The operation is not allowed in the cabin's current state.
    #[error("invalid state: elevator is {0}")]
    InvalidState(CabinState),

    /// Storage for a new passenger could not be allocated.
    #[error("out of memory: cannot allocate passenger")]
    OutOfMemory,
}

impl ElevatorError {
    /// Errno-style status code for this error.
    ///
    /// ```
    /// use rs_elevator::{CabinState, ElevatorError};
    ///
    /// assert_eq!(ElevatorError::InvalidState(CabinState::Idle).errno(), -22);
    /// assert_eq!(ElevatorError::OutOfMemory.errno(), -12);
    /// ```
    pub const fn errno(&self) -> i32 {
        match self {
            ElevatorError::InvalidArgument(_) | ElevatorError::InvalidState(_) => STATUS_INVALID,
            ElevatorError::OutOfMemory => STATUS_NO_MEMORY,
        }
    }
}

impl From<InvalidArgument> for ElevatorError {
    fn from(arg: InvalidArgument) -> Self {
        ElevatorError::InvalidArgument(arg)
    }
}

impl From<std::collections::TryReserveError> for ElevatorError {
    fn from(_: std::collections::TryReserveError) -> Self {
        ElevatorError::OutOfMemory
    }
}

/// Collapse a control result into its status code.
pub fn status_code(result: Result<(), ElevatorError>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(e) => e.errno(),
    }
}
