//! Control seam between request sources and the elevator.
//!
//! Entry points (the integer gateway, the HTTP service) are written against
//! [`ElevatorControl`] rather than a concrete type, so they work with a full
//! [`Elevator`](crate::Elevator), a bare [`Building`](crate::Building), or a
//! mock.

use std::sync::Arc;

use crate::error::ElevatorError;
use crate::report::StatusReport;

/// The three control operations plus the status query.
pub trait ElevatorControl: Send + Sync {
    /// Put the elevator in service.
    fn start(&self) -> Result<(), ElevatorError>;

    /// Take the elevator out of service. Never fails; idempotent.
    fn stop(&self);

    /// Queue a passenger request given as raw integers.
    fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError>;

    /// Consistent snapshot of cabin and floors.
    fn status(&self) -> StatusReport;
}

impl<T: ElevatorControl + ?Sized> ElevatorControl for Arc<T> {
    fn start(&self) -> Result<(), ElevatorError> {
        (**self).start()
    }

    fn stop(&self) {
        (**self).stop()
    }

    fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError> {
        (**self).issue_request(start_floor, dest_floor, category)
    }

    fn status(&self) -> StatusReport {
        (**self).status()
    }
}

impl ElevatorControl for crate::Building {
    fn start(&self) -> Result<(), ElevatorError> {
        crate::Building::start(self)
    }

    fn stop(&self) {
        crate::Building::stop(self)
    }

    fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError> {
        crate::Building::issue_request(self, start_floor, dest_floor, category)
    }

    fn status(&self) -> StatusReport {
        crate::Building::status(self)
    }
}
