//! Integer-coded entry points.
//!
//! [`RequestGateway`] maps the three control operations onto plain integer
//! arguments and status-code returns, for callers that speak in codes rather
//! than Rust types: `0` on success, `-22` for invalid arguments or state,
//! `-12` when a passenger cannot be allocated.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::{Building, RequestGateway};
//!
//! let gateway = RequestGateway::new(Building::default());
//! assert_eq!(gateway.start(), 0);
//! assert_eq!(gateway.start(), -22);
//! assert_eq!(gateway.issue_request(1, 4, 0), 0);
//! assert_eq!(gateway.issue_request(1, 4, 9), -22);
//! assert_eq!(gateway.stop(), 0);
//! ```

use crate::error::{status_code, STATUS_OK};
use crate::report::StatusReport;
use crate::traits::ElevatorControl;

/// Status-code front end over any [`ElevatorControl`].
#[derive(Debug)]
pub struct RequestGateway<C: ElevatorControl> {
    control: C,
}

impl<C: ElevatorControl> RequestGateway<C> {
    /// Wrap a control implementation.
    pub fn new(control: C) -> Self {
        Self { control }
    }

    /// The wrapped control.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Start the elevator.
    pub fn start(&self) -> i32 {
        status_code(self.control.start())
    }

    /// Stop the elevator. Always succeeds.
    pub fn stop(&self) -> i32 {
        self.control.stop();
        STATUS_OK
    }

    /// Queue a request.
    ///
    /// `category` is `0` worker, `1` lawyer, `2` boss, `3` visitor.
    pub fn issue_request(&self, start_floor: i32, dest_floor: i32, category: i32) -> i32 {
        status_code(
            self.control
                .issue_request(start_floor, dest_floor, category),
        )
    }

    /// Current status snapshot.
    pub fn status(&self) -> StatusReport {
        self.control.status()
    }
}
