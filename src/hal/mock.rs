//! Mock implementations for testing without real delays.
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDelay`] | [`Delay`] | Records requested pauses instead of sleeping through them |
//! | [`MockControl`] | [`ElevatorControl`] | Records control calls and returns canned results |
//!
//! [`Delay`]: crate::traits::Delay
//! [`ElevatorControl`]: crate::traits::ElevatorControl

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::building::Building;
use crate::error::ElevatorError;
use crate::report::StatusReport;
use crate::traits::{Delay, ElevatorControl};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Delay Mock
// ============================================================================

/// Mock pause source.
///
/// Records every requested pause. Clones share the same record, so a test can
/// keep one clone while another is moved onto the mover thread.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use rs_elevator::hal::MockDelay;
/// use rs_elevator::traits::Delay;
///
/// let delay = MockDelay::instant();
/// let mut on_thread = delay.clone();
/// on_thread.pause(Duration::from_millis(100));
/// on_thread.pause(Duration::from_millis(2000));
///
/// assert_eq!(delay.count(), 2);
/// assert_eq!(delay.total(), Duration::from_millis(2100));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockDelay {
    pauses: Arc<Mutex<Vec<Duration>>>,
    real: Duration,
}

impl MockDelay {
    /// Record pauses and only yield the thread.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Record pauses and actually sleep `real` for each one.
    ///
    /// Useful to give other threads a window between steps.
    pub fn with_real_pause(mut self, real: Duration) -> Self {
        self.real = real;
        self
    }

    /// Every pause requested so far, in order.
    pub fn pauses(&self) -> Vec<Duration> {
        lock(&self.pauses).clone()
    }

    /// Number of pauses requested.
    pub fn count(&self) -> usize {
        lock(&self.pauses).len()
    }

    /// Total simulated time.
    pub fn total(&self) -> Duration {
        lock(&self.pauses).iter().sum()
    }
}

impl Delay for MockDelay {
    fn pause(&mut self, duration: Duration) {
        lock(&self.pauses).push(duration);
        if self.real.is_zero() {
            std::thread::yield_now();
        } else {
            std::thread::sleep(self.real);
        }
    }
}

// ============================================================================
// Control Mock
// ============================================================================

/// A control call seen by [`MockControl`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCall {
    /// `start()`
    Start,
    /// `stop()`
    Stop,
    /// `issue_request(start, dest, category)`
    Request(i32, i32, i32),
    /// `status()`
    Status,
}

/// Mock elevator control.
///
/// Records calls and returns the configured results. The status snapshot is
/// that of a freshly constructed [`Building`].
///
/// # Example
///
/// ```rust
/// use rs_elevator::hal::{ControlCall, MockControl};
/// use rs_elevator::traits::ElevatorControl;
/// use rs_elevator::ElevatorError;
///
/// let control = MockControl::new().with_start_result(Err(ElevatorError::OutOfMemory));
/// assert!(control.start().is_err());
/// control.issue_request(1, 2, 3).unwrap();
/// assert_eq!(control.calls(), vec![ControlCall::Start, ControlCall::Request(1, 2, 3)]);
/// ```
#[derive(Debug)]
pub struct MockControl {
    calls: Mutex<Vec<ControlCall>>,
    start_result: Result<(), ElevatorError>,
    request_result: Result<(), ElevatorError>,
    status: StatusReport,
}

impl Default for MockControl {
    fn default() -> Self {
        Self::new()
    }
}

impl MockControl {
    /// Mock that accepts every call.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            start_result: Ok(()),
            request_result: Ok(()),
            status: Building::default().status(),
        }
    }

    /// Result returned by `start`.
    pub fn with_start_result(mut self, result: Result<(), ElevatorError>) -> Self {
        self.start_result = result;
        self
    }

    /// Result returned by `issue_request`.
    pub fn with_request_result(mut self, result: Result<(), ElevatorError>) -> Self {
        self.request_result = result;
        self
    }

    /// Calls seen so far, in order.
    pub fn calls(&self) -> Vec<ControlCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: ControlCall) {
        lock(&self.calls).push(call);
    }
}

impl ElevatorControl for MockControl {
    fn start(&self) -> Result<(), ElevatorError> {
        self.record(ControlCall::Start);
        self.start_result
    }

    fn stop(&self) {
        self.record(ControlCall::Stop);
    }

    fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError> {
        self.record(ControlCall::Request(start_floor, dest_floor, category));
        self.request_result
    }

    fn status(&self) -> StatusReport {
        self.record(ControlCall::Status);
        self.status.clone()
    }
}
