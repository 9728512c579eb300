//! Pause source for the mover.
//!
//! The simulation's loading, travel and idle delays all go through
//! [`Delay`], so tests can swap real sleeps for a recording mock.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use rs_elevator::traits::Delay;
//! use rs_elevator::hal::MockDelay;
//!
//! let mut delay = MockDelay::instant();
//! delay.pause(Duration::from_millis(2000));
//! assert_eq!(delay.total(), Duration::from_millis(2000));
//! ```

use std::time::Duration;

/// Blocking pause used between simulation steps.
///
/// Implementations must be movable onto the mover thread.
pub trait Delay: Send + 'static {
    /// Block the calling thread for the simulated `duration`.
    fn pause(&mut self, duration: Duration);
}

impl<D: Delay + ?Sized> Delay for Box<D> {
    fn pause(&mut self, duration: Duration) {
        (**self).pause(duration);
    }
}
