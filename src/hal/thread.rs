//! Real-time pause source.

use std::time::Duration;

use crate::traits::Delay;

/// Sleeps the calling thread for the full duration.
///
/// The default pause source for [`Elevator`](crate::Elevator).
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn sleeps_at_least_requested() {
        let mut delay = ThreadDelay;
        let start = Instant::now();
        delay.pause(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
