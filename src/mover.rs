//! The mover: the single background task that drives the cabin.
//!
//! A [`MoverLoop`] runs [`Building::step`] until its stop flag is raised. The
//! flag is checked between steps only, so a step that has started always
//! finishes, including its pause.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_elevator::{Building, MoverLoop};
//! use rs_elevator::hal::MockDelay;
//!
//! let building = Arc::new(Building::default());
//! building.start().unwrap();
//!
//! let handle = MoverLoop::new(Arc::clone(&building), MockDelay::instant())
//!     .spawn()
//!     .unwrap();
//! handle.shutdown();
//! assert_eq!(building.state(), rs_elevator::CabinState::Idle);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::building::{Building, Step};
use crate::traits::Delay;

/// Name given to the mover thread.
pub const MOVER_THREAD_NAME: &str = "elevator-mover";

/// Totals gathered over one mover run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoverStats {
    /// Steps executed.
    pub steps: u64,
    /// Floors travelled.
    pub floors_travelled: u64,
    /// Loading cycles completed.
    pub loading_cycles: u64,
    /// Passengers who boarded.
    pub boarded: u64,
    /// Passengers who left at their destination.
    pub unloaded: u64,
}

impl MoverStats {
    fn record(&mut self, step: Step) {
        self.steps += 1;
        match step {
            Step::Loaded {
                unloaded, boarded, ..
            } => {
                self.loading_cycles += 1;
                self.boarded += boarded as u64;
                self.unloaded += unloaded as u64;
            }
            Step::Moved { .. } => self.floors_travelled += 1,
            Step::Dispatched(_) | Step::Waited(_) | Step::Interrupted => {}
        }
    }
}

/// Loop body of the mover task.
pub struct MoverLoop<D: Delay> {
    building: Arc<Building>,
    delay: D,
    stop: Arc<AtomicBool>,
}

impl<D: Delay> MoverLoop<D> {
    /// Create a mover for `building`, pausing through `delay`.
    pub fn new(building: Arc<Building>, delay: D) -> Self {
        Self {
            building,
            delay,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends the loop at the next step boundary.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Run on the current thread until the stop flag is raised.
    pub fn run(mut self) -> MoverStats {
        let mut stats = MoverStats::default();
        while !self.stop.load(Ordering::Acquire) {
            let delay = &mut self.delay;
            let step = self.building.step(|d| delay.pause(d));
            match step {
                Step::Waited(_) => {}
                other => debug!(step = ?other, "mover step"),
            }
            stats.record(step);
        }
        debug!(?stats, "mover exiting");
        stats
    }

    /// Run on a dedicated, named thread.
    pub fn spawn(self) -> std::io::Result<MoverHandle> {
        let stop = self.stop_flag();
        let thread = thread::Builder::new()
            .name(MOVER_THREAD_NAME.into())
            .spawn(move || self.run())?;
        Ok(MoverHandle { stop, thread })
    }
}

/// Handle to a running mover thread.
#[derive(Debug)]
pub struct MoverHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<MoverStats>,
}

impl MoverHandle {
    /// Whether the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Signal the loop to end and wait for its current step to finish.
    pub fn shutdown(self) -> MoverStats {
        self.stop.store(true, Ordering::Release);
        match self.thread.join() {
            Ok(stats) => stats,
            Err(_) => {
                error!("mover thread panicked");
                MoverStats::default()
            }
        }
    }
}
