//! Lifecycle handle tying the simulation state to its mover task.
//!
//! [`Elevator`] owns an `Arc<Building>` and, while in service, the mover
//! thread. It is the type request sources normally talk to, and plays the
//! same role for every caller: all of them share one building, so a request
//! from any source is immediately visible to the mover and to status reads.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::{Category, Elevator, ElevatorConfig};
//! use rs_elevator::hal::MockDelay;
//!
//! let elevator = Elevator::with_delay(ElevatorConfig::default(), MockDelay::instant());
//! elevator.start().unwrap();
//! elevator.issue_request(2, 5, Category::Boss.code()).unwrap();
//!
//! // Stop joins the mover before discarding anyone still riding
//! elevator.stop();
//! let status = elevator.status();
//! assert_eq!(status.occupant_count(), 0);
//! ```
//!
//! # Thread Safety
//!
//! `Elevator` is `Sync`; share it with `Arc` across request threads. Control
//! calls never hold the cabin lock while waiting for the mover.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

use crate::building::Building;
use crate::config::ElevatorConfig;
use crate::error::ElevatorError;
use crate::hal::ThreadDelay;
use crate::mover::{MoverHandle, MoverLoop, MoverStats};
use crate::passenger::Category;
use crate::report::StatusReport;
use crate::traits::{Delay, ElevatorControl};

/// A running (or stopped) elevator simulation.
///
/// # Type Parameter
///
/// - `D`: pause source for the mover ([`Delay`]); each start clones a fresh one
pub struct Elevator<D: Delay + Clone = ThreadDelay> {
    building: Arc<Building>,
    delay: D,
    mover: Mutex<Option<MoverHandle>>,
}

impl Elevator<ThreadDelay> {
    /// Create an offline elevator that pauses in real time.
    pub fn new(config: ElevatorConfig) -> Self {
        Self::with_delay(config, ThreadDelay)
    }
}

impl<D: Delay + Clone> Elevator<D> {
    /// Create an offline elevator using `delay` for the mover's pauses.
    pub fn with_delay(config: ElevatorConfig, delay: D) -> Self {
        Self {
            building: Arc::new(Building::new(config)),
            delay,
            mover: Mutex::new(None),
        }
    }

    fn mover_slot(&self) -> MutexGuard<'_, Option<MoverHandle>> {
        self.mover.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Shared simulation state.
    pub fn building(&self) -> &Arc<Building> {
        &self.building
    }

    /// Whether a mover thread is attached.
    pub fn is_running(&self) -> bool {
        self.mover_slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Put the elevator in service and spawn its mover.
    ///
    /// Fails with [`ElevatorError::InvalidState`] unless offline.
    pub fn start(&self) -> Result<(), ElevatorError> {
        let mut slot = self.mover_slot();
        self.building.start()?;

        // A mover left behind by a stop issued on the building directly
        if let Some(stale) = slot.take() {
            stale.shutdown();
        }

        let mover = MoverLoop::new(Arc::clone(&self.building), self.delay.clone());
        match mover.spawn() {
            Ok(handle) => {
                *slot = Some(handle);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to spawn mover thread");
                self.building.begin_stop();
                Err(ElevatorError::OutOfMemory)
            }
        }
    }

    /// Take the elevator out of service.
    ///
    /// Marks the cabin offline, waits for the mover to finish its current
    /// step and exit, then discards every occupant. Idempotent.
    ///
    /// The mover slot stays locked throughout, so a concurrent [`start`]
    /// runs entirely before or entirely after this call. The mover never
    /// takes that lock, so joining it here cannot deadlock.
    ///
    /// [`start`]: Elevator::start
    pub fn stop(&self) -> Option<MoverStats> {
        let mut slot = self.mover_slot();
        if !self.building.begin_stop() {
            return None;
        }
        let stats = slot.take().map(MoverHandle::shutdown);
        self.building.evict_all();
        drop(slot);
        info!(?stats, "elevator stopped");
        stats
    }

    /// Queue a request given as raw integers.
    pub fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError> {
        self.building.issue_request(start_floor, dest_floor, category)
    }

    /// Queue a typed request.
    pub fn issue(&self, start: u8, dest: u8, category: Category) -> Result<(), ElevatorError> {
        self.building.issue(start, dest, category)
    }

    /// Consistent snapshot of cabin and floors.
    pub fn status(&self) -> StatusReport {
        self.building.status()
    }
}

impl<D: Delay + Clone> Drop for Elevator<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<D: Delay + Clone> core::fmt::Debug for Elevator<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Elevator")
            .field("building", &self.building)
            .field("running", &self.is_running())
            .finish()
    }
}

impl<D: Delay + Clone + Sync> ElevatorControl for Elevator<D> {
    fn start(&self) -> Result<(), ElevatorError> {
        Elevator::start(self)
    }

    fn stop(&self) {
        Elevator::stop(self);
    }

    fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError> {
        Elevator::issue_request(self, start_floor, dest_floor, category)
    }

    fn status(&self) -> StatusReport {
        Elevator::status(self)
    }
}
