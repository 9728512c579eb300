//! The simulation state: one cabin and its floor queues.
//!
//! [`Building`] is constructed explicitly and shared by handle (`Arc`) between
//! request producers and the mover. It provides every control operation and
//! the single-step scheduling logic the mover runs.
//!
//! # Locking
//!
//! - One lock for the cabin aggregate, one per floor queue.
//! - The cabin lock and a floor lock are never held at the same time, and no
//!   two floor locks are held at once.
//! - No lock is held across a pause.
//!
//! # Scheduling
//!
//! The mover calls [`Building::step`] in a loop. A step looks at the cabin
//! state and does one of:
//!
//! | State | Step |
//! |-------|------|
//! | `LOADING` | unload, load, pause for the loading delay, pick a direction |
//! | `UP` / `DOWN` | pause for the travel delay, move one floor, stop if needed |
//! | `IDLE` | head for any waiting passenger, else pause for the idle poll interval |
//! | `OFFLINE` | pause for the idle poll interval |
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::{Building, CabinState, Category};
//!
//! let building = Building::default();
//! building.start().unwrap();
//! building.issue(1, 4, Category::Worker).unwrap();
//! assert_eq!(building.state(), CabinState::Loading);
//!
//! // Drive the state machine by hand, skipping the pauses
//! building.step(|_| {});
//! assert_eq!(building.state(), CabinState::MovingUp);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::cabin::{fits, Cabin, CabinState};
use crate::config::ElevatorConfig;
use crate::error::{ElevatorError, InvalidArgument};
use crate::floor::{validate_floor, FloorQueue, BOTTOM_FLOOR, NUM_FLOORS, TOP_FLOOR};
use crate::passenger::{Category, Passenger, Weight};
use crate::report::{CategoryCount, FloorStatus, StatusReport};

/// What one scheduling step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A loading cycle ran at `floor`.
    Loaded {
        /// Floor the cycle ran at.
        floor: u8,
        /// Occupants who left.
        unloaded: usize,
        /// Waiting passengers who boarded.
        boarded: usize,
        /// State chosen by the direction decision.
        next: CabinState,
    },
    /// The cabin moved one floor.
    Moved {
        /// Floor arrived at.
        floor: u8,
        /// Whether the cabin stopped there to load.
        stopped: bool,
    },
    /// An idle cabin found passengers already waiting and set off.
    Dispatched(CabinState),
    /// Nothing to do in this state.
    Waited(CabinState),
    /// The state changed underneath the step (the elevator was stopped).
    Interrupted,
}

/// Counts from one unload/load pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Occupants who left at this floor.
    pub unloaded: usize,
    /// Waiting passengers who boarded.
    pub boarded: usize,
}

/// Cabin plus floor queues, shared by all operations.
#[derive(Debug)]
pub struct Building {
    cabin: Mutex<Cabin>,
    floors: [FloorQueue; NUM_FLOORS as usize],
    config: ElevatorConfig,
}

impl Default for Building {
    fn default() -> Self {
        Self::new(ElevatorConfig::default())
    }
}

impl Building {
    /// Create the simulation: cabin offline at the configured floor, all
    /// queues empty.
    pub fn new(config: ElevatorConfig) -> Self {
        let initial = config.initial_floor.clamp(BOTTOM_FLOOR, TOP_FLOOR);
        Self {
            cabin: Mutex::new(Cabin::new(initial)),
            floors: core::array::from_fn(|i| FloorQueue::new(i as u8 + BOTTOM_FLOOR)),
            config,
        }
    }

    /// Timing configuration.
    pub fn config(&self) -> &ElevatorConfig {
        &self.config
    }

    fn cabin(&self) -> MutexGuard<'_, Cabin> {
        self.cabin.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue for `floor`; `floor` must already be validated.
    fn queue(&self, floor: u8) -> &FloorQueue {
        &self.floors[usize::from(floor - BOTTOM_FLOOR)]
    }

    /// Queue for `floor`, if it is served.
    pub fn floor_queue(&self, floor: u8) -> Option<&FloorQueue> {
        validate_floor(i32::from(floor)).map(|f| self.queue(f))
    }

    /// Run `f` with the cabin locked, for reads.
    pub fn with_cabin<R>(&self, f: impl FnOnce(&Cabin) -> R) -> R {
        f(&self.cabin())
    }

    /// Current cabin state.
    pub fn state(&self) -> CabinState {
        self.cabin().state()
    }

    /// Floor the cabin is at.
    pub fn current_floor(&self) -> u8 {
        self.cabin().current_floor()
    }

    // ========================================================================
    // Control operations
    // ========================================================================

    /// Put the elevator in service. Only allowed while offline.
    pub fn start(&self) -> Result<(), ElevatorError> {
        let mut cabin = self.cabin();
        if cabin.state() != CabinState::Offline {
            error!(state = %cabin.state(), "elevator cannot be started, it is not offline");
            return Err(ElevatorError::InvalidState(cabin.state()));
        }
        cabin.set_state(CabinState::Idle);
        info!(floor = cabin.current_floor(), "elevator started");
        Ok(())
    }

    /// First half of a stop: mark the cabin offline.
    ///
    /// Returns `false` if it already was. The lock is released on return, so
    /// the caller can then wait for the mover without holding it.
    pub fn begin_stop(&self) -> bool {
        let mut cabin = self.cabin();
        if cabin.state() == CabinState::Offline {
            return false;
        }
        cabin.set_state(CabinState::Offline);
        true
    }

    /// Second half of a stop: discard every occupant.
    ///
    /// Their requests are lost; the serviced count is unchanged.
    pub fn evict_all(&self) -> usize {
        let evicted = self.cabin().evict_all();
        if evicted > 0 {
            info!(evicted, "discarded occupants on stop");
        }
        evicted
    }

    /// Stop without a mover to wait for: mark offline and evict.
    ///
    /// Idempotent. [`Elevator::stop`](crate::Elevator::stop) uses the two
    /// halves around joining its mover instead.
    pub fn stop(&self) {
        if self.begin_stop() {
            self.evict_all();
            info!("elevator stopped");
        }
    }

    /// Queue a request given as raw integers, validating all of them.
    ///
    /// Category codes are `0` worker, `1` lawyer, `2` boss, `3` visitor.
    pub fn issue_request(
        &self,
        start_floor: i32,
        dest_floor: i32,
        category: i32,
    ) -> Result<(), ElevatorError> {
        let start = validate_floor(start_floor).ok_or(InvalidArgument::StartFloor(start_floor));
        let dest = validate_floor(dest_floor).ok_or(InvalidArgument::DestinationFloor(dest_floor));
        let checked = start
            .and_then(|start| dest.map(|dest| (start, dest)))
            .and_then(|(start, dest)| Category::from_code(category).map(|c| (start, dest, c)));

        match checked {
            Ok((start, dest, category)) => self.issue(start, dest, category),
            Err(arg) => {
                warn!(start_floor, dest_floor, category, reason = %arg, "rejected request");
                Err(arg.into())
            }
        }
    }

    /// Queue a passenger of `category` at `start`, bound for `dest`.
    ///
    /// If the cabin is idle, it is pointed at the request: up or down towards
    /// `start`, or straight to loading if it is already there.
    pub fn issue(&self, start: u8, dest: u8, category: Category) -> Result<(), ElevatorError> {
        let start = validate_floor(i32::from(start)).ok_or(InvalidArgument::StartFloor(start.into()))?;
        let dest = validate_floor(i32::from(dest))
            .ok_or(InvalidArgument::DestinationFloor(dest.into()))?;

        self.queue(start).enqueue(Passenger::new(category, dest))?;
        info!(start, dest, category = ?category, "request queued");

        let mut cabin = self.cabin();
        if cabin.state() == CabinState::Idle {
            let hint = match cabin.current_floor().cmp(&start) {
                core::cmp::Ordering::Less => CabinState::MovingUp,
                core::cmp::Ordering::Greater => CabinState::MovingDown,
                core::cmp::Ordering::Equal => CabinState::Loading,
            };
            cabin.set_state(hint);
            debug!(next = %hint, "idle cabin dispatched");
        }
        Ok(())
    }

    // ========================================================================
    // Scheduling policy
    // ========================================================================

    /// Whether the cabin must halt at `floor`: an occupant is bound there or
    /// someone is waiting there.
    pub fn should_stop(&self, floor: u8) -> bool {
        let Some(floor) = validate_floor(i32::from(floor)) else {
            return false;
        };
        if self.cabin().has_destination(floor) {
            return true;
        }
        self.queue(floor).has_waiting()
    }

    /// Pick the next state from the current occupants and waiting lists.
    ///
    /// Occupants come first, upward before downward; then waiting passengers
    /// strictly above, then strictly below; otherwise idle.
    ///
    /// This extends that five-step order with one rule checked first: a rider
    /// who boarded for the floor the cabin is on keeps it loading for one
    /// more cycle, so they are unloaded rather than carried.
    pub fn decide_direction(&self) -> CabinState {
        let (floor, here, up, down) = {
            let cabin = self.cabin();
            let floor = cabin.current_floor();
            (
                floor,
                cabin.has_destination(floor),
                cabin.has_destination_above(),
                cabin.has_destination_below(),
            )
        };

        if here {
            CabinState::Loading
        } else if up {
            CabinState::MovingUp
        } else if down {
            CabinState::MovingDown
        } else if self.waiting_between(floor.saturating_add(1), TOP_FLOOR) {
            CabinState::MovingUp
        } else if self.waiting_between(BOTTOM_FLOOR, floor.saturating_sub(1)) {
            CabinState::MovingDown
        } else {
            CabinState::Idle
        }
    }

    fn waiting_between(&self, low: u8, high: u8) -> bool {
        (low.max(BOTTOM_FLOOR)..=high.min(TOP_FLOOR)).any(|f| self.queue(f).has_waiting())
    }

    // ========================================================================
    // Mover steps
    // ========================================================================

    /// Unload occupants bound here, then board waiting passengers in FIFO
    /// order until the first one that would break a capacity bound.
    ///
    /// Does nothing unless the cabin is loading.
    pub fn run_loading_cycle(&self) -> LoadOutcome {
        let (floor, unloaded, count, load) = {
            let mut cabin = self.cabin();
            if cabin.state() != CabinState::Loading {
                return LoadOutcome::default();
            }
            let unloaded = cabin.unload_at_current_floor();
            (
                cabin.current_floor(),
                unloaded,
                cabin.occupant_count(),
                cabin.total_weight(),
            )
        };
        if unloaded > 0 {
            info!(floor, unloaded, "passengers unloaded");
        }

        // Only the mover adds occupants, so the capacity read above stays valid
        let mut planned_count = count;
        let mut planned_load: Weight = load;
        let candidates = self.queue(floor).dequeue_while(|p| {
            if !fits(planned_count, planned_load, p.weight()) {
                return false;
            }
            planned_count += 1;
            planned_load += p.weight();
            true
        });
        if candidates.is_empty() {
            return LoadOutcome {
                unloaded,
                boarded: 0,
            };
        }

        let mut boarded = 0;
        let mut turned_back = Vec::new();
        {
            let mut cabin = self.cabin();
            for passenger in candidates {
                if cabin.state() != CabinState::Loading {
                    turned_back.push(passenger);
                    continue;
                }
                match cabin.board(passenger) {
                    Ok(()) => boarded += 1,
                    Err(passenger) => turned_back.push(passenger),
                }
            }
        }
        if !turned_back.is_empty() {
            debug!(floor, count = turned_back.len(), "returned passengers to queue");
            self.queue(floor).restore_front(turned_back);
        }
        if boarded > 0 {
            info!(floor, boarded, "passengers boarded");
        }

        LoadOutcome { unloaded, boarded }
    }

    /// Leave the loading state in the direction the policy picks.
    ///
    /// Returns `None` if the cabin is no longer loading.
    pub fn finish_loading(&self) -> Option<CabinState> {
        let next = self.decide_direction();
        let mut cabin = self.cabin();
        if cabin.state() != CabinState::Loading {
            return None;
        }
        cabin.set_state(next);
        Some(next)
    }

    /// Move one floor in the current direction, switching to loading if the
    /// new floor needs a stop.
    ///
    /// Returns the floor arrived at, or `None` if the cabin was not moving.
    pub fn advance(&self) -> Option<(u8, bool)> {
        let arrived = {
            let mut cabin = self.cabin();
            let floor = cabin.current_floor();
            let next = match cabin.state() {
                CabinState::MovingUp if floor < TOP_FLOOR => floor + 1,
                CabinState::MovingDown if floor > BOTTOM_FLOOR => floor - 1,
                CabinState::MovingUp | CabinState::MovingDown => {
                    // At a bound; let the loading cycle re-derive a direction
                    cabin.set_state(CabinState::Loading);
                    return Some((floor, true));
                }
                _ => return None,
            };
            cabin.set_current_floor(next);
            next
        };
        debug!(floor = arrived, "cabin arrived");

        if !self.should_stop(arrived) {
            return Some((arrived, false));
        }
        let mut cabin = self.cabin();
        if !cabin.state().is_moving() {
            return Some((arrived, false));
        }
        cabin.set_state(CabinState::Loading);
        info!(floor = arrived, "stopping to load");
        Some((arrived, true))
    }

    /// Send an idle cabin towards passengers who queued without a hint, such
    /// as those who arrived while it was offline.
    fn dispatch_idle(&self) -> Option<CabinState> {
        let floor = self.current_floor();
        let next = if self.queue(floor).has_waiting() {
            CabinState::Loading
        } else {
            match self.decide_direction() {
                CabinState::Idle => return None,
                direction => direction,
            }
        };

        let mut cabin = self.cabin();
        if cabin.state() != CabinState::Idle || cabin.current_floor() != floor {
            return None;
        }
        cabin.set_state(next);
        debug!(floor, next = %next, "idle cabin dispatched to waiting passengers");
        Some(next)
    }

    /// Run one scheduling step, calling `pause` where the simulation waits.
    ///
    /// `pause` is never called with a lock held.
    pub fn step(&self, pause: impl FnOnce(Duration)) -> Step {
        match self.state() {
            CabinState::Loading => {
                let floor = self.current_floor();
                let LoadOutcome { unloaded, boarded } = self.run_loading_cycle();
                pause(self.config.loading_delay());
                match self.finish_loading() {
                    Some(next) => Step::Loaded {
                        floor,
                        unloaded,
                        boarded,
                        next,
                    },
                    None => Step::Interrupted,
                }
            }
            CabinState::MovingUp | CabinState::MovingDown => {
                pause(self.config.floor_travel());
                match self.advance() {
                    Some((floor, stopped)) => Step::Moved { floor, stopped },
                    None => Step::Interrupted,
                }
            }
            CabinState::Idle => {
                if let Some(next) = self.dispatch_idle() {
                    return Step::Dispatched(next);
                }
                pause(self.config.idle_poll());
                Step::Waited(CabinState::Idle)
            }
            CabinState::Offline => {
                pause(self.config.idle_poll());
                Step::Waited(CabinState::Offline)
            }
        }
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Passengers waiting across all floors.
    pub fn waiting_total(&self) -> usize {
        self.floors.iter().map(FloorQueue::waiting_count).sum()
    }

    /// Take a consistent snapshot of the cabin and every floor.
    pub fn status(&self) -> StatusReport {
        let (state, current_floor, total_weight, occupants, occupants_by_category, serviced_total) = {
            let cabin = self.cabin();
            (
                cabin.state(),
                cabin.current_floor(),
                cabin.total_weight(),
                cabin.occupants().collect::<Vec<_>>(),
                Category::ALL
                    .iter()
                    .map(|&category| CategoryCount {
                        category,
                        count: cabin.count_of(category),
                    })
                    .collect::<Vec<_>>(),
                cabin.serviced_count(),
            )
        };

        let floors: Vec<FloorStatus> = self
            .floors
            .iter()
            .map(|queue| FloorStatus {
                floor: queue.number(),
                waiting: queue.snapshot(),
            })
            .collect();
        let waiting_total = floors.iter().map(|f| f.waiting.len()).sum();

        StatusReport {
            state,
            current_floor,
            total_weight,
            occupants,
            occupants_by_category,
            floors,
            waiting_total,
            serviced_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> Building {
        let building = Building::default();
        building.start().unwrap();
        building
    }

    // ========================================================================
    // Start / Stop
    // ========================================================================

    #[test]
    fn start_twice_fails_with_invalid_state() {
        let building = Building::default();
        assert!(building.start().is_ok());
        assert_eq!(
            building.start(),
            Err(ElevatorError::InvalidState(CabinState::Idle))
        );
    }

    #[test]
    fn stop_is_idempotent() {
        let building = running();
        building.stop();
        building.stop();
        assert_eq!(building.state(), CabinState::Offline);
        assert!(!building.begin_stop());
    }

    // ========================================================================
    // Requests
    // ========================================================================

    #[test]
    fn request_validation() {
        let building = Building::default();
        assert_eq!(
            building.issue_request(0, 3, 0),
            Err(InvalidArgument::StartFloor(0).into())
        );
        assert_eq!(
            building.issue_request(2, 6, 0),
            Err(InvalidArgument::DestinationFloor(6).into())
        );
        assert_eq!(
            building.issue_request(2, 3, 7),
            Err(InvalidArgument::Category(7).into())
        );
        assert_eq!(building.waiting_total(), 0);
    }

    #[test]
    fn request_while_offline_only_queues() {
        let building = Building::default();
        building.issue_request(3, 1, 2).unwrap();
        assert_eq!(building.state(), CabinState::Offline);
        assert_eq!(building.floor_queue(3).map(FloorQueue::waiting_count), Some(1));
    }

    #[test]
    fn idle_hint_points_at_request() {
        let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
        building.start().unwrap();
        building.issue(5, 1, Category::Visitor).unwrap();
        assert_eq!(building.state(), CabinState::MovingUp);

        let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
        building.start().unwrap();
        building.issue(2, 4, Category::Visitor).unwrap();
        assert_eq!(building.state(), CabinState::MovingDown);

        let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
        building.start().unwrap();
        building.issue(3, 4, Category::Visitor).unwrap();
        assert_eq!(building.state(), CabinState::Loading);
    }

    #[test]
    fn hint_does_not_override_busy_cabin() {
        let building = running();
        building.issue(1, 2, Category::Worker).unwrap();
        assert_eq!(building.state(), CabinState::Loading);
        building.issue(4, 2, Category::Worker).unwrap();
        assert_eq!(building.state(), CabinState::Loading);
    }

    // ========================================================================
    // Policy
    // ========================================================================

    #[test]
    fn should_stop_for_waiting_or_destination() {
        let building = running();
        assert!(!building.should_stop(3));

        building.issue(3, 1, Category::Boss).unwrap();
        assert!(building.should_stop(3));
        assert!(!building.should_stop(1));
        assert!(!building.should_stop(0));
    }

    #[test]
    fn decision_prefers_waiting_above() {
        let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
        building.issue(1, 2, Category::Worker).unwrap();
        building.issue(5, 2, Category::Worker).unwrap();
        assert_eq!(building.decide_direction(), CabinState::MovingUp);
    }

    #[test]
    fn decision_ignores_current_floor_queue() {
        let building = Building::new(ElevatorConfig::default().with_initial_floor(3));
        building.issue(3, 2, Category::Worker).unwrap();
        assert_eq!(building.decide_direction(), CabinState::Idle);

        building.issue(1, 2, Category::Worker).unwrap();
        assert_eq!(building.decide_direction(), CabinState::MovingDown);
    }

    #[test]
    fn decision_keeps_loading_for_rider_bound_here() {
        let building = running();
        building.issue(1, 1, Category::Boss).unwrap();
        building.run_loading_cycle();
        assert_eq!(building.decide_direction(), CabinState::Loading);

        assert_eq!(building.run_loading_cycle().unloaded, 1);
        assert_eq!(building.decide_direction(), CabinState::Idle);
    }

    // ========================================================================
    // Steps
    // ========================================================================

    #[test]
    fn step_pauses_with_configured_delays() {
        let config = ElevatorConfig::default()
            .with_loading_delay_ms(30)
            .with_floor_travel_ms(20)
            .with_idle_poll_ms(10);
        let building = Building::new(config);

        let mut paused = Vec::new();
        building.step(|d| paused.push(d));
        building.start().unwrap();
        building.issue(2, 1, Category::Worker).unwrap();
        building.step(|d| paused.push(d));
        building.step(|d| paused.push(d));

        assert_eq!(
            paused,
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(30)
            ]
        );
    }

    #[test]
    fn step_after_stop_is_interrupted() {
        let building = running();
        building.issue(1, 3, Category::Worker).unwrap();

        let step = building.step(|_| building.stop());

        assert_eq!(step, Step::Interrupted);
        assert_eq!(building.state(), CabinState::Offline);
    }

    #[test]
    fn loading_cycle_skipped_when_not_loading() {
        let building = running();
        building.issue(3, 1, Category::Worker).unwrap();
        assert_eq!(building.run_loading_cycle(), LoadOutcome::default());
        assert_eq!(building.waiting_total(), 1);
    }
}
