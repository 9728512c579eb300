//! Per-floor waiting queues.
//!
//! Each [`FloorQueue`] carries its own lock. Request producers append under
//! it; the mover's load step pops from the front under it. Neither ever holds
//! a floor lock while acquiring the cabin lock or another floor's lock.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::ElevatorError;
use crate::passenger::{Passenger, PassengerSummary};

/// Number of floors served.
pub const NUM_FLOORS: u8 = 5;

/// Lowest floor number.
pub const BOTTOM_FLOOR: u8 = 1;

/// Highest floor number.
pub const TOP_FLOOR: u8 = NUM_FLOORS;

/// Check that `floor` lies in `[1, N]`, returning it narrowed.
///
/// ```
/// use rs_elevator::floor::validate_floor;
///
/// assert_eq!(validate_floor(3), Some(3));
/// assert_eq!(validate_floor(0), None);
/// assert_eq!(validate_floor(6), None);
/// ```
pub fn validate_floor(floor: i32) -> Option<u8> {
    u8::try_from(floor)
        .ok()
        .filter(|f| (BOTTOM_FLOOR..=TOP_FLOOR).contains(f))
}

/// FIFO of passengers waiting at one floor.
#[derive(Debug)]
pub struct FloorQueue {
    number: u8,
    waiting: Mutex<VecDeque<Passenger>>,
}

impl FloorQueue {
    /// Create an empty queue for floor `number`.
    pub fn new(number: u8) -> Self {
        Self {
            number,
            waiting: Mutex::new(VecDeque::new()),
        }
    }

    /// Floor number this queue belongs to.
    pub fn number(&self) -> u8 {
        self.number
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Passenger>> {
        self.waiting.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a passenger at the back of the queue.
    ///
    /// Storage is reserved before the push, so an allocation failure leaves
    /// the queue untouched and reports [`ElevatorError::OutOfMemory`].
    pub fn enqueue(&self, passenger: Passenger) -> Result<(), ElevatorError> {
        self.enqueue_reserving(passenger, 1)
    }

    fn enqueue_reserving(&self, passenger: Passenger, additional: usize) -> Result<(), ElevatorError> {
        let mut waiting = self.lock();
        waiting.try_reserve(additional)?;
        waiting.push_back(passenger);
        Ok(())
    }

    /// Pop passengers from the front while `admit` accepts them.
    ///
    /// Stops at the first rejected passenger, who stays first in line.
    pub fn dequeue_while<F>(&self, mut admit: F) -> Vec<Passenger>
    where
        F: FnMut(&Passenger) -> bool,
    {
        let mut waiting = self.lock();
        let mut taken = Vec::new();
        while let Some(front) = waiting.front() {
            if !admit(front) {
                break;
            }
            if let Some(passenger) = waiting.pop_front() {
                taken.push(passenger);
            }
        }
        taken
    }

    /// Put passengers back at the front, keeping their order.
    pub fn restore_front(&self, passengers: Vec<Passenger>) {
        let mut waiting = self.lock();
        for passenger in passengers.into_iter().rev() {
            waiting.push_front(passenger);
        }
    }

    /// Number of passengers waiting.
    pub fn waiting_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether anyone is waiting here.
    pub fn has_waiting(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Waiting passengers in queue order.
    pub fn snapshot(&self) -> Vec<PassengerSummary> {
        self.lock().iter().map(Passenger::summary).collect()
    }
}
