//! Cabin aggregate: motion state, position, and occupants.
//!
//! [`Cabin`] is plain data. All of its fields live behind a single lock inside
//! [`Building`](crate::Building), so every read of a snapshot and every
//! mutation sees them consistently.
//!
//! The occupant list is a fixed-capacity `heapless::Vec`, so the passenger
//! count bound is enforced by the type itself; the weight bound is checked in
//! [`Cabin::board`].

use core::fmt;

use heapless::Vec as BoundedVec;

use crate::passenger::{Category, Passenger, PassengerSummary, Weight};

/// Maximum number of occupants.
pub const MAX_PASSENGERS: usize = 5;

/// Maximum total occupant weight.
pub const MAX_WEIGHT: Weight = Weight::from_units(7);

/// Motion state of the cabin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CabinState {
    /// Not in service. The cabin is empty and the mover does nothing.
    #[default]
    Offline,
    /// In service with nothing to do.
    Idle,
    /// Stopped at a floor, unloading then loading.
    Loading,
    /// Travelling towards higher floors.
    MovingUp,
    /// Travelling towards lower floors.
    MovingDown,
}

impl CabinState {
    /// Name used in the status report.
    ///
    /// ```
    /// use rs_elevator::CabinState;
    ///
    /// assert_eq!(CabinState::MovingUp.as_str(), "UP");
    /// assert_eq!(CabinState::Offline.as_str(), "OFFLINE");
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            CabinState::Offline => "OFFLINE",
            CabinState::Idle => "IDLE",
            CabinState::Loading => "LOADING",
            CabinState::MovingUp => "UP",
            CabinState::MovingDown => "DOWN",
        }
    }

    /// Whether the cabin is travelling between floors.
    pub const fn is_moving(&self) -> bool {
        matches!(self, CabinState::MovingUp | CabinState::MovingDown)
    }
}

impl fmt::Display for CabinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single elevator carriage.
#[derive(Debug)]
pub struct Cabin {
    state: CabinState,
    current_floor: u8,
    occupants: BoundedVec<Passenger, MAX_PASSENGERS>,
    total_weight: Weight,
    serviced_count: u64,
    category_counts: [usize; 4],
}

impl Cabin {
    /// Create an offline, empty cabin parked at `floor`.
    pub fn new(floor: u8) -> Self {
        Self {
            state: CabinState::Offline,
            current_floor: floor,
            occupants: BoundedVec::new(),
            total_weight: Weight::ZERO,
            serviced_count: 0,
            category_counts: [0; 4],
        }
    }

    /// Current motion state.
    pub fn state(&self) -> CabinState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CabinState) {
        self.state = state;
    }

    /// Floor the cabin is at.
    pub fn current_floor(&self) -> u8 {
        self.current_floor
    }

    pub(crate) fn set_current_floor(&mut self, floor: u8) {
        self.current_floor = floor;
    }

    /// Number of occupants.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Sum of occupant weights.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Passengers delivered since construction.
    pub fn serviced_count(&self) -> u64 {
        self.serviced_count
    }

    /// Occupants currently riding in `category`.
    pub fn count_of(&self, category: Category) -> usize {
        self.category_counts[category.index()]
    }

    /// Occupants in load order.
    pub fn occupants(&self) -> impl Iterator<Item = PassengerSummary> + '_ {
        self.occupants.iter().map(Passenger::summary)
    }

    /// Whether any occupant is bound for `floor`.
    pub fn has_destination(&self, floor: u8) -> bool {
        self.occupants.iter().any(|p| p.destination() == floor)
    }

    /// Whether any occupant is bound above the current floor.
    pub fn has_destination_above(&self) -> bool {
        self.occupants
            .iter()
            .any(|p| p.destination() > self.current_floor)
    }

    /// Whether any occupant is bound below the current floor.
    pub fn has_destination_below(&self) -> bool {
        self.occupants
            .iter()
            .any(|p| p.destination() < self.current_floor)
    }

    /// Whether `passenger` could board without breaking a capacity bound.
    pub fn can_admit(&self, passenger: &Passenger) -> bool {
        fits(self.occupants.len(), self.total_weight, passenger.weight())
    }

    /// Board a passenger, handing it back if either bound would be exceeded.
    pub fn board(&mut self, passenger: Passenger) -> Result<(), Passenger> {
        if !self.can_admit(&passenger) {
            return Err(passenger);
        }
        let weight = passenger.weight();
        let category = passenger.category();
        self.occupants.push(passenger)?;
        self.total_weight += weight;
        self.category_counts[category.index()] += 1;
        Ok(())
    }

    /// Remove every occupant bound for the current floor.
    ///
    /// Each removal counts as one serviced passenger. Returns how many left.
    pub fn unload_at_current_floor(&mut self) -> usize {
        let floor = self.current_floor;
        let mut unloaded = 0;
        let mut i = 0;
        while i < self.occupants.len() {
            if self.occupants[i].destination() == floor {
                let passenger = self.occupants.remove(i);
                self.release(&passenger);
                self.serviced_count += 1;
                unloaded += 1;
            } else {
                i += 1;
            }
        }
        unloaded
    }

    /// Discard all occupants without servicing them. Returns how many.
    pub fn evict_all(&mut self) -> usize {
        let evicted = self.occupants.len();
        self.occupants.clear();
        self.total_weight = Weight::ZERO;
        self.category_counts = [0; 4];
        evicted
    }

    fn release(&mut self, passenger: &Passenger) {
        self.total_weight -= passenger.weight();
        let count = &mut self.category_counts[passenger.category().index()];
        *count = count.saturating_sub(1);
    }
}

/// Capacity check shared by boarding and load planning.
pub(crate) fn fits(count: usize, load: Weight, candidate: Weight) -> bool {
    count < MAX_PASSENGERS
        && load
            .checked_add(candidate)
            .is_some_and(|total| total <= MAX_WEIGHT)
}
