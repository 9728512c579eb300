//! Consistent status snapshots and their text rendering.
//!
//! A [`StatusReport`] is taken by [`Building::status`](crate::Building::status):
//! all cabin fields under one acquisition of the cabin lock, then each floor
//! under its own lock, released before the next.

use core::fmt;

use crate::cabin::CabinState;
use crate::passenger::{Category, PassengerSummary, Weight};

/// Waiting list of one floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorStatus {
    /// Floor number.
    pub floor: u8,
    /// Waiting passengers in queue order.
    pub waiting: Vec<PassengerSummary>,
}

/// Occupants of one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCount {
    /// Passenger category.
    pub category: Category,
    /// Number riding.
    pub count: usize,
}

/// Read-only snapshot of the whole simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReport {
    /// Cabin motion state.
    pub state: CabinState,
    /// Floor the cabin is at.
    pub current_floor: u8,
    /// Sum of occupant weights.
    pub total_weight: Weight,
    /// Occupants in load order.
    pub occupants: Vec<PassengerSummary>,
    /// Occupants broken down by category.
    pub occupants_by_category: Vec<CategoryCount>,
    /// Waiting lists, lowest floor first.
    pub floors: Vec<FloorStatus>,
    /// Passengers waiting across all floors.
    pub waiting_total: usize,
    /// Passengers delivered since construction.
    pub serviced_total: u64,
}

impl StatusReport {
    /// Number of occupants.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Waiting list for `floor`, if it exists.
    pub fn floor(&self, floor: u8) -> Option<&FloorStatus> {
        self.floors.iter().find(|f| f.floor == floor)
    }
}

fn write_passengers(f: &mut fmt::Formatter<'_>, passengers: &[PassengerSummary]) -> fmt::Result {
    for p in passengers {
        write!(f, " {p}")?;
    }
    Ok(())
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Elevator state: {}", self.state)?;
        writeln!(f, "Current floor: {}", self.current_floor)?;
        writeln!(f, "Current load: {} lbs", self.total_weight)?;
        write!(f, "Elevator status:")?;
        write_passengers(f, &self.occupants)?;
        writeln!(f)?;

        for floor in self.floors.iter().rev() {
            let marker = if floor.floor == self.current_floor {
                '*'
            } else {
                ' '
            };
            write!(
                f,
                "[{marker}] Floor {}: {}",
                floor.floor,
                floor.waiting.len()
            )?;
            write_passengers(f, &floor.waiting)?;
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Number of passengers: {}", self.occupant_count())?;
        writeln!(f, "Number of passengers waiting: {}", self.waiting_total)?;
        writeln!(f, "Number of passengers serviced: {}", self.serviced_total)
    }
}
