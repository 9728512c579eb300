//! Passenger records, categories, and exact fixed-point weights.
//!
//! Weights are fractional (a lawyer weighs 1.5 units, a visitor 0.5), so they
//! are stored as an integer count of half units. Sums and comparisons are
//! exact; nothing is ever truncated.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::{Category, Passenger, Weight};
//!
//! let p = Passenger::new(Category::Lawyer, 3);
//! assert_eq!(p.weight(), Weight::from_half_units(3));
//! assert_eq!(p.weight().to_string(), "1.5");
//! ```

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::InvalidArgument;

// ============================================================================
// Weight
// ============================================================================

/// Exact passenger weight, counted in half units.
///
/// Serializes as its real value (`1.5`), not the half-unit count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(u16);

impl Weight {
    /// No weight.
    pub const ZERO: Weight = Weight(0);

    /// Create a weight from a count of half units.
    pub const fn from_half_units(halves: u16) -> Self {
        Weight(halves)
    }

    /// Create a weight from a whole number of units.
    pub const fn from_units(units: u16) -> Self {
        Weight(units * 2)
    }

    /// Number of half units.
    pub const fn half_units(self) -> u16 {
        self.0
    }

    /// Weight as a float, for display and JSON.
    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 2.0
    }

    /// Add, returning `None` on overflow.
    pub const fn checked_add(self, other: Weight) -> Option<Weight> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Weight(sum)),
            None => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Weight {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.as_f32())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Weight {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = f64::deserialize(deserializer)?;
        let halves = value * 2.0;
        if !halves.is_finite()
            || halves < 0.0
            || halves > f64::from(u16::MAX)
            || halves.fract() != 0.0
        {
            return Err(D::Error::custom(format!(
                "weight {value} is not a non-negative multiple of 0.5"
            )));
        }
        Ok(Weight(halves as u16))
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0 + rhs.0)
    }
}

impl AddAssign for Weight {
    fn add_assign(&mut self, rhs: Weight) {
        self.0 += rhs.0;
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Weight {
    fn sub_assign(&mut self, rhs: Weight) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl core::iter::Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        iter.fold(Weight::ZERO, Add::add)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 2;
        if self.0 % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

// ============================================================================
// Category
// ============================================================================

/// Passenger category, fixing the passenger's weight.
///
/// Integer codes match the request entry point:
/// `0` worker, `1` lawyer, `2` boss, `3` visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Part-time worker, weight 1.
    Worker = 0,
    /// Lawyer, weight 1.5.
    Lawyer = 1,
    /// Boss, weight 2.
    Boss = 2,
    /// Visitor, weight 0.5.
    Visitor = 3,
}

impl Category {
    /// Every category, in code order.
    pub const ALL: [Category; 4] = [
        Category::Worker,
        Category::Lawyer,
        Category::Boss,
        Category::Visitor,
    ];

    /// Decode an integer category code.
    ///
    /// ```
    /// use rs_elevator::Category;
    ///
    /// assert_eq!(Category::from_code(2), Ok(Category::Boss));
    /// assert!(Category::from_code(4).is_err());
    /// ```
    pub fn from_code(code: i32) -> Result<Self, InvalidArgument> {
        match code {
            0 => Ok(Category::Worker),
            1 => Ok(Category::Lawyer),
            2 => Ok(Category::Boss),
            3 => Ok(Category::Visitor),
            other => Err(InvalidArgument::Category(other)),
        }
    }

    /// Integer code of this category.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Fixed weight for this category.
    pub const fn weight(self) -> Weight {
        match self {
            Category::Worker => Weight::from_half_units(2),
            Category::Lawyer => Weight::from_half_units(3),
            Category::Boss => Weight::from_half_units(4),
            Category::Visitor => Weight::from_half_units(1),
        }
    }

    /// One-letter symbol used in the status report.
    pub const fn symbol(self) -> char {
        match self {
            Category::Worker => 'P',
            Category::Lawyer => 'L',
            Category::Boss => 'B',
            Category::Visitor => 'V',
        }
    }

    /// Position in [`Category::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Passenger
// ============================================================================

/// A validated passenger request.
///
/// Owned by exactly one container at a time: a floor queue while waiting,
/// the cabin while riding. Not `Clone`, so it can only move.
#[derive(Debug, PartialEq, Eq)]
pub struct Passenger {
    category: Category,
    destination: u8,
}

impl Passenger {
    /// Create a passenger bound for `destination`.
    ///
    /// The destination is expected to be validated by the caller.
    pub const fn new(category: Category, destination: u8) -> Self {
        Self {
            category,
            destination,
        }
    }

    /// Passenger category.
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Destination floor.
    pub const fn destination(&self) -> u8 {
        self.destination
    }

    /// Fixed weight of this passenger.
    pub const fn weight(&self) -> Weight {
        self.category.weight()
    }

    /// Plain copy of the visible fields, for reports.
    pub const fn summary(&self) -> PassengerSummary {
        PassengerSummary {
            category: self.category,
            destination: self.destination,
        }
    }
}

/// Read-only view of a passenger, as it appears in a status report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerSummary {
    /// Passenger category.
    pub category: Category,
    /// Destination floor.
    pub destination: u8,
}

impl fmt::Display for PassengerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.symbol(), self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Weight Tests
    // =========================================================================

    #[test]
    fn category_weights_are_exact() {
        assert_eq!(Category::Worker.weight(), Weight::from_units(1));
        assert_eq!(Category::Lawyer.weight().as_f32(), 1.5);
        assert_eq!(Category::Boss.weight(), Weight::from_units(2));
        assert_eq!(Category::Visitor.weight().as_f32(), 0.5);
    }

    #[test]
    fn fractional_weights_sum_without_truncation() {
        let total: Weight = [Category::Lawyer, Category::Visitor, Category::Lawyer]
            .iter()
            .map(|c| c.weight())
            .sum();
        assert_eq!(total, Weight::from_half_units(7));
        assert_eq!(total.to_string(), "3.5");
    }

    #[test]
    fn weight_display() {
        assert_eq!(Weight::ZERO.to_string(), "0");
        assert_eq!(Weight::from_units(7).to_string(), "7");
        assert_eq!(Weight::from_half_units(11).to_string(), "5.5");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn weight_serializes_as_real_value() {
        assert_eq!(serde_json::to_string(&Weight::from_units(1)).unwrap(), "1.0");
        assert_eq!(
            serde_json::to_string(&Weight::from_half_units(11)).unwrap(),
            "5.5"
        );
        assert_eq!(
            serde_json::from_str::<Weight>("1.5").unwrap(),
            Weight::from_half_units(3)
        );
        assert_eq!(serde_json::from_str::<Weight>("2").unwrap(), Weight::from_units(2));
        assert!(serde_json::from_str::<Weight>("0.3").is_err());
        assert!(serde_json::from_str::<Weight>("-1").is_err());
    }

    #[test]
    fn weight_subtraction_saturates() {
        let mut w = Weight::from_half_units(1);
        w -= Weight::from_units(1);
        assert_eq!(w, Weight::ZERO);
    }

    // =========================================================================
    // Category Tests
    // =========================================================================

    #[test]
    fn category_codes_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_code(category.code()), Ok(category));
        }
    }

    #[test]
    fn category_rejects_unknown_codes() {
        assert_eq!(Category::from_code(-1), Err(InvalidArgument::Category(-1)));
        assert_eq!(Category::from_code(4), Err(InvalidArgument::Category(4)));
    }

    #[test]
    fn category_symbols() {
        let symbols: String = Category::ALL.iter().map(|c| c.symbol()).collect();
        assert_eq!(symbols, "PLBV");
    }

    // =========================================================================
    // Passenger Tests
    // =========================================================================

    #[test]
    fn passenger_summary_display() {
        let p = Passenger::new(Category::Boss, 4);
        assert_eq!(p.summary().to_string(), "B4");
        assert_eq!(p.weight(), Weight::from_units(2));
    }
}
