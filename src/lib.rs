//! # rs-elevator
//!
//! A concurrent simulation of a single elevator serving a five-floor building.
//!
//! ## Features
//!
//! - **Explicit simulation state**: one cabin lock plus an independent lock
//!   per floor queue, never nested
//! - **Background mover**: a single named thread drives loading, direction
//!   decisions and floor-by-floor travel
//! - **Capacity limits**: at most 5 riders and 7 weight units, with
//!   first-in-line boarding per floor
//! - **Lifecycle**: start, stop (joins the mover, then evicts riders), restart
//! - **Entry points**: typed API, integer status-code gateway, and an optional
//!   HTTP service (`web` feature)
//!
//! ## Architecture
//!
//! - `passenger`, `floor`, `cabin` - the data model
//! - `building` - shared state and every operation on it
//! - `mover` / `elevator` - the background task and its lifecycle
//! - `report` - status snapshots and their text rendering
//! - `gateway` - integer-coded entry points
//! - `traits` / `hal` - seams for pausing and control, with real and mock
//!   implementations
//!
//! ## Example
//!
//! ```rust
//! use rs_elevator::{Building, CabinState, Category, Step};
//!
//! let building = Building::default();
//! building.start().unwrap();
//! building.issue(1, 3, Category::Worker).unwrap();
//! assert_eq!(building.state(), CabinState::Loading);
//!
//! // Drive the simulation by hand without sleeping
//! loop {
//!     if let Step::Waited(CabinState::Idle) = building.step(|_| {}) {
//!         break;
//!     }
//! }
//! assert_eq!(building.current_floor(), 3);
//! assert_eq!(building.status().serviced_total, 1);
//! ```

#![warn(missing_docs)]

/// Shared simulation state and the operations on it.
pub mod building;
/// Cabin state machine and occupant bookkeeping.
pub mod cabin;
/// Configuration for timings and the HTTP service.
pub mod config;
/// Lifecycle handle owning the mover thread.
pub mod elevator;
/// Error kinds and status codes.
pub mod error;
/// Floor numbering and per-floor waiting queues.
pub mod floor;
/// Integer-coded entry points.
pub mod gateway;
/// Concrete pause sources and test doubles.
pub mod hal;
/// The background mover task.
pub mod mover;
/// Passenger categories and weights.
pub mod passenger;
/// Status snapshots.
pub mod report;
/// Traits at the seams between components.
pub mod traits;

/// JSON request bodies (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

/// HTTP service (feature-gated).
#[cfg(feature = "web")]
pub mod services;

// Re-exports for convenience
pub use building::{Building, LoadOutcome, Step};
pub use cabin::{Cabin, CabinState, MAX_PASSENGERS, MAX_WEIGHT};
pub use config::{Config, ElevatorConfig, WebConfig};
pub use elevator::Elevator;
pub use error::{status_code, ElevatorError, InvalidArgument};
pub use floor::{FloorQueue, NUM_FLOORS};
pub use gateway::RequestGateway;
pub use mover::{MoverHandle, MoverLoop, MoverStats};
pub use passenger::{Category, Passenger, PassengerSummary, Weight};
pub use report::{CategoryCount, FloorStatus, StatusReport};
pub use traits::{Delay, ElevatorControl};

#[cfg(feature = "serde")]
pub use messages::IssueRequestBody;
