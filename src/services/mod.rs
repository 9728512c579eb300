//! HTTP service for driving the elevator over the network.
//!
//! - `api`: JSON envelope and response bodies
//! - `web`: axum router and server runner
//!
//! Every handler talks to the elevator through
//! [`ElevatorControl`](crate::ElevatorControl), shared as an `Arc` so the
//! HTTP service and any other request source see the same building:
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_elevator::services::{build_router, WebServerConfig};
//!
//! let elevator = Arc::new(Elevator::new(config.elevator.clone()));
//! elevator.start()?;
//! let router = build_router(Arc::clone(&elevator), &WebServerConfig::from_config(&config.web));
//! ```

pub mod api;
pub mod web;

pub use api::*;
pub use web::*;
