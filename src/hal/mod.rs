//! Concrete implementations of the traits in [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `thread`: [`ThreadDelay`], real sleeps for running the simulation
//! - `mock`: test doubles ([`MockDelay`], [`MockControl`])

pub mod mock;
pub mod thread;

pub use mock::*;
pub use thread::*;
