//! Configuration for the simulation and the HTTP gateway.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::config::{Config, ElevatorConfig, WebConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.elevator.loading_delay_ms, 2000);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_elevator(ElevatorConfig::default().with_floor_travel_ms(500))
//!     .with_web(WebConfig::default().with_port(3000));
//! ```

use std::time::Duration;

use crate::floor::{BOTTOM_FLOOR, TOP_FLOOR};

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Simulation timing and placement
    pub elevator: ElevatorConfig,
    /// Web server configuration
    pub web: WebConfig,
}

impl Config {
    /// Set elevator configuration
    pub fn with_elevator(mut self, elevator: ElevatorConfig) -> Self {
        self.elevator = elevator;
        self
    }

    /// Set web configuration
    pub fn with_web(mut self, web: WebConfig) -> Self {
        self.web = web;
        self
    }
}

// ============================================================================
// Elevator Config
// ============================================================================

/// Simulation delays and the cabin's starting floor
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorConfig {
    /// Time spent at a floor for one unload/load cycle
    pub loading_delay_ms: u64,
    /// Time to travel between adjacent floors
    pub floor_travel_ms: u64,
    /// Poll interval while idle or offline
    pub idle_poll_ms: u64,
    /// Floor the cabin is parked at when constructed
    pub initial_floor: u8,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            loading_delay_ms: 2000,
            floor_travel_ms: 2000,
            idle_poll_ms: 100,
            initial_floor: BOTTOM_FLOOR,
        }
    }
}

impl ElevatorConfig {
    /// Set the loading delay
    pub fn with_loading_delay_ms(mut self, ms: u64) -> Self {
        self.loading_delay_ms = ms;
        self
    }

    /// Set the inter-floor travel delay
    pub fn with_floor_travel_ms(mut self, ms: u64) -> Self {
        self.floor_travel_ms = ms;
        self
    }

    /// Set the idle poll interval
    pub fn with_idle_poll_ms(mut self, ms: u64) -> Self {
        self.idle_poll_ms = ms;
        self
    }

    /// Set the starting floor, clamped into the served range
    pub fn with_initial_floor(mut self, floor: u8) -> Self {
        self.initial_floor = floor.clamp(BOTTOM_FLOOR, TOP_FLOOR);
        self
    }

    /// All delays set to `ms`; handy for fast simulations
    pub fn with_uniform_delay_ms(self, ms: u64) -> Self {
        self.with_loading_delay_ms(ms)
            .with_floor_travel_ms(ms)
            .with_idle_poll_ms(ms)
    }

    /// Loading delay as a `Duration`
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    /// Travel delay as a `Duration`
    pub fn floor_travel(&self) -> Duration {
        Duration::from_millis(self.floor_travel_ms)
    }

    /// Idle poll interval as a `Duration`
    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}

// ============================================================================
// Web Config
// ============================================================================

/// Web server configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WebConfig {
    /// Port to listen on
    pub port: u16,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
    /// Whether web server is enabled
    pub enabled: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_permissive: true,
            enabled: true,
        }
    }
}

impl WebConfig {
    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS mode
    pub fn with_cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Enable or disable web server
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
