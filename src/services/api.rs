//! Response types for the HTTP service.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::cabin::CabinState;
use crate::error::ElevatorError;

pub use crate::messages::IssueRequestBody;

// ============================================================================
// Response Types
// ============================================================================

/// API response wrapper for consistent JSON structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (present when success=true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present when success=false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Cabin state after a start or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleResponse {
    /// State observed once the operation finished
    pub state: CabinState,
}

/// A request the elevator accepted and queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedResponse {
    /// The request as received
    pub request: IssueRequestBody,
    /// Errno-style status code (always 0 here)
    pub status: i32,
}

// ============================================================================
// Error Mapping
// ============================================================================

/// HTTP status for an elevator error.
///
/// Bad arguments are the caller's fault (400); a start while already in
/// service is a conflict (409); allocation failure is ours (500).
pub fn error_status(error: &ElevatorError) -> StatusCode {
    match error {
        ElevatorError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ElevatorError::InvalidState(_) => StatusCode::CONFLICT,
        ElevatorError::OutOfMemory => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
