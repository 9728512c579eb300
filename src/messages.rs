//! JSON request bodies for the HTTP service.
//!
//! # Example
//!
//! ```
//! use rs_elevator::messages::IssueRequestBody;
//!
//! let json = r#"{"start_floor": 1, "dest_floor": 4, "category": 2}"#;
//! let body: IssueRequestBody = serde_json::from_str(json).unwrap();
//! assert_eq!(body.dest_floor, 4);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// Request to queue a passenger.
///
/// Values are range-checked by the elevator, not by deserialization, so an
/// out-of-range floor or category reaches the same validation as every other
/// entry point.
///
/// # JSON Example
///
/// ```json
/// {"start_floor": 2, "dest_floor": 5, "category": 0}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequestBody {
    /// Floor the passenger waits on (1..=5)
    pub start_floor: i32,
    /// Floor the passenger wants (1..=5)
    pub dest_floor: i32,
    /// Category code: 0 worker, 1 lawyer, 2 boss, 3 visitor
    pub category: i32,
}

impl IssueRequestBody {
    /// Create a request body.
    pub const fn new(start_floor: i32, dest_floor: i32, category: i32) -> Self {
        Self {
            start_floor,
            dest_floor,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_body() {
        let json = r#"{"start_floor": 3, "dest_floor": 1, "category": 3}"#;
        let body: IssueRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body, IssueRequestBody::new(3, 1, 3));
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"start_floor": 3, "category": 3}"#;
        assert!(serde_json::from_str::<IssueRequestBody>(json).is_err());
    }

    #[test]
    fn out_of_range_values_still_parse() {
        let json = r#"{"start_floor": 9, "dest_floor": -1, "category": 7}"#;
        let body: IssueRequestBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.start_floor, 9);
    }
}
