//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the attendance, leave,
//! and payroll endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{LeaveKind, LeaveStatus, PayrollMonth};

/// Request body for the `/attendance/check-in` and `/attendance/check-out`
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The member checking in or out.
    pub member_id: String,
    /// The timestamp of the action. Defaults to the current UTC time.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Request body for the `POST /leaves` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSubmitRequest {
    /// The member requesting leave.
    pub member_id: String,
    /// The category of leave.
    pub kind: LeaveKind,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for the `PUT /leaves/{id}` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecisionRequest {
    /// The decided status: `approved` or `rejected` (`pending` is rejected
    /// by the handler).
    pub status: LeaveStatus,
    /// The member making the decision.
    #[serde(default)]
    pub approved_by: Option<String>,
}

/// Request body for the `POST /payroll/generate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// The target month, as `YYYY-MM`.
    pub month: PayrollMonth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_request_timestamp_defaults_to_none() {
        let json = r#"{"member_id": "mem_001"}"#;
        let request: CheckRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.member_id, "mem_001");
        assert!(request.at.is_none());
    }

    #[test]
    fn test_check_request_with_explicit_timestamp() {
        let json = r#"{"member_id": "mem_001", "at": "2024-03-11T08:58:00"}"#;
        let request: CheckRequest = serde_json::from_str(json).unwrap();
        assert!(request.at.is_some());
    }

    #[test]
    fn test_leave_submit_request_deserializes() {
        let json = r#"{
            "member_id": "mem_001",
            "kind": "annual",
            "start_date": "2024-03-10",
            "end_date": "2024-03-12",
            "reason": "family trip"
        }"#;
        let request: LeaveSubmitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, LeaveKind::Annual);
        assert_eq!(request.reason.as_deref(), Some("family trip"));
    }

    #[test]
    fn test_generate_request_parses_month_key() {
        let json = r#"{"month": "2024-03"}"#;
        let request: GeneratePayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.month, PayrollMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn test_generate_request_rejects_bad_month_key() {
        let json = r#"{"month": "2024-3-1"}"#;
        assert!(serde_json::from_str::<GeneratePayrollRequest>(json).is_err());
    }
}
