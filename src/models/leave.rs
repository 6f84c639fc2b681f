//! Leave request model and related types.
//!
//! Leave requests are owned by the leave store. The engine only consumes the
//! `pending -> approved` transition: approval triggers leave reconciliation,
//! which rewrites the covered dates' attendance records to status `leave`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The category of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveKind {
    /// Annual (vacation) leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Emergency leave.
    Emergency,
    /// Unpaid leave.
    Unpaid,
}

/// The lifecycle status of a leave request.
///
/// Requests start `pending` and move exactly once to `approved` or `rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the covered dates are reconciled into attendance.
    Approved,
    /// Rejected; no attendance side effects.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A leave request for one member over an inclusive date range.
///
/// `start_date <= end_date` is the normal case; a reversed range is accepted
/// at submission and reconciles to zero attendance writes. For a given member,
/// non-rejected requests may not overlap (checked by the store at submission).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier assigned by the leave store.
    pub id: u64,
    /// The member requesting leave.
    pub member_id: String,
    /// The category of leave.
    pub kind: LeaveKind,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text reason supplied at submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Lifecycle status.
    pub status: LeaveStatus,
    /// The member who approved or rejected the request, set at decision time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
}

impl LeaveRequest {
    /// Returns true if this request's range overlaps another inclusive range.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{LeaveKind, LeaveRequest, LeaveStatus};
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest {
    ///     id: 1,
    ///     member_id: "mem_001".to_string(),
    ///     kind: LeaveKind::Annual,
    ///     start_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
    ///     reason: None,
    ///     status: LeaveStatus::Pending,
    ///     approved_by: None,
    /// };
    /// let start = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    /// assert!(request.overlaps(start, end));
    /// ```
    pub fn overlaps(&self, start_date: NaiveDate, end_date: NaiveDate) -> bool {
        self.start_date <= end_date && start_date <= self.end_date
    }
}
