//! Attendance model and related types.
//!
//! An [`AttendanceRecord`] captures one member's attendance for exactly one
//! calendar date. The `(member_id, date)` pair is the natural key: the store
//! enforces at most one record per pair, so concurrent writers degrade to
//! last-write-wins rather than duplicate rows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The attendance status for one member on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The member checked in on this date.
    Present,
    /// The member was explicitly recorded as absent.
    Absent,
    /// The date falls inside an approved leave range.
    Leave,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Leave => write!(f, "leave"),
        }
    }
}

/// One member's attendance for one calendar date.
///
/// Created by a check-in action or by leave reconciliation; mutated by a
/// check-out action or by a leave-status overwrite. Never deleted by the
/// engine. The date alone identifies the day; check-in/check-out timestamps
/// are informational and do not participate in identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The member this record belongs to.
    pub member_id: String,
    /// The calendar date the record covers.
    pub date: NaiveDate,
    /// When the member checked in, if they did.
    pub check_in: Option<NaiveDateTime>,
    /// When the member checked out, if they did.
    pub check_out: Option<NaiveDateTime>,
    /// The attendance status for the date.
    pub status: AttendanceStatus,
}
