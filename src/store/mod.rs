//! Persistence seam for the payroll engine.
//!
//! The engines never talk to a concrete database. They receive the traits in
//! this module at construction, which keeps them independently testable with
//! fake stores and keeps duplicate-key handling where it belongs: both natural
//! keys — `(member, date)` for attendance and `(member, month)` for payroll —
//! are enforced by the store through atomic conditional upserts, so concurrent
//! writers degrade to last-write-wins, never to duplicate rows.

mod memory;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    AttendanceRecord, AttendanceStatus, LeaveKind, LeaveRequest, LeaveStatus, Member, PayrollMonth,
    PayrollRecord,
};

pub use memory::MemoryStore;

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or an operation timed out.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// A description of the failure.
        message: String,
    },

    /// A write conflicted with an existing row on a natural key.
    #[error("Conflict on {key}")]
    Conflict {
        /// The natural key that conflicted.
        key: String,
    },

    /// A row that the operation requires does not exist.
    #[error("Not found: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to the member directory.
///
/// Members are owned elsewhere; the engine only lists and looks them up.
pub trait MemberStore: Send + Sync {
    /// Returns every member whose status is active.
    fn list_active_members(&self) -> StoreResult<Vec<Member>>;

    /// Looks up a member by id.
    fn get_member(&self, id: &str) -> StoreResult<Option<Member>>;
}

/// Access to attendance records keyed by `(member, date)`.
pub trait AttendanceStore: Send + Sync {
    /// Returns the attendance record for a member on a date, if one exists.
    fn get_attendance(&self, member_id: &str, date: NaiveDate)
    -> StoreResult<Option<AttendanceRecord>>;

    /// Atomically sets the status for `(member, date)`.
    ///
    /// If no record exists, one is created with the given status and no
    /// check-in/check-out timestamps. If a record exists, only its status is
    /// overwritten; existing timestamps are untouched. This single operation
    /// replaces the insert/catch-conflict/update pattern, so there is no race
    /// window between the existence check and the write.
    fn upsert_status(
        &self,
        member_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> StoreResult<()>;

    /// Records a check-in for `(member, date)`.
    ///
    /// Creates a `present` record carrying the check-in timestamp. Fails with
    /// [`StoreError::Conflict`] if the member already has a record for the
    /// date.
    fn record_check_in(
        &self,
        member_id: &str,
        date: NaiveDate,
        at: NaiveDateTime,
    ) -> StoreResult<AttendanceRecord>;

    /// Records a check-out on the member's existing record for the date.
    ///
    /// Fails with [`StoreError::NotFound`] if the member has not checked in
    /// on that date.
    fn record_check_out(
        &self,
        member_id: &str,
        date: NaiveDate,
        at: NaiveDateTime,
    ) -> StoreResult<AttendanceRecord>;

    /// Returns all attendance records for a member, most recent date first.
    fn list_member_attendance(&self, member_id: &str) -> StoreResult<Vec<AttendanceRecord>>;
}

/// Access to payroll records keyed by `(member, month)`.
pub trait PayrollStore: Send + Sync {
    /// Returns the payroll record for a member and month, if one exists.
    fn get_payroll(
        &self,
        member_id: &str,
        month: PayrollMonth,
    ) -> StoreResult<Option<PayrollRecord>>;

    /// Atomically writes the computed payslip fields for `(member, month)`.
    ///
    /// If no record exists, one is inserted with status `pending`, zero
    /// bonuses, and no paid-at timestamp. If a record exists, only
    /// `base_salary`, `deductions`, and `net_salary` are overwritten;
    /// `bonuses`, `status`, and `paid_at` are preserved. Regeneration is
    /// therefore idempotent and never duplicates rows.
    fn upsert_payroll(
        &self,
        member_id: &str,
        month: PayrollMonth,
        base_salary: Decimal,
        deductions: Decimal,
        net_salary: Decimal,
    ) -> StoreResult<()>;

    /// Returns all payroll records for a member, most recent month first.
    fn list_member_payroll(&self, member_id: &str) -> StoreResult<Vec<PayrollRecord>>;
}

/// Access to the leave request lifecycle.
///
/// The store owns the lifecycle; the engine is only interested in approval's
/// side effects on attendance.
pub trait LeaveStore: Send + Sync {
    /// Submits a new pending leave request.
    ///
    /// Fails with [`StoreError::Conflict`] if the member already has a
    /// non-rejected request whose range overlaps `[start_date, end_date]`.
    /// This precondition is what lets reconciliation assume approved ranges
    /// are disjoint per member.
    fn submit(
        &self,
        member_id: &str,
        kind: LeaveKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: Option<String>,
    ) -> StoreResult<LeaveRequest>;

    /// Looks up a leave request by id.
    fn get_leave(&self, id: u64) -> StoreResult<Option<LeaveRequest>>;

    /// Returns all leave requests for a member, most recent start date first.
    fn list_member_leaves(&self, member_id: &str) -> StoreResult<Vec<LeaveRequest>>;

    /// Transitions a leave request's status and records the approver.
    ///
    /// Fails with [`StoreError::NotFound`] if the id does not exist. The
    /// caller decides whether the transition is legal; the store just writes.
    fn set_status(
        &self,
        id: u64,
        status: LeaveStatus,
        approved_by: Option<String>,
    ) -> StoreResult<LeaveRequest>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::Unavailable {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.to_string(), "Store unavailable: connection refused");

        let error = StoreError::Conflict {
            key: "attendance(mem_001, 2024-03-11)".to_string(),
        };
        assert_eq!(error.to_string(), "Conflict on attendance(mem_001, 2024-03-11)");

        let error = StoreError::NotFound {
            key: "leave(42)".to_string(),
        };
        assert_eq!(error.to_string(), "Not found: leave(42)");
    }

    #[test]
    fn test_store_traits_are_object_safe() {
        fn assert_object_safe(
            _: &dyn MemberStore,
            _: &dyn AttendanceStore,
            _: &dyn PayrollStore,
            _: &dyn LeaveStore,
        ) {
        }
        let store = MemoryStore::new();
        assert_object_safe(&store, &store, &store, &store);
    }
}
