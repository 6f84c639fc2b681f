//! Leave reconciliation: expanding an approved leave range into attendance.
//!
//! When a leave request is approved, every calendar date in its inclusive
//! range must end up with an attendance record of status `leave` for the
//! requesting member, so that the subsequent payroll run does not count those
//! days as absences.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::AttendanceStatus;
use crate::store::AttendanceStore;

/// The per-date outcome counts of one reconciliation run.
///
/// Reconciliation has no fatal path: a per-date store failure is logged and
/// counted, and the remaining dates are still attempted. The caller reads
/// these counts to decide whether to retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationOutcome {
    /// Number of dates whose attendance was written with status `leave`.
    pub days_applied: u32,
    /// Number of dates whose write failed.
    pub days_failed: u32,
}

/// Rewrites attendance records for approved leave ranges.
///
/// Constructed with the attendance store it writes through; the leave store
/// owns the request lifecycle and is not a dependency here.
#[derive(Clone)]
pub struct LeaveReconciler {
    attendance: Arc<dyn AttendanceStore>,
}

impl LeaveReconciler {
    /// Creates a reconciler writing through the given attendance store.
    pub fn new(attendance: Arc<dyn AttendanceStore>) -> Self {
        Self { attendance }
    }

    /// Upserts a `leave` attendance record for every date in
    /// `[start_date, end_date]`, both endpoints inclusive.
    ///
    /// For each date: if no record exists for `(member, date)`, one is created
    /// with status `leave` and no timestamps; if one exists (say the member
    /// checked in before the leave was approved retroactively), only its
    /// status is overwritten and the timestamps stay.
    ///
    /// A reversed range (`start_date > end_date`) performs zero iterations
    /// and is a no-op, not an error. A per-date store failure is logged and
    /// counted in [`ReconciliationOutcome::days_failed`]; it never aborts the
    /// remaining dates and there is no rollback, so a partially failed run
    /// can simply be retried.
    pub fn reconcile(
        &self,
        member_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ReconciliationOutcome {
        let mut outcome = ReconciliationOutcome::default();
        if start_date > end_date {
            warn!(
                member_id,
                %start_date,
                %end_date,
                "reversed leave range, nothing to reconcile"
            );
            return outcome;
        }

        let mut day = Some(start_date);
        while let Some(date) = day.filter(|d| *d <= end_date) {
            match self
                .attendance
                .upsert_status(member_id, date, AttendanceStatus::Leave)
            {
                Ok(()) => outcome.days_applied += 1,
                Err(err) => {
                    warn!(member_id, %date, error = %err, "leave attendance write failed");
                    outcome.days_failed += 1;
                }
            }
            day = date.succ_opt();
        }

        info!(
            member_id,
            %start_date,
            %end_date,
            days_applied = outcome.days_applied,
            days_failed = outcome.days_failed,
            "leave range reconciled into attendance"
        );
        outcome
    }
}
