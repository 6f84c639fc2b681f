//! The derived-computation core of the payroll engine.
//!
//! Two cooperating components live here. The leave reconciler expands an
//! approved leave request's date range into per-day attendance records of
//! status `leave`. The payroll generator walks every working day of a target
//! month per active member, counts absences, converts them into a monetary
//! deduction at a fixed daily rate, and idempotently upserts one payroll
//! record per member per month. Both write through the same attendance store,
//! so a payroll run observes leave rows written earlier; if it runs while a
//! reconciliation is still writing, some leave days may read as absent until
//! the next run (an accepted eventual-consistency window, not a bug).

mod leave_reconciliation;
mod payroll_generation;
mod working_days;

pub use leave_reconciliation::{LeaveReconciler, ReconciliationOutcome};
pub use payroll_generation::{
    DAILY_RATE_DIVISOR, GenerationOutcome, PayComputation, PayrollGenerator, compute_pay,
    daily_rate, is_absence,
};
pub use working_days::{WEEKEND_DAYS, is_working_day, working_days};
