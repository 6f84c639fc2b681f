//! Payroll generation: the monthly batch over all active members.
//!
//! For each active member the generator walks every working day of the target
//! month, counts the days with no attendance record or an explicit `absent`
//! status, monetizes those absences at the member's daily rate, and upserts
//! one payroll record keyed by `(member, month)`.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{AttendanceRecord, AttendanceStatus, Member, PayrollMonth};
use crate::store::{AttendanceStore, MemberStore, PayrollStore, StoreResult};

use super::working_days::working_days;

/// The fixed divisor converting a monthly base salary into a daily rate.
///
/// The daily rate is always `base_salary / 30`, regardless of the target
/// month's actual length. This is a deliberate business rule, not an
/// approximation to correct: changing the divisor changes payout amounts.
pub const DAILY_RATE_DIVISOR: u32 = 30;

/// Computes the daily rate for a base monthly salary.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::daily_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(daily_rate(Decimal::new(3000, 0)), Decimal::new(100, 0));
/// ```
pub fn daily_rate(base_salary: Decimal) -> Decimal {
    base_salary / Decimal::from(DAILY_RATE_DIVISOR)
}

/// Returns true if a working day's attendance lookup counts as an absence.
///
/// No record at all is treated identically to an explicit `absent` status;
/// `present` and `leave` both suppress the absence. The engine never creates
/// a record to make a missing day explicit.
pub fn is_absence(record: Option<&AttendanceRecord>) -> bool {
    match record {
        None => true,
        Some(record) => record.status == AttendanceStatus::Absent,
    }
}

/// The monetary result of monetizing one member's absences for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayComputation {
    /// The daily rate the absences were monetized at.
    pub daily_rate: Decimal,
    /// `absences * daily_rate`.
    pub deductions: Decimal,
    /// `max(0, base_salary - deductions)`; floored at zero, never negative.
    pub net_salary: Decimal,
}

/// Converts an absence count into deductions and a clamped net salary.
///
/// # Example
///
/// ```
/// use payroll_engine::engine::compute_pay;
/// use rust_decimal::Decimal;
///
/// let pay = compute_pay(Decimal::new(3000, 0), 2);
/// assert_eq!(pay.deductions, Decimal::new(200, 0));
/// assert_eq!(pay.net_salary, Decimal::new(2800, 0));
/// ```
pub fn compute_pay(base_salary: Decimal, absences: u32) -> PayComputation {
    let daily_rate = daily_rate(base_salary);
    let deductions = daily_rate * Decimal::from(absences);
    // Net salary is floored at zero, never negative.
    let net_salary = (base_salary - deductions).max(Decimal::ZERO);
    PayComputation {
        daily_rate,
        deductions,
        net_salary,
    }
}

/// The per-member outcome counts of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    /// The month the run targeted.
    pub month: PayrollMonth,
    /// Number of active members whose payroll record was written.
    pub members_processed: u32,
    /// Number of active members whose run failed and was skipped.
    pub members_failed: u32,
}

/// Generates monthly payroll records from attendance.
///
/// Constructed with the three stores it reads and writes; nothing is global,
/// so the generator is testable against fakes.
#[derive(Clone)]
pub struct PayrollGenerator {
    members: Arc<dyn MemberStore>,
    attendance: Arc<dyn AttendanceStore>,
    payroll: Arc<dyn PayrollStore>,
}

impl PayrollGenerator {
    /// Creates a generator over the given stores.
    pub fn new(
        members: Arc<dyn MemberStore>,
        attendance: Arc<dyn AttendanceStore>,
        payroll: Arc<dyn PayrollStore>,
    ) -> Self {
        Self {
            members,
            attendance,
            payroll,
        }
    }

    /// Runs the payroll batch for a target month.
    ///
    /// Idempotent: a second run with unchanged attendance updates each record
    /// in place to identical values and never creates duplicates. Members are
    /// processed independently and best-effort; a per-member failure (an
    /// attendance read or the payroll write) is logged, counted in
    /// [`GenerationOutcome::members_failed`], and does not abort the rest of
    /// the batch. A failed member is picked up again by simply rerunning
    /// `generate` for the same month.
    ///
    /// If the member directory itself is unavailable the run degrades to zero
    /// members processed rather than an error.
    pub fn generate(&self, month: PayrollMonth) -> GenerationOutcome {
        let mut outcome = GenerationOutcome {
            month,
            members_processed: 0,
            members_failed: 0,
        };

        let members = match self.members.list_active_members() {
            Ok(members) => members,
            Err(err) => {
                warn!(%month, error = %err, "member directory unavailable, no payroll generated");
                return outcome;
            }
        };

        for member in &members {
            match self.generate_for_member(member, month) {
                Ok(()) => outcome.members_processed += 1,
                Err(err) => {
                    warn!(
                        member_id = %member.id,
                        %month,
                        error = %err,
                        "payroll generation failed for member"
                    );
                    outcome.members_failed += 1;
                }
            }
        }

        info!(
            %month,
            members_processed = outcome.members_processed,
            members_failed = outcome.members_failed,
            "payroll batch finished"
        );
        outcome
    }

    /// Computes and upserts one member's payslip for the month.
    fn generate_for_member(&self, member: &Member, month: PayrollMonth) -> StoreResult<()> {
        let mut absences = 0u32;
        for date in working_days(month) {
            let record = self.attendance.get_attendance(&member.id, date)?;
            if is_absence(record.as_ref()) {
                absences += 1;
            }
        }

        let pay = compute_pay(member.base_salary, absences);
        self.payroll.upsert_payroll(
            &member.id,
            month,
            member.base_salary,
            pay.deductions,
            pay.net_salary,
        )?;

        info!(
            member_id = %member.id,
            %month,
            absences,
            deductions = %pay.deductions,
            net_salary = %pay.net_salary,
            "payroll record written"
        );
        Ok(())
    }
}
