//! Payroll record model and related types.
//!
//! A [`PayrollRecord`] is one computed payslip per `(member, month)` pair.
//! Records are created and updated only by the payroll generation engine;
//! payment marking (`status`/`paid_at`) belongs to an external action.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollMonth;

/// Whether a payslip has been paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Generated but not yet paid.
    Pending,
    /// Paid out; `paid_at` records when.
    Paid,
}

/// One computed payslip for one member and one calendar month.
///
/// The `(member_id, month)` pair is the natural key: regenerating payroll for
/// the same month overwrites `base_salary`, `deductions`, and `net_salary` in
/// place and never creates a duplicate. `bonuses`, `status`, and `paid_at`
/// survive regeneration untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The member this payslip belongs to.
    pub member_id: String,
    /// The calendar month the payslip covers.
    pub month: PayrollMonth,
    /// The base monthly salary, copied from the member at generation time.
    pub base_salary: Decimal,
    /// Absence deductions derived by the generation engine.
    pub deductions: Decimal,
    /// Discretionary bonuses recorded externally. Not part of the net
    /// computation; defaults to zero.
    pub bonuses: Decimal,
    /// `max(0, base_salary - deductions)`; never negative.
    pub net_salary: Decimal,
    /// Payment status, mutated by an external payment-marking action.
    pub status: PaymentStatus,
    /// When the payslip was paid, if it has been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_record_round_trip() {
        let record = PayrollRecord {
            member_id: "mem_001".to_string(),
            month: PayrollMonth::new(2024, 3).unwrap(),
            base_salary: Decimal::new(3000, 0),
            deductions: Decimal::new(200, 0),
            bonuses: Decimal::ZERO,
            net_salary: Decimal::new(2800, 0),
            status: PaymentStatus::Pending,
            paid_at: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"month\":\"2024-03\""));
        assert!(!json.contains("paid_at"));
        let back: PayrollRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
