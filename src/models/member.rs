//! Member model and related types.
//!
//! Members are owned by the member directory; the payroll engine only reads
//! them. The engine cares about two attributes: the base monthly salary and
//! the active/inactive status flag.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a member is currently employed and eligible for payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// The member is active and included in payroll generation.
    Active,
    /// The member is inactive and skipped by payroll generation.
    Inactive,
}

/// A member of the organisation, as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for the member.
    pub id: String,
    /// The member's display name.
    pub name: String,
    /// The base monthly salary. Non-negative.
    pub base_salary: Decimal,
    /// Whether the member is active.
    pub status: MemberStatus,
}

impl Member {
    /// Returns true if the member is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Member, MemberStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let member = Member {
    ///     id: "mem_001".to_string(),
    ///     name: "Amira Saleh".to_string(),
    ///     base_salary: Decimal::new(3000, 0),
    ///     status: MemberStatus::Active,
    /// };
    /// assert!(member.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
