//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod leave;
mod member;
mod month;
mod payroll;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use leave::{LeaveKind, LeaveRequest, LeaveStatus};
pub use member::{Member, MemberStatus};
pub use month::PayrollMonth;
pub use payroll::{PaymentStatus, PayrollRecord};
