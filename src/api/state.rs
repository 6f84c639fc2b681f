//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::{LeaveReconciler, PayrollGenerator};
use crate::store::{AttendanceStore, LeaveStore, MemberStore, MemoryStore, PayrollStore};

/// Shared application state.
///
/// Holds the four store handles behind trait objects; the engines are built
/// from the same handles, so everything the handlers touch is injectable.
#[derive(Clone)]
pub struct AppState {
    members: Arc<dyn MemberStore>,
    attendance: Arc<dyn AttendanceStore>,
    leaves: Arc<dyn LeaveStore>,
    payroll: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates application state from individual store handles.
    pub fn new(
        members: Arc<dyn MemberStore>,
        attendance: Arc<dyn AttendanceStore>,
        leaves: Arc<dyn LeaveStore>,
        payroll: Arc<dyn PayrollStore>,
    ) -> Self {
        Self {
            members,
            attendance,
            leaves,
            payroll,
        }
    }

    /// Creates application state backed entirely by one in-memory store.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// Returns the member directory handle.
    pub fn members(&self) -> &Arc<dyn MemberStore> {
        &self.members
    }

    /// Returns the attendance store handle.
    pub fn attendance(&self) -> &Arc<dyn AttendanceStore> {
        &self.attendance
    }

    /// Returns the leave store handle.
    pub fn leaves(&self) -> &Arc<dyn LeaveStore> {
        &self.leaves
    }

    /// Returns the payroll store handle.
    pub fn payroll(&self) -> &Arc<dyn PayrollStore> {
        &self.payroll
    }

    /// Builds a leave reconciler over the state's attendance store.
    pub fn reconciler(&self) -> LeaveReconciler {
        LeaveReconciler::new(self.attendance.clone())
    }

    /// Builds a payroll generator over the state's stores.
    pub fn generator(&self) -> PayrollGenerator {
        PayrollGenerator::new(
            self.members.clone(),
            self.attendance.clone(),
            self.payroll.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_memory_shares_one_store() {
        use crate::models::{AttendanceStatus, Member, MemberStatus};
        use chrono::NaiveDate;
        use rust_decimal::Decimal;

        let store = Arc::new(MemoryStore::new());
        let state = AppState::from_memory(store);
        state
            .attendance()
            .upsert_status(
                "mem_001",
                NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
                AttendanceStatus::Leave,
            )
            .unwrap();

        // The reconciler writes through the same store the state reads.
        let record = state
            .attendance()
            .get_attendance("mem_001", NaiveDate::from_ymd_opt(2024, 3, 11).unwrap())
            .unwrap();
        assert!(record.is_some());

        // Member inserts through the shared store are visible to the directory.
        let memory = Arc::new(MemoryStore::new());
        memory
            .insert_member(Member {
                id: "mem_002".to_string(),
                name: "Omar Khalil".to_string(),
                base_salary: Decimal::new(2500, 0),
                status: MemberStatus::Active,
            })
            .unwrap();
        let state = AppState::from_memory(memory);
        assert!(state.members().get_member("mem_002").unwrap().is_some());
    }
}
