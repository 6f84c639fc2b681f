//! In-memory store implementation.
//!
//! Backs all four store traits with `RwLock`-guarded maps keyed by the natural
//! keys, which makes the uniqueness invariants structural: a map keyed by
//! `(member, date)` cannot hold two rows for the same pair. Used by the API
//! state and by tests; a SQL-backed implementation would slot in behind the
//! same traits.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{
    AttendanceRecord, AttendanceStatus, LeaveKind, LeaveRequest, LeaveStatus, Member, PaymentStatus,
    PayrollMonth, PayrollRecord,
};

use super::{
    AttendanceStore, LeaveStore, MemberStore, PayrollStore, StoreError, StoreResult,
};

/// An in-memory implementation of all four store traits.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Member, MemberStatus};
/// use payroll_engine::store::{MemberStore, MemoryStore};
/// use rust_decimal::Decimal;
///
/// let store = MemoryStore::new();
/// store.insert_member(Member {
///     id: "mem_001".to_string(),
///     name: "Amira Saleh".to_string(),
///     base_salary: Decimal::new(3000, 0),
///     status: MemberStatus::Active,
/// }).unwrap();
/// assert_eq!(store.list_active_members().unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    members: RwLock<HashMap<String, Member>>,
    attendance: RwLock<HashMap<(String, NaiveDate), AttendanceRecord>>,
    leaves: RwLock<HashMap<u64, LeaveRequest>>,
    payroll: RwLock<HashMap<(String, PayrollMonth), PayrollRecord>>,
    next_leave_id: AtomicU64,
}

fn poisoned(what: &str) -> StoreError {
    StoreError::Unavailable {
        message: format!("{what} lock poisoned"),
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            next_leave_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    /// Inserts or replaces a member in the directory.
    ///
    /// The member directory is owned outside the engine; this is the seeding
    /// hook used at startup and in tests.
    pub fn insert_member(&self, member: Member) -> StoreResult<()> {
        let mut members = self.members.write().map_err(|_| poisoned("members"))?;
        members.insert(member.id.clone(), member);
        Ok(())
    }
}

impl MemberStore for MemoryStore {
    fn list_active_members(&self) -> StoreResult<Vec<Member>> {
        let members = self.members.read().map_err(|_| poisoned("members"))?;
        let mut active: Vec<Member> = members.values().filter(|m| m.is_active()).cloned().collect();
        active.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(active)
    }

    fn get_member(&self, id: &str) -> StoreResult<Option<Member>> {
        let members = self.members.read().map_err(|_| poisoned("members"))?;
        Ok(members.get(id).cloned())
    }
}

impl AttendanceStore for MemoryStore {
    fn get_attendance(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let attendance = self.attendance.read().map_err(|_| poisoned("attendance"))?;
        Ok(attendance.get(&(member_id.to_string(), date)).cloned())
    }

    fn upsert_status(
        &self,
        member_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> StoreResult<()> {
        let mut attendance = self.attendance.write().map_err(|_| poisoned("attendance"))?;
        attendance
            .entry((member_id.to_string(), date))
            .and_modify(|record| record.status = status)
            .or_insert_with(|| AttendanceRecord {
                member_id: member_id.to_string(),
                date,
                check_in: None,
                check_out: None,
                status,
            });
        Ok(())
    }

    fn record_check_in(
        &self,
        member_id: &str,
        date: NaiveDate,
        at: NaiveDateTime,
    ) -> StoreResult<AttendanceRecord> {
        let mut attendance = self.attendance.write().map_err(|_| poisoned("attendance"))?;
        let key = (member_id.to_string(), date);
        if attendance.contains_key(&key) {
            return Err(StoreError::Conflict {
                key: format!("attendance({member_id}, {date})"),
            });
        }
        let record = AttendanceRecord {
            member_id: member_id.to_string(),
            date,
            check_in: Some(at),
            check_out: None,
            status: AttendanceStatus::Present,
        };
        attendance.insert(key, record.clone());
        Ok(record)
    }

    fn record_check_out(
        &self,
        member_id: &str,
        date: NaiveDate,
        at: NaiveDateTime,
    ) -> StoreResult<AttendanceRecord> {
        let mut attendance = self.attendance.write().map_err(|_| poisoned("attendance"))?;
        let record = attendance
            .get_mut(&(member_id.to_string(), date))
            .ok_or_else(|| StoreError::NotFound {
                key: format!("attendance({member_id}, {date})"),
            })?;
        record.check_out = Some(at);
        Ok(record.clone())
    }

    fn list_member_attendance(&self, member_id: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let attendance = self.attendance.read().map_err(|_| poisoned("attendance"))?;
        let mut records: Vec<AttendanceRecord> = attendance
            .values()
            .filter(|r| r.member_id == member_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}

impl PayrollStore for MemoryStore {
    fn get_payroll(
        &self,
        member_id: &str,
        month: PayrollMonth,
    ) -> StoreResult<Option<PayrollRecord>> {
        let payroll = self.payroll.read().map_err(|_| poisoned("payroll"))?;
        Ok(payroll.get(&(member_id.to_string(), month)).cloned())
    }

    fn upsert_payroll(
        &self,
        member_id: &str,
        month: PayrollMonth,
        base_salary: Decimal,
        deductions: Decimal,
        net_salary: Decimal,
    ) -> StoreResult<()> {
        let mut payroll = self.payroll.write().map_err(|_| poisoned("payroll"))?;
        payroll
            .entry((member_id.to_string(), month))
            .and_modify(|record| {
                record.base_salary = base_salary;
                record.deductions = deductions;
                record.net_salary = net_salary;
            })
            .or_insert_with(|| PayrollRecord {
                member_id: member_id.to_string(),
                month,
                base_salary,
                deductions,
                bonuses: Decimal::ZERO,
                net_salary,
                status: PaymentStatus::Pending,
                paid_at: None,
            });
        Ok(())
    }

    fn list_member_payroll(&self, member_id: &str) -> StoreResult<Vec<PayrollRecord>> {
        let payroll = self.payroll.read().map_err(|_| poisoned("payroll"))?;
        let mut records: Vec<PayrollRecord> = payroll
            .values()
            .filter(|r| r.member_id == member_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.month.cmp(&a.month));
        Ok(records)
    }
}

impl LeaveStore for MemoryStore {
    fn submit(
        &self,
        member_id: &str,
        kind: LeaveKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: Option<String>,
    ) -> StoreResult<LeaveRequest> {
        let mut leaves = self.leaves.write().map_err(|_| poisoned("leaves"))?;
        let overlapping = leaves.values().any(|existing| {
            existing.member_id == member_id
                && existing.status != LeaveStatus::Rejected
                && existing.overlaps(start_date, end_date)
        });
        if overlapping {
            return Err(StoreError::Conflict {
                key: format!("leave({member_id}, {start_date}..{end_date})"),
            });
        }
        let id = self.next_leave_id.fetch_add(1, Ordering::Relaxed);
        let request = LeaveRequest {
            id,
            member_id: member_id.to_string(),
            kind,
            start_date,
            end_date,
            reason,
            status: LeaveStatus::Pending,
            approved_by: None,
        };
        leaves.insert(id, request.clone());
        Ok(request)
    }

    fn get_leave(&self, id: u64) -> StoreResult<Option<LeaveRequest>> {
        let leaves = self.leaves.read().map_err(|_| poisoned("leaves"))?;
        Ok(leaves.get(&id).cloned())
    }

    fn list_member_leaves(&self, member_id: &str) -> StoreResult<Vec<LeaveRequest>> {
        let leaves = self.leaves.read().map_err(|_| poisoned("leaves"))?;
        let mut records: Vec<LeaveRequest> = leaves
            .values()
            .filter(|r| r.member_id == member_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(records)
    }

    fn set_status(
        &self,
        id: u64,
        status: LeaveStatus,
        approved_by: Option<String>,
    ) -> StoreResult<LeaveRequest> {
        let mut leaves = self.leaves.write().map_err(|_| poisoned("leaves"))?;
        let request = leaves.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            key: format!("leave({id})"),
        })?;
        request.status = status;
        request.approved_by = approved_by;
        Ok(request.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberStatus;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn datetime(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        date(month, day).and_hms_opt(hour, 0, 0).unwrap()
    }

    fn member(id: &str, salary: i64, status: MemberStatus) -> Member {
        Member {
            id: id.to_string(),
            name: format!("Member {id}"),
            base_salary: Decimal::new(salary, 0),
            status,
        }
    }

    #[test]
    fn test_list_active_members_filters_inactive() {
        let store = MemoryStore::new();
        store.insert_member(member("mem_001", 3000, MemberStatus::Active)).unwrap();
        store.insert_member(member("mem_002", 2500, MemberStatus::Inactive)).unwrap();
        store.insert_member(member("mem_003", 4000, MemberStatus::Active)).unwrap();

        let active = store.list_active_members().unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, "mem_001");
        assert_eq!(active[1].id, "mem_003");
    }

    #[test]
    fn test_upsert_status_creates_record_without_timestamps() {
        let store = MemoryStore::new();
        store
            .upsert_status("mem_001", date(3, 11), AttendanceStatus::Leave)
            .unwrap();

        let record = store.get_attendance("mem_001", date(3, 11)).unwrap().unwrap();
        assert_eq!(record.status, AttendanceStatus::Leave);
        assert!(record.check_in.is_none());
        assert!(record.check_out.is_none());
    }

    #[test]
    fn test_upsert_status_overwrites_status_but_keeps_timestamps() {
        let store = MemoryStore::new();
        store
            .record_check_in("mem_001", date(3, 11), datetime(3, 11, 9))
            .unwrap();
        store
            .upsert_status("mem_001", date(3, 11), AttendanceStatus::Leave)
            .unwrap();

        let record = store.get_attendance("mem_001", date(3, 11)).unwrap().unwrap();
        assert_eq!(record.status, AttendanceStatus::Leave);
        assert_eq!(record.check_in, Some(datetime(3, 11, 9)));
    }

    #[test]
    fn test_check_in_twice_conflicts() {
        let store = MemoryStore::new();
        store
            .record_check_in("mem_001", date(3, 11), datetime(3, 11, 9))
            .unwrap();
        let err = store
            .record_check_in("mem_001", date(3, 11), datetime(3, 11, 10))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn test_check_out_without_check_in_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .record_check_out("mem_001", date(3, 11), datetime(3, 11, 17))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_check_out_sets_timestamp_on_existing_record() {
        let store = MemoryStore::new();
        store
            .record_check_in("mem_001", date(3, 11), datetime(3, 11, 9))
            .unwrap();
        let record = store
            .record_check_out("mem_001", date(3, 11), datetime(3, 11, 17))
            .unwrap();
        assert_eq!(record.check_in, Some(datetime(3, 11, 9)));
        assert_eq!(record.check_out, Some(datetime(3, 11, 17)));
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_list_member_attendance_sorted_most_recent_first() {
        let store = MemoryStore::new();
        store.upsert_status("mem_001", date(3, 11), AttendanceStatus::Present).unwrap();
        store.upsert_status("mem_001", date(3, 13), AttendanceStatus::Present).unwrap();
        store.upsert_status("mem_001", date(3, 12), AttendanceStatus::Absent).unwrap();
        store.upsert_status("mem_002", date(3, 11), AttendanceStatus::Present).unwrap();

        let records = store.list_member_attendance("mem_001").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, date(3, 13));
        assert_eq!(records[2].date, date(3, 11));
    }

    #[test]
    fn test_upsert_payroll_inserts_with_pending_defaults() {
        let store = MemoryStore::new();
        let month = PayrollMonth::new(2024, 3).unwrap();
        store
            .upsert_payroll(
                "mem_001",
                month,
                Decimal::new(3000, 0),
                Decimal::new(200, 0),
                Decimal::new(2800, 0),
            )
            .unwrap();

        let record = store.get_payroll("mem_001", month).unwrap().unwrap();
        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(record.bonuses, Decimal::ZERO);
        assert!(record.paid_at.is_none());
    }

    #[test]
    fn test_upsert_payroll_updates_in_place_preserving_bonuses() {
        let store = MemoryStore::new();
        let month = PayrollMonth::new(2024, 3).unwrap();
        store
            .upsert_payroll(
                "mem_001",
                month,
                Decimal::new(3000, 0),
                Decimal::new(200, 0),
                Decimal::new(2800, 0),
            )
            .unwrap();

        // Simulate an externally recorded bonus, then regenerate.
        {
            let mut payroll = store.payroll.write().unwrap();
            let record = payroll.get_mut(&("mem_001".to_string(), month)).unwrap();
            record.bonuses = Decimal::new(150, 0);
        }
        store
            .upsert_payroll(
                "mem_001",
                month,
                Decimal::new(3000, 0),
                Decimal::new(100, 0),
                Decimal::new(2900, 0),
            )
            .unwrap();

        let records = store.list_member_payroll("mem_001").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].deductions, Decimal::new(100, 0));
        assert_eq!(records[0].bonuses, Decimal::new(150, 0));
    }

    #[test]
    fn test_submit_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store
            .submit("mem_001", LeaveKind::Annual, date(3, 10), date(3, 12), None)
            .unwrap();
        let second = store
            .submit("mem_002", LeaveKind::Sick, date(3, 10), date(3, 12), None)
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, LeaveStatus::Pending);
    }

    #[test]
    fn test_submit_rejects_overlap_with_non_rejected_request() {
        let store = MemoryStore::new();
        store
            .submit("mem_001", LeaveKind::Annual, date(3, 10), date(3, 12), None)
            .unwrap();
        let err = store
            .submit("mem_001", LeaveKind::Sick, date(3, 12), date(3, 14), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn test_submit_allows_overlap_with_rejected_request() {
        let store = MemoryStore::new();
        let first = store
            .submit("mem_001", LeaveKind::Annual, date(3, 10), date(3, 12), None)
            .unwrap();
        store
            .set_status(first.id, LeaveStatus::Rejected, Some("mem_admin".to_string()))
            .unwrap();
        assert!(
            store
                .submit("mem_001", LeaveKind::Annual, date(3, 11), date(3, 13), None)
                .is_ok()
        );
    }

    #[test]
    fn test_submit_allows_overlap_across_members() {
        let store = MemoryStore::new();
        store
            .submit("mem_001", LeaveKind::Annual, date(3, 10), date(3, 12), None)
            .unwrap();
        assert!(
            store
                .submit("mem_002", LeaveKind::Annual, date(3, 10), date(3, 12), None)
                .is_ok()
        );
    }

    #[test]
    fn test_set_status_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .set_status(99, LeaveStatus::Approved, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_set_status_records_approver() {
        let store = MemoryStore::new();
        let request = store
            .submit("mem_001", LeaveKind::Sick, date(3, 10), date(3, 12), None)
            .unwrap();
        let updated = store
            .set_status(request.id, LeaveStatus::Approved, Some("mem_admin".to_string()))
            .unwrap();
        assert_eq!(updated.status, LeaveStatus::Approved);
        assert_eq!(updated.approved_by.as_deref(), Some("mem_admin"));
    }
}
