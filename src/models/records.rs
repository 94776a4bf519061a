//! Attendance, consumption and schedule records.
//!
//! These are externally owned facts handed to the engine by a record source.
//! The engine only reads them, but it checks their invariants before using
//! them.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DateRange;

/// The status tag on an attendance record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in on or before the scheduled start.
    #[default]
    Present,
    /// Clocked in after the scheduled start.
    Late,
    /// Did not attend.
    Absent,
}

impl AttendanceStatus {
    /// Returns true for statuses that represent actual attendance.
    pub fn is_attended(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

/// One clock-in/clock-out pair for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The working date the record is filed under.
    pub date: NaiveDate,
    /// Clock-in time, absent if never recorded.
    #[serde(default)]
    pub entry_time: Option<NaiveDateTime>,
    /// Clock-out time, absent while the shift is open.
    #[serde(default)]
    pub exit_time: Option<NaiveDateTime>,
    /// The attendance status tag. `None` when the source did not classify
    /// the record; reports then derive it from the schedule.
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
}

impl AttendanceRecord {
    /// Returns true if both entry and exit are recorded.
    pub fn is_closed(&self) -> bool {
        self.entry_time.is_some() && self.exit_time.is_some()
    }

    /// Checks that exit is strictly after entry when both are present.
    pub fn validate(&self) -> EngineResult<()> {
        if let (Some(entry), Some(exit)) = (self.entry_time, self.exit_time) {
            if exit <= entry {
                return Err(EngineError::InvalidAttendanceData {
                    record_id: self.id.clone(),
                    message: format!("exit time {} is not after entry time {}", exit, entry),
                });
            }
        }
        Ok(())
    }

    /// Whole minutes between entry and exit.
    ///
    /// Seconds are truncated per record, so 09:00:30 to 17:00:00 counts as
    /// 479 minutes. Open shifts (either timestamp missing) count as zero.
    /// Fails with `InvalidAttendanceData` if exit is not after entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::{NaiveDate, NaiveDateTime};
    ///
    /// let record = AttendanceRecord {
    ///     id: "att_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     entry_time: NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     exit_time: NaiveDateTime::parse_from_str("2026-03-02 17:00:00", "%Y-%m-%d %H:%M:%S").ok(),
    ///     status: Some(AttendanceStatus::Present),
    /// };
    /// assert_eq!(record.worked_minutes().unwrap(), 480);
    /// ```
    pub fn worked_minutes(&self) -> EngineResult<i64> {
        self.validate()?;
        match (self.entry_time, self.exit_time) {
            (Some(entry), Some(exit)) => Ok((exit - entry).num_minutes()),
            _ => Ok(0),
        }
    }

    /// Whole minutes worked inside the half-open timestamp window of `range`.
    ///
    /// The interval is validated first and then clipped to the window, so a
    /// shift that crosses midnight at the end of the range only counts the
    /// part before the window closes. Leftover seconds are truncated after
    /// clipping, as in [`worked_minutes`](Self::worked_minutes).
    pub fn worked_minutes_within(&self, range: &DateRange) -> EngineResult<i64> {
        self.validate()?;
        let (Some(entry), Some(exit)) = (self.entry_time, self.exit_time) else {
            return Ok(0);
        };

        let effective_entry = entry.max(range.window_start());
        let effective_exit = exit.min(range.window_end());
        if effective_exit <= effective_entry {
            return Ok(0);
        }
        Ok((effective_exit - effective_entry).num_minutes())
    }
}

/// A charge against an employee (food, drinks) deducted from net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee the charge belongs to.
    pub employee_id: String,
    /// When the consumption happened.
    pub timestamp: NaiveDateTime,
    /// The amount charged, must be positive.
    pub amount: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl ConsumptionRecord {
    /// Checks that the amount is positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(EngineError::InvalidConsumptionData {
                record_id: self.id.clone(),
                message: format!("amount {} must be positive", self.amount),
            });
        }
        Ok(())
    }
}

/// A planned work interval for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique identifier for the schedule.
    pub id: String,
    /// The employee the schedule belongs to.
    pub employee_id: String,
    /// Planned start.
    pub start_time: NaiveDateTime,
    /// Planned end.
    pub end_time: NaiveDateTime,
}

impl Schedule {
    /// The date the schedule is filed under (its start date).
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Planned minutes, failing with `InvalidSchedule` unless end is after start.
    pub fn duration_minutes(&self) -> EngineResult<i64> {
        if self.end_time <= self.start_time {
            return Err(EngineError::InvalidSchedule {
                schedule_id: self.id.clone(),
                message: format!(
                    "end time {} is not after start time {}",
                    self.end_time, self.start_time
                ),
            });
        }
        Ok((self.end_time - self.start_time).num_minutes())
    }
}

/// Every record held for one employee over a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecords {
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Consumption records.
    #[serde(default)]
    pub consumptions: Vec<ConsumptionRecord>,
    /// Planned schedules.
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_record(entry: Option<&str>, exit: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: "att_001".to_string(),
            employee_id: "emp_001".to_string(),
            date: make_date("2026-03-02"),
            entry_time: entry.map(make_datetime),
            exit_time: exit.map(make_datetime),
            status: Some(AttendanceStatus::Present),
        }
    }

    fn create_week() -> DateRange {
        DateRange::new(make_date("2026-03-02"), make_date("2026-03-08")).unwrap()
    }

    /// AR-001: 8 hour shift
    #[test]
    fn test_worked_minutes_8_hours() {
        let record = create_record(Some("2026-03-02 09:00:00"), Some("2026-03-02 17:00:00"));
        assert_eq!(record.worked_minutes().unwrap(), 480);
    }

    /// AR-002: open shift counts zero
    #[test]
    fn test_open_shift_counts_zero() {
        let record = create_record(Some("2026-03-02 09:00:00"), None);
        assert_eq!(record.worked_minutes().unwrap(), 0);
        assert!(!record.is_closed());
    }

    /// AR-003: exit before entry is a data error
    #[test]
    fn test_exit_before_entry_fails() {
        let record = create_record(Some("2026-03-02 17:00:00"), Some("2026-03-02 09:00:00"));
        let err = record.worked_minutes().unwrap_err();
        assert!(matches!(err, EngineError::InvalidAttendanceData { ref record_id, .. } if record_id == "att_001"));
    }

    /// AR-004: exit equal to entry is a data error, not a silent zero
    #[test]
    fn test_exit_equal_to_entry_fails() {
        let record = create_record(Some("2026-03-02 09:00:00"), Some("2026-03-02 09:00:00"));
        assert!(record.worked_minutes().is_err());
    }

    /// AR-005: seconds are truncated per record
    #[test]
    fn test_seconds_truncate_to_whole_minutes() {
        let record = create_record(Some("2026-03-02 09:00:30"), Some("2026-03-02 17:00:00"));
        assert_eq!(record.worked_minutes().unwrap(), 479);
        assert_eq!(record.worked_minutes_within(&create_week()).unwrap(), 479);
    }

    #[test]
    fn test_overnight_shift() {
        let record = create_record(Some("2026-03-02 22:00:00"), Some("2026-03-03 06:00:00"));
        assert_eq!(record.worked_minutes().unwrap(), 480);
    }

    #[test]
    fn test_worked_minutes_within_clips_to_window_end() {
        let record = create_record(Some("2026-03-08 22:00:00"), Some("2026-03-09 02:00:00"));
        assert_eq!(record.worked_minutes_within(&create_week()).unwrap(), 120);
    }

    #[test]
    fn test_worked_minutes_within_clips_to_window_start() {
        let record = create_record(Some("2026-03-01 23:00:00"), Some("2026-03-02 01:30:00"));
        assert_eq!(record.worked_minutes_within(&create_week()).unwrap(), 90);
    }

    #[test]
    fn test_worked_minutes_within_outside_window_is_zero() {
        let record = create_record(Some("2026-03-10 09:00:00"), Some("2026-03-10 17:00:00"));
        assert_eq!(record.worked_minutes_within(&create_week()).unwrap(), 0);
    }

    #[test]
    fn test_worked_minutes_within_still_validates() {
        let record = create_record(Some("2026-03-10 17:00:00"), Some("2026-03-10 09:00:00"));
        assert!(record.worked_minutes_within(&create_week()).is_err());
    }

    #[test]
    fn test_attended_statuses() {
        assert!(AttendanceStatus::Present.is_attended());
        assert!(AttendanceStatus::Late.is_attended());
        assert!(!AttendanceStatus::Absent.is_attended());
    }

    #[test]
    fn test_consumption_must_be_positive() {
        let mut consumption = ConsumptionRecord {
            id: "con_001".to_string(),
            employee_id: "emp_001".to_string(),
            timestamp: make_datetime("2026-03-02 13:00:00"),
            amount: Decimal::from_str("15.50").unwrap(),
            description: "Lunch".to_string(),
        };
        assert!(consumption.validate().is_ok());

        consumption.amount = Decimal::ZERO;
        let err = consumption.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConsumptionData { .. }));
    }

    #[test]
    fn test_schedule_duration() {
        let schedule = Schedule {
            id: "sch_001".to_string(),
            employee_id: "emp_001".to_string(),
            start_time: make_datetime("2026-03-02 09:00:00"),
            end_time: make_datetime("2026-03-02 17:00:00"),
        };
        assert_eq!(schedule.duration_minutes().unwrap(), 480);
        assert_eq!(schedule.date(), make_date("2026-03-02"));
    }

    #[test]
    fn test_schedule_end_before_start_fails() {
        let schedule = Schedule {
            id: "sch_001".to_string(),
            employee_id: "emp_001".to_string(),
            start_time: make_datetime("2026-03-02 17:00:00"),
            end_time: make_datetime("2026-03-02 09:00:00"),
        };
        assert!(matches!(
            schedule.duration_minutes().unwrap_err(),
            EngineError::InvalidSchedule { .. }
        ));
    }

    #[test]
    fn test_deserialize_open_attendance_record() {
        let json = r#"{
            "id": "att_002",
            "employee_id": "emp_001",
            "date": "2026-03-02",
            "entry_time": "2026-03-02T09:00:00"
        }"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.exit_time, None);
        assert_eq!(record.status, None);
    }
}
