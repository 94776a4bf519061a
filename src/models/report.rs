//! Per-employee report models.
//!
//! This module contains the [`Report`] type and the values it is assembled
//! from: attendance and consumption lines, the [`HoursCalculation`], and the
//! advisory [`OvertimeSuggestion`]. All of them are derived values, rebuilt on
//! every request and never persisted.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceStatus, DateRange, Employee};

/// Decimal places kept on hour values derived from minutes.
pub const HOURS_SCALE: u32 = 10;

/// Converts whole minutes into hours at [`HOURS_SCALE`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::hours_from_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_minutes(540), Decimal::from(9));
/// assert_eq!(hours_from_minutes(45), Decimal::new(75, 2));
/// ```
pub fn hours_from_minutes(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60)).round_dp(HOURS_SCALE)
}

/// Total, regular and overtime hours for one employee over a range.
///
/// Construct it with [`HoursCalculation::from_minutes`], which derives
/// overtime as `total - regular` so that `total == regular + overtime` holds
/// exactly.
///
/// The hour fields are for display and aggregation. A minute count that is
/// not a multiple of 3 has no finite decimal form in hours, so they are
/// rounded to [`HOURS_SCALE`] places. Pay is computed from the minute fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursCalculation {
    /// Exact sum of worked minutes.
    pub total_minutes: i64,
    /// Minutes paid at the plain rate.
    pub regular_minutes: i64,
    /// Total hours worked.
    pub total_hours: Decimal,
    /// Hours paid at the plain rate.
    pub regular_hours: Decimal,
    /// Hours beyond the overtime threshold.
    pub overtime_hours: Decimal,
}

impl HoursCalculation {
    /// Builds the breakdown from total and regular minutes.
    ///
    /// `regular_minutes` is clamped to `0..=total_minutes`.
    pub fn from_minutes(total_minutes: i64, regular_minutes: i64) -> Self {
        let total_minutes = total_minutes.max(0);
        let regular_minutes = regular_minutes.clamp(0, total_minutes);
        let total_hours = hours_from_minutes(total_minutes);
        let regular_hours = hours_from_minutes(regular_minutes);
        Self {
            total_minutes,
            regular_minutes,
            total_hours,
            regular_hours,
            overtime_hours: total_hours - regular_hours,
        }
    }

    /// Minutes beyond the overtime threshold.
    pub fn overtime_minutes(&self) -> i64 {
        self.total_minutes - self.regular_minutes
    }

    /// A breakdown with no hours at all.
    pub fn zero() -> Self {
        Self::from_minutes(0, 0)
    }
}

/// One attendance record as it appears on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLine {
    /// The source record.
    pub record_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// The working date.
    pub date: NaiveDate,
    /// Clock-in time.
    pub entry_time: Option<NaiveDateTime>,
    /// Clock-out time.
    pub exit_time: Option<NaiveDateTime>,
    /// The status from the record, or derived from the schedule when untagged.
    pub status: AttendanceStatus,
    /// Hours worked inside the report range.
    pub worked_hours: Decimal,
    /// Worked hours as a percentage of the scheduled hours for the date,
    /// capped at 100. Absent when nothing was scheduled for the date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_percentage: Option<Decimal>,
}

/// One consumption record as it appears on a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionLine {
    /// The source record.
    pub record_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// When the consumption happened.
    pub timestamp: NaiveDateTime,
    /// The amount charged.
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
}

/// One employee's attendance, consumption and pay for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The employee the report is for.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// The range the report covers.
    pub range: DateRange,
    /// Attendance lines ordered by date, then entry time.
    pub attendance_lines: Vec<AttendanceLine>,
    /// Consumption lines ordered by timestamp.
    pub consumption_lines: Vec<ConsumptionLine>,
    /// Hour breakdown over the range.
    pub hours: HoursCalculation,
    /// Sum of consumption amounts.
    pub total_consumption: Decimal,
    /// Pay owed for the range.
    pub total_earnings: Decimal,
}

impl Report {
    /// Earnings minus consumption. May be negative.
    pub fn net_pay(&self) -> Decimal {
        self.total_earnings - self.total_consumption
    }

    /// Whether the report is worth sending to the employee.
    ///
    /// A report needs at least one present or late attendance line, or any
    /// consumption. Hourly employees with no hours are skipped as well.
    pub fn is_reportable(&self, employee: &Employee) -> bool {
        let attended = self
            .attendance_lines
            .iter()
            .any(|line| line.status.is_attended());
        if !attended && self.consumption_lines.is_empty() {
            return false;
        }
        !(employee.is_hourly() && self.hours.total_minutes == 0)
    }
}

/// A day on which an employee worked past their schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSuggestion {
    /// The employee the suggestion is for.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// The date with extra time.
    pub date: NaiveDate,
    /// Minutes worked beyond the schedule. Always positive.
    pub extra_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRole, EmployeeStatus, OvertimeRate, PaymentMethod, PaymentType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_employee(payment_type: PaymentType) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            role: EmployeeRole::Waiter,
            payment_type,
            hourly_rate: dec("10.00"),
            salary: Some(dec("500.00")),
            pays_overtime: false,
            overtime_rate: OvertimeRate::FiftyPercent,
            payment_method: PaymentMethod::Cash,
            status: EmployeeStatus::Active,
        }
    }

    fn create_line(status: AttendanceStatus) -> AttendanceLine {
        AttendanceLine {
            record_id: "att_001".to_string(),
            employee_name: "Ana Ruiz".to_string(),
            date: make_date("2026-03-02"),
            entry_time: None,
            exit_time: None,
            status,
            worked_hours: Decimal::ZERO,
            attendance_percentage: None,
        }
    }

    fn create_report(
        attendance_lines: Vec<AttendanceLine>,
        consumption_lines: Vec<ConsumptionLine>,
        hours: HoursCalculation,
    ) -> Report {
        Report {
            employee_id: "emp_001".to_string(),
            employee_name: "Ana Ruiz".to_string(),
            range: DateRange::new(make_date("2026-03-02"), make_date("2026-03-08")).unwrap(),
            attendance_lines,
            consumption_lines,
            hours,
            total_consumption: dec("19.75"),
            total_earnings: dec("90.00"),
        }
    }

    #[test]
    fn test_hours_from_minutes() {
        assert_eq!(hours_from_minutes(540), dec("9"));
        assert_eq!(hours_from_minutes(90), dec("1.5"));
        assert_eq!(hours_from_minutes(20), dec("0.3333333333"));
    }

    /// HC-001: total equals regular plus overtime
    #[test]
    fn test_from_minutes_total_equals_regular_plus_overtime() {
        let hours = HoursCalculation::from_minutes(2700, 2400);
        assert_eq!(hours.total_hours, dec("45"));
        assert_eq!(hours.regular_hours, dec("40"));
        assert_eq!(hours.overtime_hours, dec("5"));
        assert_eq!(hours.total_hours, hours.regular_hours + hours.overtime_hours);
    }

    #[test]
    fn test_from_minutes_invariant_with_repeating_fractions() {
        let hours = HoursCalculation::from_minutes(451, 161);
        assert_eq!(hours.total_hours, hours.regular_hours + hours.overtime_hours);
        assert!(hours.overtime_hours >= Decimal::ZERO);
    }

    #[test]
    fn test_from_minutes_clamps_regular() {
        let hours = HoursCalculation::from_minutes(60, 120);
        assert_eq!(hours.regular_minutes, 60);
        assert_eq!(hours.overtime_minutes(), 0);
        assert_eq!(hours.regular_hours, dec("1"));
        assert_eq!(hours.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_net_pay_may_be_negative() {
        let mut report = create_report(vec![], vec![], HoursCalculation::zero());
        report.total_earnings = dec("10.00");
        report.total_consumption = dec("25.50");
        assert_eq!(report.net_pay(), dec("-15.50"));
    }

    #[test]
    fn test_report_with_only_absences_is_not_reportable() {
        let report = create_report(
            vec![create_line(AttendanceStatus::Absent)],
            vec![],
            HoursCalculation::zero(),
        );
        assert!(!report.is_reportable(&create_employee(PaymentType::Salaried)));
    }

    #[test]
    fn test_hourly_report_with_zero_hours_is_not_reportable() {
        let report = create_report(
            vec![create_line(AttendanceStatus::Present)],
            vec![],
            HoursCalculation::zero(),
        );
        assert!(!report.is_reportable(&create_employee(PaymentType::Hourly)));
        assert!(report.is_reportable(&create_employee(PaymentType::Salaried)));
    }

    #[test]
    fn test_hourly_report_with_hours_is_reportable() {
        let report = create_report(
            vec![create_line(AttendanceStatus::Late)],
            vec![],
            HoursCalculation::from_minutes(480, 480),
        );
        assert!(report.is_reportable(&create_employee(PaymentType::Hourly)));
    }

    #[test]
    fn test_attendance_percentage_omitted_when_absent() {
        let json = serde_json::to_string(&create_line(AttendanceStatus::Present)).unwrap();
        assert!(!json.contains("attendance_percentage"));

        let mut line = create_line(AttendanceStatus::Present);
        line.attendance_percentage = Some(dec("87.5"));
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"attendance_percentage\":\"87.5\""));
    }

    #[test]
    fn test_hours_calculation_serialization() {
        let hours = HoursCalculation::from_minutes(540, 540);
        let json = serde_json::to_string(&hours).unwrap();
        assert!(json.contains("\"total_minutes\":540"));
        assert!(json.contains("\"total_hours\":\"9\""));
        assert!(json.contains("\"overtime_hours\":\"0\""));
    }
}
