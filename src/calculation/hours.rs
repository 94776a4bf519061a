//! Hours calculation functionality.
//!
//! This module turns one employee's attendance records into a
//! [`HoursCalculation`]. Worked time is summed as whole minutes and converted
//! to hours once, so large record sets do not accumulate rounding drift.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::OvertimePolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, DateRange, Employee, HoursCalculation};

/// Calculates total, regular and overtime hours for an employee.
///
/// Each record's interval is validated and clipped to the range window.
/// Open shifts count as zero. When the employee is paid overtime, worked
/// minutes are grouped into the policy's buckets by record date and
/// everything above the threshold in a bucket is overtime. Otherwise all
/// hours are regular.
///
/// # Errors
///
/// - `InvalidDateRange` if the range end precedes its start
/// - `InvalidAttendanceData` if any record has exit at or before entry
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_hours;
/// use payroll_engine::config::OvertimePolicy;
/// use payroll_engine::models::{
///     AttendanceRecord, AttendanceStatus, DateRange, Employee, EmployeeRole, EmployeeStatus,
///     OvertimeRate, PaymentMethod, PaymentType,
/// };
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ana Ruiz".to_string(),
///     email: "ana@example.com".to_string(),
///     role: EmployeeRole::Waiter,
///     payment_type: PaymentType::Hourly,
///     hourly_rate: Decimal::new(1000, 2),
///     salary: None,
///     pays_overtime: false,
///     overtime_rate: OvertimeRate::FiftyPercent,
///     payment_method: PaymentMethod::Cash,
///     status: EmployeeStatus::Active,
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").ok();
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date,
///     entry_time: at("2026-03-02 09:00"),
///     exit_time: at("2026-03-02 17:30"),
///     status: Some(AttendanceStatus::Present),
/// };
/// let range = DateRange::new(date, date).unwrap();
///
/// let hours = calculate_hours(&employee, &range, &[record], &OvertimePolicy::default()).unwrap();
/// assert_eq!(hours.total_hours, Decimal::new(85, 1));
/// assert_eq!(hours.overtime_hours, Decimal::ZERO);
/// ```
pub fn calculate_hours(
    employee: &Employee,
    range: &DateRange,
    records: &[AttendanceRecord],
    policy: &OvertimePolicy,
) -> EngineResult<HoursCalculation> {
    range.validate()?;

    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in records {
        let minutes = record.worked_minutes_within(range)?;
        *buckets.entry(policy.bucket_start(record.date)).or_insert(0) += minutes;
    }

    let total_minutes: i64 = buckets.values().sum();
    let regular_minutes = if employee.pays_overtime {
        let threshold = policy.threshold_minutes();
        buckets.values().map(|minutes| (*minutes).min(threshold)).sum()
    } else {
        total_minutes
    };

    let hours = HoursCalculation::from_minutes(total_minutes, regular_minutes);
    debug!(
        employee_id = %employee.id,
        records = records.len(),
        buckets = buckets.len(),
        total_minutes,
        regular_hours = %hours.regular_hours,
        overtime_hours = %hours.overtime_hours,
        "Calculated hours"
    );
    Ok(hours)
}
