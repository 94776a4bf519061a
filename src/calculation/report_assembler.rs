//! Per-employee report assembly.
//!
//! This module combines one employee's attendance and consumption lines with
//! the computed hours and pay into a [`Report`]. It is the main entry point
//! for single-employee calculations.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceLine, ConsumptionLine, DateRange, Employee, EmployeeRecords, Report,
    hours_from_minutes,
};

use super::attendance::{attendance_percentage, resolve_status};
use super::hours::calculate_hours;
use super::pay::{PayInput, calculate_pay};

/// Builds the report for one employee over `range`.
///
/// The range is checked before anything else, so an inverted range never
/// yields a partial report. Consumption amounts and schedules are validated
/// next. Attendance lines are ordered by date then entry time and consumption
/// lines by timestamp.
///
/// # Errors
///
/// - `InvalidDateRange` if the range end precedes its start
/// - `InvalidConsumptionData` for a non-positive consumption amount, or when
///   the consumption total overflows
/// - `InvalidSchedule` for a schedule that does not end after it starts
/// - `InvalidAttendanceData` for a record with exit at or before entry
/// - `InvalidPayInput` for a negative rate or a salaried employee with no salary
pub fn assemble_report(
    employee: &Employee,
    range: &DateRange,
    records: &EmployeeRecords,
    config: &PayrollConfig,
) -> EngineResult<Report> {
    range.validate()?;
    for consumption in &records.consumptions {
        consumption.validate()?;
    }
    for schedule in &records.schedules {
        schedule.duration_minutes()?;
    }

    let mut attendance: Vec<_> = records.attendance.iter().collect();
    attendance.sort_by_key(|r| (r.date, r.entry_time));

    let attendance_lines = attendance
        .into_iter()
        .map(|record| {
            let worked_minutes = record.worked_minutes_within(range)?;
            Ok(AttendanceLine {
                record_id: record.id.clone(),
                employee_name: employee.name.clone(),
                date: record.date,
                entry_time: record.entry_time,
                exit_time: record.exit_time,
                status: resolve_status(record, &records.schedules),
                worked_hours: hours_from_minutes(worked_minutes),
                attendance_percentage: attendance_percentage(
                    record.date,
                    worked_minutes,
                    &records.schedules,
                )?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let mut consumption_lines: Vec<ConsumptionLine> = records
        .consumptions
        .iter()
        .map(|consumption| ConsumptionLine {
            record_id: consumption.id.clone(),
            employee_name: employee.name.clone(),
            timestamp: consumption.timestamp,
            amount: consumption.amount,
            description: consumption.description.clone(),
        })
        .collect();
    consumption_lines.sort_by_key(|line| line.timestamp);

    let hours = calculate_hours(employee, range, &records.attendance, &config.overtime)?;
    let total_consumption = consumption_lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| {
            total
                .checked_add(line.amount)
                .ok_or_else(|| EngineError::InvalidConsumptionData {
                    record_id: line.record_id.clone(),
                    message: "total consumption is too large to calculate".to_string(),
                })
        })?;
    let pay = calculate_pay(
        &PayInput::for_employee(employee, &hours)?,
        config.money.scale,
    )?;

    debug!(
        employee_id = %employee.id,
        attendance_lines = attendance_lines.len(),
        consumption_lines = consumption_lines.len(),
        total_hours = %hours.total_hours,
        total_consumption = %total_consumption,
        total_earnings = %pay.total_pay,
        "Assembled report"
    );

    Ok(Report {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        range: *range,
        attendance_lines,
        consumption_lines,
        hours,
        total_consumption,
        total_earnings: pay.total_pay,
    })
}
