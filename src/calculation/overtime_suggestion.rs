//! Overtime suggestion functionality.
//!
//! Compares scheduled against actual minutes per date and flags the dates on
//! which an employee worked past their schedule. The output is advisory and
//! never feeds into pay.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, DateRange, Employee, OvertimeSuggestion, Schedule};

/// Flags dates in `range` where worked minutes exceed scheduled minutes.
///
/// Schedules are grouped by start date and attendance by record date, and
/// both are summed per date. A date needs both a schedule and attendance to
/// be considered. Suggestions are ordered by date.
///
/// # Errors
///
/// - `InvalidDateRange` if the range end precedes its start
/// - `InvalidAttendanceData` if a record in range has exit at or before entry
/// - `InvalidSchedule` if a schedule in range ends at or before its start
pub fn suggest_overtime(
    employee: &Employee,
    range: &DateRange,
    schedules: &[Schedule],
    records: &[AttendanceRecord],
) -> EngineResult<Vec<OvertimeSuggestion>> {
    range.validate()?;

    let mut scheduled: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for schedule in schedules.iter().filter(|s| range.contains_date(s.date())) {
        *scheduled.entry(schedule.date()).or_insert(0) += schedule.duration_minutes()?;
    }

    let mut worked: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in records.iter().filter(|r| range.contains_date(r.date)) {
        *worked.entry(record.date).or_insert(0) += record.worked_minutes()?;
    }

    let suggestions: Vec<OvertimeSuggestion> = worked
        .into_iter()
        .filter_map(|(date, actual)| {
            let planned = scheduled.get(&date)?;
            let extra_minutes = actual - planned;
            (extra_minutes > 0).then(|| OvertimeSuggestion {
                employee_id: employee.id.clone(),
                employee_name: employee.name.clone(),
                date,
                extra_minutes,
            })
        })
        .collect();

    debug!(
        employee_id = %employee.id,
        suggestions = suggestions.len(),
        "Suggested overtime"
    );
    Ok(suggestions)
}
