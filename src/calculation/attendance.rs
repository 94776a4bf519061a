//! Attendance metrics.
//!
//! Per-line attendance percentage against the schedule, late/present
//! classification of a clock-in, and the monthly attendance rate.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, DateRange, Schedule};

/// Decimal places kept on percentages.
pub const PERCENTAGE_SCALE: u32 = 2;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Worked minutes as a percentage of the minutes scheduled on `date`.
///
/// Schedules are matched by their start date and summed. The result is
/// capped at 100 and rounded to [`PERCENTAGE_SCALE`] places. Returns `None`
/// when nothing is scheduled on `date`.
///
/// # Errors
///
/// `InvalidSchedule` if a matching schedule ends at or before its start.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::attendance_percentage;
/// use payroll_engine::models::Schedule;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let schedule = Schedule {
///     id: "sch_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     start_time: at("2026-03-02 09:00"),
///     end_time: at("2026-03-02 17:00"),
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
///
/// let percentage = attendance_percentage(date, 420, &[schedule]).unwrap();
/// assert_eq!(percentage, Some(Decimal::new(8750, 2)));
/// ```
pub fn attendance_percentage(
    date: NaiveDate,
    worked_minutes: i64,
    schedules: &[Schedule],
) -> EngineResult<Option<Decimal>> {
    let mut scheduled_minutes = 0;
    for schedule in schedules.iter().filter(|s| s.date() == date) {
        scheduled_minutes += schedule.duration_minutes()?;
    }
    if scheduled_minutes == 0 {
        return Ok(None);
    }

    let percentage = Decimal::from(worked_minutes) * ONE_HUNDRED / Decimal::from(scheduled_minutes);
    Ok(Some(percentage.min(ONE_HUNDRED).round_dp(PERCENTAGE_SCALE)))
}

/// Classifies a clock-in as present or late.
///
/// The schedule whose start is nearest to `entry` is used, looking at
/// schedules that start between the day before the entry date and the end of
/// the day after. Entry after that start is late. With no candidate schedule
/// the employee is present.
pub fn classify_attendance(entry: NaiveDateTime, schedules: &[Schedule]) -> AttendanceStatus {
    let entry_date = entry.date();
    let window_start = (entry_date - Duration::days(1)).and_time(NaiveTime::default());
    let window_end = (entry_date + Duration::days(2)).and_time(NaiveTime::default());

    let nearest = schedules
        .iter()
        .filter(|s| s.start_time >= window_start && s.start_time < window_end)
        .min_by_key(|s| (s.start_time - entry).num_seconds().abs());

    match nearest {
        Some(schedule) if entry > schedule.start_time => {
            debug!(
                schedule_id = %schedule.id,
                minutes_late = (entry - schedule.start_time).num_minutes(),
                "Classified entry as late"
            );
            AttendanceStatus::Late
        }
        _ => AttendanceStatus::Present,
    }
}

/// The status shown for a record on a report.
///
/// A tag set by the record source wins. Otherwise a record with an entry
/// time is classified against `schedules`, and one without is absent.
pub fn resolve_status(record: &AttendanceRecord, schedules: &[Schedule]) -> AttendanceStatus {
    match (record.status, record.entry_time) {
        (Some(status), _) => status,
        (None, Some(entry)) => classify_attendance(entry, schedules),
        (None, None) => AttendanceStatus::Absent,
    }
}

/// Share of a month's days on which the employee clocked in.
///
/// Counts distinct record dates inside the month that have an entry time,
/// divided by the number of days in the month, as a percentage rounded to
/// [`PERCENTAGE_SCALE`] places. Returns `None` if `year`/`month` is not a
/// calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::monthly_attendance_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(monthly_attendance_percentage(&[], 2026, 2), Some(Decimal::ZERO));
/// assert_eq!(monthly_attendance_percentage(&[], 2026, 13), None);
/// ```
pub fn monthly_attendance_percentage(
    records: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> Option<Decimal> {
    let month = DateRange::month(year, month)?;

    let attended: HashSet<NaiveDate> = records
        .iter()
        .filter(|r| r.entry_time.is_some())
        .map(|r| r.date)
        .filter(|d| month.contains_date(*d))
        .collect();

    let percentage =
        Decimal::from(attended.len() as i64) * ONE_HUNDRED / Decimal::from(month.day_count());
    Some(percentage.round_dp(PERCENTAGE_SCALE))
}
