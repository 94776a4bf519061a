//! Date range model.
//!
//! This module contains the [`DateRange`] type that bounds every report
//! computation. Ranges are inclusive on dates and are turned into a half-open
//! timestamp window when worked time is compared against them.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
/// ).unwrap();
///
/// assert!(range.contains_date(NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()));
/// assert_eq!(range.day_count(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// The first date of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last date of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, failing with `InvalidDateRange` if `end` precedes `start`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let range = Self {
            start_date,
            end_date,
        };
        range.validate()?;
        Ok(range)
    }

    /// Checks that the end date does not precede the start date.
    ///
    /// Ranges deserialized from requests bypass [`DateRange::new`], so every
    /// calculator calls this before doing any work.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// The Monday to Sunday week before the week containing `today`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// // Wednesday 2026-03-11
    /// let range = DateRange::previous_week(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
    /// assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    /// assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
    /// ```
    pub fn previous_week(today: NaiveDate) -> Self {
        let this_monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let start_date = this_monday - Duration::days(7);
        Self {
            start_date,
            end_date: start_date + Duration::days(6),
        }
    }

    /// The seven days ending on `end_date`.
    pub fn trailing_week(end_date: NaiveDate) -> Self {
        Self {
            start_date: end_date - Duration::days(6),
            end_date,
        }
    }

    /// Every day of a calendar month, or `None` if `month` is out of range.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self {
            start_date,
            end_date: next_start.pred_opt()?,
        })
    }

    /// Checks if a given date falls within this range, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of calendar days covered by the range.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Midnight at the start of the first day.
    pub fn window_start(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::default())
    }

    /// Midnight after the last day. The timestamp window is `[window_start, window_end)`.
    pub fn window_end(&self) -> NaiveDateTime {
        self.end_date
            .succ_opt()
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::default())
    }

    /// Checks if a timestamp falls within the half-open window of this range.
    pub fn contains_timestamp(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.window_start() && timestamp < self.window_end()
    }
}
