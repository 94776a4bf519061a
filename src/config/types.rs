//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default, so a partial or empty document is valid.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest monetary scale accepted in configuration.
pub const MAX_MONEY_SCALE: u32 = 10;

/// The window over which the overtime threshold is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvertimePeriod {
    /// One bucket per 7-day week.
    #[default]
    Weekly,
    /// One bucket per calendar day.
    Daily,
}

/// How worked time is split into regular and overtime hours.
///
/// Worked minutes are grouped into buckets by the attendance record's date.
/// Within each bucket the first `threshold_hours` are regular and the rest
/// are overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimePolicy {
    /// Bucket size.
    pub period: OvertimePeriod,
    /// Regular hours allowed per bucket.
    pub threshold_hours: Decimal,
    /// First day of a weekly bucket. Ignored for daily buckets.
    pub week_starts_on: Weekday,
}

impl Default for OvertimePolicy {
    fn default() -> Self {
        Self {
            period: OvertimePeriod::Weekly,
            threshold_hours: Decimal::from(40),
            week_starts_on: Weekday::Mon,
        }
    }
}

impl OvertimePolicy {
    /// A daily policy with the given threshold.
    pub fn daily(threshold_hours: Decimal) -> Self {
        Self {
            period: OvertimePeriod::Daily,
            threshold_hours,
            ..Self::default()
        }
    }

    /// A Monday-anchored weekly policy with the given threshold.
    pub fn weekly(threshold_hours: Decimal) -> Self {
        Self {
            threshold_hours,
            ..Self::default()
        }
    }

    /// The threshold in whole minutes, rounded to the nearest minute.
    pub fn threshold_minutes(&self) -> i64 {
        (self.threshold_hours * Decimal::from(60))
            .round()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// The first date of the bucket `date` falls into.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::OvertimePolicy;
    /// use chrono::NaiveDate;
    ///
    /// let policy = OvertimePolicy::default();
    /// // Thursday 2026-03-05 belongs to the week starting Monday 2026-03-02
    /// let bucket = policy.bucket_start(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
    /// assert_eq!(bucket, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    /// ```
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self.period {
            OvertimePeriod::Daily => date,
            OvertimePeriod::Weekly => {
                let offset = (7 + date.weekday().num_days_from_monday()
                    - self.week_starts_on.num_days_from_monday())
                    % 7;
                date - Duration::days(i64::from(offset))
            }
        }
    }

    /// Checks that the threshold is positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.threshold_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "overtime.threshold_hours".to_string(),
                message: format!("must be positive, got {}", self.threshold_hours),
            });
        }
        Ok(())
    }
}

/// Monetary rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyConfig {
    /// Decimal places kept on monetary results, rounded half-up.
    pub scale: u32,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self { scale: 2 }
    }
}

/// Report delivery settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Recipient of the manager report.
    pub manager_email: String,
    /// Length of each KPI ranking.
    pub kpi_top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            manager_email: "manager@example.com".to_string(),
            kpi_top_n: 5,
        }
    }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Regular/overtime split.
    pub overtime: OvertimePolicy,
    /// Monetary rounding.
    pub money: MoneyConfig,
    /// Report delivery.
    pub reports: ReportConfig,
}

impl PayrollConfig {
    /// Checks every section, failing with `InvalidConfig` on the first
    /// out-of-range value.
    pub fn validate(&self) -> EngineResult<()> {
        self.overtime.validate()?;
        if self.money.scale > MAX_MONEY_SCALE {
            return Err(EngineError::InvalidConfig {
                field: "money.scale".to_string(),
                message: format!("must be at most {}, got {}", MAX_MONEY_SCALE, self.money.scale),
            });
        }
        Ok(())
    }
}
