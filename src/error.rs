//! Error types for the payroll engine.
//!
//! Every failure in this crate is a data or contract violation. None of them
//! are transient, so callers should surface them rather than retry.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidDateRange {
///     start: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// };
/// assert_eq!(error.to_string(), "Invalid date range: end 2026-03-02 precedes start 2026-03-09");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The end of a date range precedes its start.
    #[error("Invalid date range: end {end} precedes start {start}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// An attendance record has an exit time that is not after its entry time.
    #[error("Invalid attendance record '{record_id}': {message}")]
    InvalidAttendanceData {
        /// The ID of the offending record.
        record_id: String,
        /// A description of the violation.
        message: String,
    },

    /// A consumption record has a non-positive amount.
    #[error("Invalid consumption record '{record_id}': {message}")]
    InvalidConsumptionData {
        /// The ID of the offending record.
        record_id: String,
        /// A description of the violation.
        message: String,
    },

    /// A schedule ends at or before its start.
    #[error("Invalid schedule '{schedule_id}': {message}")]
    InvalidSchedule {
        /// The ID of the offending schedule.
        schedule_id: String,
        /// A description of the violation.
        message: String,
    },

    /// A pay calculation input broke its contract (negative rate or hours,
    /// missing salary).
    #[error("Invalid pay input '{field}': {message}")]
    InvalidPayInput {
        /// The input that was invalid.
        field: String,
        /// A description of the violation.
        message: String,
    },

    /// A payment method is missing a field its variant requires.
    #[error("Invalid {method} payment method: {message}")]
    InvalidPaymentMethod {
        /// The payment method variant.
        method: String,
        /// A description of the missing field.
        message: String,
    },

    /// An employee referenced during aggregation is not known.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee ID.
        employee_id: String,
    },

    /// Manager aggregation could not match every employee to exactly one report.
    #[error("Report generation failed: {message}")]
    ReportGenerationFailed {
        /// A description of the mismatch.
        message: String,
    },

    /// An external record source failed to answer a query.
    #[error("Record source error: {message}")]
    RecordSourceError {
        /// The message reported by the source.
        message: String,
    },

    /// A notifier or renderer could not hand off a report.
    #[error("Failed to deliver report to '{recipient}': {message}")]
    DeliveryFailed {
        /// Who the report was for.
        recipient: String,
        /// The message reported by the outbound port.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is out of its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration key.
        field: String,
        /// A description of the violation.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
