//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine:
//! employees, the records they generate, the ranges reports are computed
//! over, and the derived report values.

mod date_range;
mod employee;
mod manager_report;
mod records;
mod report;

pub use date_range::DateRange;
pub use employee::{
    BankAccountType, Employee, EmployeeRole, EmployeeStatus, OvertimeRate, PaymentMethod,
    PaymentType,
};
pub use manager_report::{
    EmployeeKpiSummary, EmployeeSummary, ManagerKpis, ManagerReport, ReportTotals,
};
pub use records::{
    AttendanceRecord, AttendanceStatus, ConsumptionRecord, EmployeeRecords, Schedule,
};
pub use report::{
    AttendanceLine, ConsumptionLine, HOURS_SCALE, HoursCalculation, OvertimeSuggestion, Report,
    hours_from_minutes,
};
