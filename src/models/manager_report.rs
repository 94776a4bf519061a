//! Manager-level aggregates.
//!
//! [`ManagerReport`] rolls per-employee reports into one summary row per
//! employee plus totals. [`ManagerKpis`] is the lighter dashboard view with
//! headcounts and top-N rankings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{DateRange, PaymentMethod};

/// One employee's row on the manager report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee the row is for.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// Total hours worked.
    pub hours_worked: Decimal,
    /// Hours paid at the plain rate.
    pub regular_hours: Decimal,
    /// Hours beyond the overtime threshold.
    pub overtime_hours: Decimal,
    /// Pay owed for the range.
    pub total_earnings: Decimal,
    /// Sum of consumption charges.
    pub total_consumptions: Decimal,
    /// Earnings minus consumptions. May be negative.
    pub net_pay: Decimal,
    /// Where the net pay should go.
    pub payment_method: PaymentMethod,
}

/// Column sums over every [`EmployeeSummary`] in a manager report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Sum of hours worked.
    pub total_hours_worked: Decimal,
    /// Sum of regular hours.
    pub total_regular_hours: Decimal,
    /// Sum of overtime hours.
    pub total_overtime_hours: Decimal,
    /// Sum of earnings.
    pub total_earnings: Decimal,
    /// Sum of consumptions.
    pub total_consumptions: Decimal,
    /// Sum of net pay.
    pub total_net_pay: Decimal,
}

impl ReportTotals {
    /// Adds one summary row into the running totals.
    ///
    /// Fails with `ReportGenerationFailed` if a column sum would overflow. The
    /// totals are left untouched in that case.
    pub fn add(&mut self, summary: &EmployeeSummary) -> EngineResult<()> {
        let sum = |total: Decimal, value: Decimal, column: &str| {
            total
                .checked_add(value)
                .ok_or_else(|| EngineError::ReportGenerationFailed {
                    message: format!(
                        "{} overflows after adding employee '{}'",
                        column, summary.employee_id
                    ),
                })
        };

        *self = Self {
            total_hours_worked: sum(
                self.total_hours_worked,
                summary.hours_worked,
                "total_hours_worked",
            )?,
            total_regular_hours: sum(
                self.total_regular_hours,
                summary.regular_hours,
                "total_regular_hours",
            )?,
            total_overtime_hours: sum(
                self.total_overtime_hours,
                summary.overtime_hours,
                "total_overtime_hours",
            )?,
            total_earnings: sum(self.total_earnings, summary.total_earnings, "total_earnings")?,
            total_consumptions: sum(
                self.total_consumptions,
                summary.total_consumptions,
                "total_consumptions",
            )?,
            total_net_pay: sum(self.total_net_pay, summary.net_pay, "total_net_pay")?,
        };
        Ok(())
    }
}

/// Aggregate of every employee's report for one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerReport {
    /// The range the report covers.
    pub range: DateRange,
    /// One row per employee, in the order employees were supplied.
    pub employee_summaries: Vec<EmployeeSummary>,
    /// Column sums over the rows.
    pub totals: ReportTotals,
}

/// An entry in a KPI top-N list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeKpiSummary {
    /// The employee the entry is for.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// Hours worked in the range.
    pub total_hours_worked: Decimal,
    /// Consumption charged in the range.
    pub total_consumptions: Decimal,
}

/// Headline numbers for the manager dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerKpis {
    /// The range the figures cover.
    pub range: DateRange,
    /// Employees with active status.
    pub total_active_employees: usize,
    /// Employees with inactive status.
    pub total_inactive_employees: usize,
    /// Hours worked across all employees.
    pub total_hours_worked: Decimal,
    /// Consumption across all employees.
    pub total_consumptions: Decimal,
    /// Employees with the most hours, highest first. Zero-hour employees are left out.
    pub top_employees_by_hours: Vec<EmployeeKpiSummary>,
    /// Employees with the most consumption, highest first. Zero-consumption
    /// employees are left out.
    pub top_employees_by_consumptions: Vec<EmployeeKpiSummary>,
}
