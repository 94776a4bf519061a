//! Manager KPI calculation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee, EmployeeKpiSummary, ManagerKpis, Report};

use super::manager_report::index_reports;

/// Calculates headline figures for the manager dashboard.
///
/// Headcounts cover every employee. Totals and rankings cover active
/// employees only, so reports for inactive employees are accepted but
/// ignored. Rankings keep the `top_n` highest values, ties in employee order,
/// and leave out employees whose value is zero.
///
/// # Errors
///
/// - `InvalidDateRange` if the range end precedes its start
/// - `ReportGenerationFailed` if an active employee has no report, a report
///   is duplicated or covers a different range, or a total overflows
/// - `EmployeeNotFound` if a report belongs to an employee not in the list
pub fn calculate_manager_kpis(
    range: &DateRange,
    employees: &[Employee],
    reports: &[Report],
    top_n: usize,
) -> EngineResult<ManagerKpis> {
    range.validate()?;
    let by_employee = index_reports(range, employees, reports)?;

    let mut entries = Vec::new();
    for employee in employees.iter().filter(|e| e.is_active()) {
        let report = by_employee.get(employee.id.as_str()).ok_or_else(|| {
            EngineError::ReportGenerationFailed {
                message: format!("no report for active employee '{}'", employee.id),
            }
        })?;
        entries.push(EmployeeKpiSummary {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            total_hours_worked: report.hours.total_hours,
            total_consumptions: report.total_consumption,
        });
    }

    let total_active_employees = entries.len();
    let total_hours_worked =
        checked_total(&entries, "total_hours_worked", |e| e.total_hours_worked)?;
    let total_consumptions =
        checked_total(&entries, "total_consumptions", |e| e.total_consumptions)?;

    let top_employees_by_hours = top_by(&entries, top_n, |e| e.total_hours_worked);
    let top_employees_by_consumptions = top_by(&entries, top_n, |e| e.total_consumptions);

    debug!(
        active = total_active_employees,
        total_hours_worked = %total_hours_worked,
        total_consumptions = %total_consumptions,
        "Calculated manager KPIs"
    );

    Ok(ManagerKpis {
        range: *range,
        total_active_employees,
        total_inactive_employees: employees.len() - total_active_employees,
        total_hours_worked,
        total_consumptions,
        top_employees_by_hours,
        top_employees_by_consumptions,
    })
}

fn checked_total(
    entries: &[EmployeeKpiSummary],
    column: &str,
    value: impl Fn(&EmployeeKpiSummary) -> Decimal,
) -> EngineResult<Decimal> {
    entries.iter().try_fold(Decimal::ZERO, |total, entry| {
        total
            .checked_add(value(entry))
            .ok_or_else(|| EngineError::ReportGenerationFailed {
                message: format!(
                    "{} overflows after adding employee '{}'",
                    column, entry.employee_id
                ),
            })
    })
}

fn top_by(
    entries: &[EmployeeKpiSummary],
    top_n: usize,
    value: impl Fn(&EmployeeKpiSummary) -> Decimal,
) -> Vec<EmployeeKpiSummary> {
    let mut ranked: Vec<EmployeeKpiSummary> = entries
        .iter()
        .filter(|e| value(e) > Decimal::ZERO)
        .cloned()
        .collect();
    // stable sort keeps employee order among ties
    ranked.sort_by(|a, b| value(b).cmp(&value(a)));
    ranked.truncate(top_n);
    ranked
}
