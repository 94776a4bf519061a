//! Manager report aggregation.
//!
//! Joins the employee list to their pre-computed reports by employee ID and
//! rolls them up into a [`ManagerReport`]. The join is strict: every employee
//! needs exactly one report and every report needs a known employee.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee, EmployeeSummary, ManagerReport, Report, ReportTotals};

/// Indexes reports by employee ID, checking the range and rejecting
/// duplicates and reports for employees not in `employees`.
pub(crate) fn index_reports<'a>(
    range: &DateRange,
    employees: &[Employee],
    reports: &'a [Report],
) -> EngineResult<HashMap<&'a str, &'a Report>> {
    let mut by_employee: HashMap<&str, &Report> = HashMap::with_capacity(reports.len());
    for report in reports {
        if report.range != *range {
            return Err(EngineError::ReportGenerationFailed {
                message: format!(
                    "report for employee '{}' covers {} to {}, expected {} to {}",
                    report.employee_id,
                    report.range.start_date,
                    report.range.end_date,
                    range.start_date,
                    range.end_date
                ),
            });
        }
        if !employees.iter().any(|e| e.id == report.employee_id) {
            return Err(EngineError::EmployeeNotFound {
                employee_id: report.employee_id.clone(),
            });
        }
        if by_employee.insert(report.employee_id.as_str(), report).is_some() {
            return Err(EngineError::ReportGenerationFailed {
                message: format!("duplicate report for employee '{}'", report.employee_id),
            });
        }
    }
    Ok(by_employee)
}

/// Builds the summary row for one employee.
pub fn summarize_employee(employee: &Employee, report: &Report) -> EmployeeSummary {
    EmployeeSummary {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        hours_worked: report.hours.total_hours,
        regular_hours: report.hours.regular_hours,
        overtime_hours: report.hours.overtime_hours,
        total_earnings: report.total_earnings,
        total_consumptions: report.total_consumption,
        net_pay: report.net_pay(),
        payment_method: employee.payment_method.clone(),
    }
}

/// Aggregates per-employee reports into a manager report.
///
/// Summaries follow the order of `employees`. Totals are accumulated from
/// the summary rows themselves, so each total is exactly the sum of its
/// column.
///
/// # Errors
///
/// - `InvalidDateRange` if the range end precedes its start
/// - `ReportGenerationFailed` if an employee has no report, a report is
///   duplicated, a report covers a different range, or a total overflows
/// - `EmployeeNotFound` if a report belongs to an employee not in the list
pub fn calculate_manager_report(
    range: &DateRange,
    employees: &[Employee],
    reports: &[Report],
) -> EngineResult<ManagerReport> {
    range.validate()?;
    let by_employee = index_reports(range, employees, reports)?;

    let mut employee_summaries = Vec::with_capacity(employees.len());
    let mut totals = ReportTotals::default();
    for employee in employees {
        let report = by_employee.get(employee.id.as_str()).ok_or_else(|| {
            EngineError::ReportGenerationFailed {
                message: format!("no report for employee '{}'", employee.id),
            }
        })?;
        let summary = summarize_employee(employee, report);
        totals.add(&summary)?;
        employee_summaries.push(summary);
    }

    debug!(
        employees = employee_summaries.len(),
        total_earnings = %totals.total_earnings,
        total_net_pay = %totals.total_net_pay,
        "Aggregated manager report"
    );

    Ok(ManagerReport {
        range: *range,
        employee_summaries,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EmployeeRole, EmployeeStatus, HoursCalculation, OvertimeRate, PaymentMethod, PaymentType,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_week() -> DateRange {
        DateRange::new(make_date("2026-03-02"), make_date("2026-03-08")).unwrap()
    }

    fn create_employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            role: EmployeeRole::Waiter,
            payment_type: PaymentType::Hourly,
            hourly_rate: dec("10.00"),
            salary: None,
            pays_overtime: true,
            overtime_rate: OvertimeRate::FiftyPercent,
            payment_method: PaymentMethod::MobileWallet {
                phone_number: "6000-0000".to_string(),
            },
            status: EmployeeStatus::Active,
        }
    }

    fn create_report(
        employee_id: &str,
        total_minutes: i64,
        regular_minutes: i64,
        earnings: &str,
        consumption: &str,
    ) -> Report {
        Report {
            employee_id: employee_id.to_string(),
            employee_name: String::new(),
            range: create_week(),
            attendance_lines: vec![],
            consumption_lines: vec![],
            hours: HoursCalculation::from_minutes(total_minutes, regular_minutes),
            total_consumption: dec(consumption),
            total_earnings: dec(earnings),
        }
    }

    fn scenario_inputs() -> (Vec<Employee>, Vec<Report>) {
        let employees = vec![
            create_employee("emp_001", "Ana Ruiz"),
            create_employee("emp_002", "Luis Vega"),
        ];
        let reports = vec![
            create_report("emp_002", 2700, 2400, "475.00", "0"),
            create_report("emp_001", 540, 540, "90.00", "19.75"),
        ];
        (employees, reports)
    }

    // ==========================================================================
    // MGR-001: totals equal the sums of two summaries
    // ==========================================================================
    #[test]
    fn test_mgr_001_totals_equal_manual_sums() {
        let (employees, reports) = scenario_inputs();

        let report = calculate_manager_report(&create_week(), &employees, &reports).unwrap();

        let first = &report.employee_summaries[0];
        let second = &report.employee_summaries[1];
        assert_eq!(report.totals.total_earnings, first.total_earnings + second.total_earnings);
        assert_eq!(report.totals.total_earnings, dec("565.00"));
        assert_eq!(report.totals.total_consumptions, dec("19.75"));
        assert_eq!(report.totals.total_net_pay, dec("545.25"));
        assert_eq!(report.totals.total_hours_worked, dec("54"));
        assert_eq!(report.totals.total_regular_hours, dec("49"));
        assert_eq!(report.totals.total_overtime_hours, dec("5"));
    }

    // ==========================================================================
    // MGR-002: summaries follow employee order, not report order
    // ==========================================================================
    #[test]
    fn test_mgr_002_summary_order_follows_employees() {
        let (employees, reports) = scenario_inputs();

        let report = calculate_manager_report(&create_week(), &employees, &reports).unwrap();

        let ids: Vec<&str> = report
            .employee_summaries
            .iter()
            .map(|s| s.employee_id.as_str())
            .collect();
        assert_eq!(ids, vec!["emp_001", "emp_002"]);
        assert_eq!(report.employee_summaries[0].employee_name, "Ana Ruiz");
    }

    // ==========================================================================
    // MGR-003: missing report fails the whole aggregation
    // ==========================================================================
    #[test]
    fn test_mgr_003_missing_report_fails() {
        let (employees, mut reports) = scenario_inputs();
        reports.retain(|r| r.employee_id != "emp_002");

        let err = calculate_manager_report(&create_week(), &employees, &reports).unwrap_err();

        match err {
            EngineError::ReportGenerationFailed { message } => {
                assert!(message.contains("emp_002"));
            }
            other => panic!("Expected ReportGenerationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_net_pay_can_be_negative() {
        let employees = vec![create_employee("emp_001", "Ana Ruiz")];
        let reports = vec![create_report("emp_001", 60, 60, "10.00", "35.00")];

        let report = calculate_manager_report(&create_week(), &employees, &reports).unwrap();

        assert_eq!(report.employee_summaries[0].net_pay, dec("-25.00"));
        assert_eq!(report.totals.total_net_pay, dec("-25.00"));
    }

    #[test]
    fn test_duplicate_report_fails() {
        let (employees, mut reports) = scenario_inputs();
        reports.push(create_report("emp_001", 60, 60, "10.00", "0"));

        let err = calculate_manager_report(&create_week(), &employees, &reports).unwrap_err();
        assert!(matches!(err, EngineError::ReportGenerationFailed { .. }));
    }

    #[test]
    fn test_report_for_unknown_employee_fails() {
        let (employees, mut reports) = scenario_inputs();
        reports.push(create_report("emp_999", 60, 60, "10.00", "0"));

        let err = calculate_manager_report(&create_week(), &employees, &reports).unwrap_err();
        assert!(matches!(err, EngineError::EmployeeNotFound { ref employee_id } if employee_id == "emp_999"));
    }

    #[test]
    fn test_report_for_other_range_fails() {
        let (employees, mut reports) = scenario_inputs();
        reports[0].range = DateRange::trailing_week(make_date("2026-03-15"));

        let err = calculate_manager_report(&create_week(), &employees, &reports).unwrap_err();
        assert!(matches!(err, EngineError::ReportGenerationFailed { .. }));
    }

    #[test]
    fn test_earnings_overflow_fails_instead_of_panicking() {
        let (employees, mut reports) = scenario_inputs();
        for report in &mut reports {
            report.total_earnings = Decimal::MAX;
            report.total_consumption = Decimal::ZERO;
        }

        let err = calculate_manager_report(&create_week(), &employees, &reports).unwrap_err();
        assert!(matches!(err, EngineError::ReportGenerationFailed { .. }));
    }

    #[test]
    fn test_no_employees_gives_zero_totals() {
        let report = calculate_manager_report(&create_week(), &[], &[]).unwrap();

        assert!(report.employee_summaries.is_empty());
        assert_eq!(report.totals, ReportTotals::default());
    }

    #[test]
    fn test_summary_carries_payment_method() {
        let (employees, reports) = scenario_inputs();

        let report = calculate_manager_report(&create_week(), &employees, &reports).unwrap();

        assert_eq!(
            report.employee_summaries[0].payment_method,
            PaymentMethod::MobileWallet {
                phone_number: "6000-0000".to_string()
            }
        );
    }
}
