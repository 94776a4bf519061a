//! Report orchestration over external ports.
//!
//! The calculators in [`crate::calculation`] are pure and take their records
//! as arguments. This module holds the seams around them:
//!
//! - [`RecordSource`] is the read-only query port for employees and records.
//! - [`ReportNotifier`] and [`ManagerReportRenderer`] are the outbound ports
//!   for finished reports.
//! - [`ReportingService`] fetches records through the source, runs the
//!   calculators, and hands results to the outbound ports.
//!
//! [`InMemoryRecords`] implements the source over owned vectors, for tests
//! and for callers that already hold every record (such as the HTTP API).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{
    PayCalculation, PayInput, assemble_report, calculate_hours, calculate_manager_kpis,
    calculate_manager_report, calculate_pay, monthly_attendance_percentage, suggest_overtime,
};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, ConsumptionRecord, DateRange, Employee, EmployeeRecords, ManagerKpis,
    ManagerReport, OvertimeSuggestion, Report, Schedule,
};

/// Read-only queries against employee and record storage.
pub trait RecordSource: Send + Sync {
    /// Attendance records for an employee whose date falls in `range`.
    fn find_attendance_by_employee_and_range(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Consumption records for an employee whose timestamp falls in `range`.
    fn find_consumption_by_employee_and_range(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<ConsumptionRecord>>;

    /// Schedules for an employee that start in `range`.
    fn find_schedules_by_employee_and_range(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<Schedule>>;

    /// Every employee, active or not.
    fn find_all_employees(&self) -> EngineResult<Vec<Employee>>;

    /// One employee by ID.
    fn find_employee_by_id(&self, employee_id: &str) -> EngineResult<Option<Employee>>;
}

/// Delivers finished reports to people.
pub trait ReportNotifier: Send + Sync {
    /// Sends an employee their own report.
    fn send_employee_report(&self, employee: &Employee, report: &Report) -> EngineResult<()>;

    /// Sends the manager report to `recipient`.
    fn send_manager_report(&self, recipient: &str, report: &ManagerReport) -> EngineResult<()>;
}

/// Turns a manager report into a document such as a PDF.
pub trait ManagerReportRenderer: Send + Sync {
    /// Renders the report and returns the document bytes.
    fn render(&self, report: &ManagerReport) -> EngineResult<Vec<u8>>;
}

/// Outcome of a weekly per-employee delivery run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySummary {
    /// Employees whose report was delivered.
    pub sent: Vec<String>,
    /// Employees whose report failed to deliver.
    pub failed: Vec<String>,
}

/// A [`RecordSource`] backed by in-memory collections.
///
/// # Example
///
/// ```
/// use payroll_engine::service::{InMemoryRecords, RecordSource};
///
/// let records = InMemoryRecords::new();
/// assert!(records.find_all_employees().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecords {
    employees: BTreeMap<String, Employee>,
    records: BTreeMap<String, EmployeeRecords>,
}

impl InMemoryRecords {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee and their records, replacing any earlier entry with
    /// the same ID.
    pub fn insert(&mut self, employee: Employee, records: EmployeeRecords) {
        self.records.insert(employee.id.clone(), records);
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Builder form of [`InMemoryRecords::insert`].
    pub fn with(mut self, employee: Employee, records: EmployeeRecords) -> Self {
        self.insert(employee, records);
        self
    }

    fn records_of(&self, employee_id: &str) -> Option<&EmployeeRecords> {
        self.records.get(employee_id)
    }
}

impl RecordSource for InMemoryRecords {
    fn find_attendance_by_employee_and_range(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .records_of(employee_id)
            .map(|r| {
                r.attendance
                    .iter()
                    .filter(|a| range.contains_date(a.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_consumption_by_employee_and_range(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<ConsumptionRecord>> {
        Ok(self
            .records_of(employee_id)
            .map(|r| {
                r.consumptions
                    .iter()
                    .filter(|c| range.contains_timestamp(c.timestamp))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_schedules_by_employee_and_range(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<Schedule>> {
        Ok(self
            .records_of(employee_id)
            .map(|r| {
                r.schedules
                    .iter()
                    .filter(|s| range.contains_date(s.date()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn find_all_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.values().cloned().collect())
    }

    fn find_employee_by_id(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.employees.get(employee_id).cloned())
    }
}

/// Runs the report pipeline against a [`RecordSource`].
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::DateRange;
/// use payroll_engine::service::{InMemoryRecords, ReportingService};
/// use chrono::NaiveDate;
///
/// let service = ReportingService::new(InMemoryRecords::new(), PayrollConfig::default());
/// let range = DateRange::previous_week(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
///
/// let report = service.manager_report(&range).unwrap();
/// assert!(report.employee_summaries.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ReportingService<S> {
    source: S,
    config: PayrollConfig,
}

impl<S: RecordSource> ReportingService<S> {
    /// Creates a service over `source` using `config`.
    pub fn new(source: S, config: PayrollConfig) -> Self {
        Self { source, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// The report for one employee.
    ///
    /// Fails with `EmployeeNotFound` for an unknown ID.
    pub fn employee_report(&self, employee_id: &str, range: &DateRange) -> EngineResult<Report> {
        range.validate()?;
        let employee = self.employee(employee_id)?;
        let report = self.report_for(&employee, range)?;
        info!(
            employee_id = %employee_id,
            total_earnings = %report.total_earnings,
            "Generated employee report"
        );
        Ok(report)
    }

    /// Hours and pay for one employee, without building the full report.
    pub fn payment_for(&self, employee_id: &str, range: &DateRange) -> EngineResult<PayCalculation> {
        range.validate()?;
        let employee = self.employee(employee_id)?;
        let attendance = self
            .source
            .find_attendance_by_employee_and_range(employee_id, range)?;
        let hours = calculate_hours(&employee, range, &attendance, &self.config.overtime)?;
        calculate_pay(
            &PayInput::for_employee(&employee, &hours)?,
            self.config.money.scale,
        )
    }

    /// Share of the days in a calendar month on which the employee clocked in.
    ///
    /// Returns `None` if `month` is not a calendar month. Fails with
    /// `EmployeeNotFound` for an unknown ID.
    pub fn monthly_attendance(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<Decimal>> {
        let employee = self.employee(employee_id)?;
        let Some(range) = DateRange::month(year, month) else {
            return Ok(None);
        };
        let attendance = self
            .source
            .find_attendance_by_employee_and_range(&employee.id, &range)?;
        Ok(monthly_attendance_percentage(&attendance, year, month))
    }

    /// Reports worth sending to active employees.
    ///
    /// Reports that fail [`Report::is_reportable`] are left out.
    pub fn weekly_employee_reports(
        &self,
        range: &DateRange,
    ) -> EngineResult<Vec<(Employee, Report)>> {
        range.validate()?;
        let mut reports = Vec::new();
        for employee in self.active_employees()? {
            let report = self.report_for(&employee, range)?;
            if report.is_reportable(&employee) {
                reports.push((employee, report));
            }
        }
        info!(
            start_date = %range.start_date,
            end_date = %range.end_date,
            reports = reports.len(),
            "Prepared weekly employee reports"
        );
        Ok(reports)
    }

    /// Sends every report from [`ReportingService::weekly_employee_reports`].
    ///
    /// A failed delivery is logged and recorded in the summary. The run then
    /// continues with the next employee.
    pub fn send_weekly_reports(
        &self,
        range: &DateRange,
        notifier: &dyn ReportNotifier,
    ) -> EngineResult<DeliverySummary> {
        let mut summary = DeliverySummary::default();
        for (employee, report) in self.weekly_employee_reports(range)? {
            match notifier.send_employee_report(&employee, &report) {
                Ok(()) => summary.sent.push(employee.id),
                Err(e) => {
                    warn!(employee_id = %employee.id, error = %e, "Failed to send employee report");
                    summary.failed.push(employee.id);
                }
            }
        }
        info!(
            sent = summary.sent.len(),
            failed = summary.failed.len(),
            "Sent weekly employee reports"
        );
        Ok(summary)
    }

    /// The manager report over every active employee.
    pub fn manager_report(&self, range: &DateRange) -> EngineResult<ManagerReport> {
        range.validate()?;
        let employees = self.active_employees()?;
        let reports = employees
            .iter()
            .map(|employee| self.report_for(employee, range))
            .collect::<EngineResult<Vec<_>>>()?;
        let report = calculate_manager_report(range, &employees, &reports)?;
        info!(
            employees = report.employee_summaries.len(),
            total_net_pay = %report.totals.total_net_pay,
            "Generated manager report"
        );
        Ok(report)
    }

    /// Builds the manager report and sends it to the configured manager
    /// address.
    pub fn send_manager_report(
        &self,
        range: &DateRange,
        notifier: &dyn ReportNotifier,
    ) -> EngineResult<ManagerReport> {
        let report = self.manager_report(range)?;
        let recipient = &self.config.reports.manager_email;
        notifier.send_manager_report(recipient, &report)?;
        info!(recipient = %recipient, "Sent manager report");
        Ok(report)
    }

    /// Builds the manager report and renders it as a document.
    pub fn manager_report_document(
        &self,
        range: &DateRange,
        renderer: &dyn ManagerReportRenderer,
    ) -> EngineResult<Vec<u8>> {
        let report = self.manager_report(range)?;
        let document = renderer.render(&report)?;
        info!(bytes = document.len(), "Rendered manager report");
        Ok(document)
    }

    /// Overtime suggestions for active employees who are not paid overtime,
    /// grouped by employee in ID order and by date within each employee.
    pub fn overtime_suggestions(&self, range: &DateRange) -> EngineResult<Vec<OvertimeSuggestion>> {
        range.validate()?;
        let mut suggestions = Vec::new();
        for employee in self
            .active_employees()?
            .into_iter()
            .filter(|e| !e.pays_overtime)
        {
            let schedules = self
                .source
                .find_schedules_by_employee_and_range(&employee.id, range)?;
            let attendance = self
                .source
                .find_attendance_by_employee_and_range(&employee.id, range)?;
            suggestions.extend(suggest_overtime(&employee, range, &schedules, &attendance)?);
        }
        info!(suggestions = suggestions.len(), "Generated overtime suggestions");
        Ok(suggestions)
    }

    /// Dashboard KPIs over every employee.
    pub fn manager_kpis(&self, range: &DateRange) -> EngineResult<ManagerKpis> {
        range.validate()?;
        let employees = self.source.find_all_employees()?;
        let reports = employees
            .iter()
            .filter(|e| e.is_active())
            .map(|employee| self.report_for(employee, range))
            .collect::<EngineResult<Vec<_>>>()?;
        let kpis =
            calculate_manager_kpis(range, &employees, &reports, self.config.reports.kpi_top_n)?;
        info!(
            active = kpis.total_active_employees,
            inactive = kpis.total_inactive_employees,
            "Calculated manager KPIs"
        );
        Ok(kpis)
    }

    fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.source
            .find_employee_by_id(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn active_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self
            .source
            .find_all_employees()?
            .into_iter()
            .filter(|e| e.is_active())
            .collect())
    }

    fn report_for(&self, employee: &Employee, range: &DateRange) -> EngineResult<Report> {
        let records = EmployeeRecords {
            attendance: self
                .source
                .find_attendance_by_employee_and_range(&employee.id, range)?,
            consumptions: self
                .source
                .find_consumption_by_employee_and_range(&employee.id, range)?,
            schedules: self
                .source
                .find_schedules_by_employee_and_range(&employee.id, range)?,
        };
        assemble_report(employee, range, &records, &self.config)
    }
}
