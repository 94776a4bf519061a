//! Request types for the payroll engine API.
//!
//! The API is stateless, so every request carries the employees and records
//! it should be computed over. Record lists sit at the same level as the
//! employee they belong to.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee, EmployeeRecords};
use crate::service::InMemoryRecords;

/// Request body for the single-employee endpoints.
///
/// Used by `/reports/employee` and `/overtime/suggestions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeReportRequest {
    /// The employee to report on.
    pub employee: Employee,
    /// The range to report over.
    pub range: DateRange,
    /// The employee's records.
    #[serde(flatten)]
    pub records: EmployeeRecords,
}

impl EmployeeReportRequest {
    /// Validates the employee and loads everything into a record source.
    ///
    /// Returns the employee ID alongside the source.
    pub fn into_source(self) -> EngineResult<(String, InMemoryRecords)> {
        self.employee.validate()?;
        let employee_id = self.employee.id.clone();
        let source = InMemoryRecords::new().with(self.employee, self.records);
        Ok((employee_id, source))
    }
}

/// One employee and their records inside a [`ManagerReportRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeEntry {
    /// The employee.
    pub employee: Employee,
    /// The employee's records.
    #[serde(flatten)]
    pub records: EmployeeRecords,
}

/// Request body for the organization-wide endpoints.
///
/// Used by `/reports/manager` and `/kpis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerReportRequest {
    /// The range to report over.
    pub range: DateRange,
    /// Every employee to consider.
    #[serde(default)]
    pub employees: Vec<EmployeeEntry>,
}

impl ManagerReportRequest {
    /// Validates every employee and loads them into a record source.
    ///
    /// Fails with `ReportGenerationFailed` if an employee ID appears twice.
    pub fn into_source(self) -> EngineResult<InMemoryRecords> {
        let mut source = InMemoryRecords::new();
        let mut seen = std::collections::HashSet::new();
        for entry in self.employees {
            entry.employee.validate()?;
            if !seen.insert(entry.employee.id.clone()) {
                return Err(EngineError::ReportGenerationFailed {
                    message: format!("employee '{}' appears more than once", entry.employee.id),
                });
            }
            source.insert(entry.employee, entry.records);
        }
        Ok(source)
    }
}
