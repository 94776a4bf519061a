//! HTTP API module for the payroll engine.
//!
//! A thin stateless adapter: requests carry their own employees and records,
//! responses are the computed reports, and engine errors become JSON error
//! bodies with a matching status code.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeEntry, EmployeeReportRequest, ManagerReportRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
