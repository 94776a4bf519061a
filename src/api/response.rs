//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and maps every
//! [`EngineError`] onto an HTTP status and a stable error code.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(code: &str, error: &EngineError, details: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::with_details(code, error.to_string(), details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::InvalidDateRange { .. } => Self::bad_request(
                "INVALID_DATE_RANGE",
                &error,
                "The range end date must not precede its start date",
            ),
            EngineError::InvalidAttendanceData { .. } => Self::bad_request(
                "INVALID_ATTENDANCE",
                &error,
                "Attendance exit time must be after entry time",
            ),
            EngineError::InvalidConsumptionData { .. } => Self::bad_request(
                "INVALID_CONSUMPTION",
                &error,
                "Consumption amounts must be positive",
            ),
            EngineError::InvalidSchedule { .. } => Self::bad_request(
                "INVALID_SCHEDULE",
                &error,
                "Schedule end time must be after start time",
            ),
            EngineError::InvalidPayInput { .. } => Self::bad_request(
                "INVALID_PAY_INPUT",
                &error,
                "The employee's pay settings contain invalid values",
            ),
            EngineError::InvalidPaymentMethod { .. } => Self::bad_request(
                "INVALID_PAYMENT_METHOD",
                &error,
                "The payment method is missing a required field",
            ),
            EngineError::EmployeeNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", error.to_string()),
            },
            EngineError::ReportGenerationFailed { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "REPORT_GENERATION_FAILED",
                    error.to_string(),
                    "Every employee must match exactly one report",
                ),
            },
            EngineError::RecordSourceError { .. } => Self {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("RECORD_SOURCE_ERROR", error.to_string()),
            },
            EngineError::DeliveryFailed { .. } => Self {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("DELIVERY_FAILED", error.to_string()),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_date_range_is_bad_request() {
        let response: ApiErrorResponse = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_DATE_RANGE");
        assert!(response.error.message.contains("2026-03-02"));
    }

    #[test]
    fn test_employee_not_found_is_404() {
        let response: ApiErrorResponse = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[test]
    fn test_report_generation_failed_is_422() {
        let response: ApiErrorResponse = EngineError::ReportGenerationFailed {
            message: "no report for employee 'emp_002'".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "REPORT_GENERATION_FAILED");
    }

    #[test]
    fn test_config_errors_are_500() {
        let response: ApiErrorResponse = EngineError::InvalidConfig {
            field: "money.scale".to_string(),
            message: "must be at most 10".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "CONFIG_ERROR");
    }
}
