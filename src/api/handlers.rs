//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler loads the request's records into an in-memory source and runs the
//! matching [`ReportingService`] operation over it.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::service::{InMemoryRecords, ReportingService};

use super::request::{EmployeeReportRequest, ManagerReportRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reports/employee", post(employee_report_handler))
        .route("/reports/manager", post(manager_report_handler))
        .route("/overtime/suggestions", post(overtime_suggestions_handler))
        .route("/kpis", post(kpis_handler))
        .with_state(state)
}

/// Handler for POST /reports/employee.
async fn employee_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee report request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let range = request.range;
    let result = request.into_source().and_then(|(employee_id, source)| {
        service(&state, source).employee_report(&employee_id, &range)
    });
    complete(result, correlation_id, start_time, "Employee report")
}

/// Handler for POST /reports/manager.
async fn manager_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManagerReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing manager report request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let range = request.range;
    let result = request
        .into_source()
        .and_then(|source| service(&state, source).manager_report(&range));
    complete(result, correlation_id, start_time, "Manager report")
}

/// Handler for POST /overtime/suggestions.
async fn overtime_suggestions_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime suggestion request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let range = request.range;
    let result = request
        .into_source()
        .and_then(|(_, source)| service(&state, source).overtime_suggestions(&range));
    complete(result, correlation_id, start_time, "Overtime suggestions")
}

/// Handler for POST /kpis.
async fn kpis_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManagerReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing KPI request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let range = request.range;
    let result = request
        .into_source()
        .and_then(|source| service(&state, source).manager_kpis(&range));
    complete(result, correlation_id, start_time, "Manager KPIs")
}

fn service(state: &AppState, source: InMemoryRecords) -> ReportingService<InMemoryRecords> {
    ReportingService::new(source, state.config().config().clone())
}

/// Renders a calculation outcome, logging it against the request.
fn complete<T: Serialize>(
    result: EngineResult<T>,
    correlation_id: Uuid,
    start_time: Instant,
    operation: &str,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = start_time.elapsed().as_micros(),
                "Request completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}
