//! HTTP request handlers for the shift engine API.
//!
//! This module contains the handler functions for all API endpoints.

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

use crate::calculation::{advise_break, aggregate_records, generate_suggestions, validate_slot};
use crate::error::EngineError;
use crate::models::{AvailabilityWindow, ValidationResult};

use super::request::{
    BreakAdviceRequest, ComplianceRequest, SuggestionsRequest, ValidateRequest, convert_shifts,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/suggestions", post(suggestions_handler))
        .route("/validate", post(validate_handler))
        .route("/break-advice", post(break_advice_handler))
        .route("/compliance", post(compliance_handler))
        .with_state(state)
}

/// Handler for POST /suggestions.
///
/// Returns the Journée / Matin / Après-midi / Personnalisé slots for one
/// employee, date and availability window.
async fn suggestions_handler(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing suggestions request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let prepared = request
        .availability_window()
        .and_then(|window| Ok((window, convert_shifts(&request.shifts)?)));
    let (window, shifts) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let suggestions = generate_suggestions(
        &window,
        &shifts,
        &state.config().scheduling().suggestions,
    );
    info!(
        correlation_id = %correlation_id,
        employee_id = %window.employee_id,
        date = %window.date,
        valid_count = suggestions.iter().filter(|s| s.is_valid).count(),
        duration_us = start_time.elapsed().as_micros(),
        "Suggestions generated"
    );
    json_response(StatusCode::OK, suggestions)
}

/// Handler for POST /validate.
///
/// Rule violations are part of a successful response; only unparsable input
/// is rejected.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let (window, result) = match perform_validation(&state, &request) {
        Ok(validated) => validated,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %window.employee_id,
        date = %window.date,
        is_valid = result.is_valid,
        error_count = result.errors.len(),
        warning_count = result.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Validation completed"
    );
    json_response(StatusCode::OK, result)
}

/// Parses a validation request and runs the slot rules against it.
fn perform_validation(
    state: &AppState,
    request: &ValidateRequest,
) -> Result<(AvailabilityWindow, ValidationResult), EngineError> {
    let window = request.availability_window()?;
    let candidate = request.candidate.to_candidate()?;
    let shifts = convert_shifts(&request.shifts)?;
    let config = state.config_with_limits(request.legal_limits.clone())?;
    let result = validate_slot(&candidate, &window, &shifts, config.legal_limits());
    Ok((window, result))
}

/// Handler for POST /break-advice.
async fn break_advice_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakAdviceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing break advice request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let (start, end) = match request.bounds() {
        Ok(bounds) => bounds,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let config = state.config();
    let advice = advise_break(
        start,
        end,
        &config.scheduling().break_advice,
        config.legal_limits(),
    );
    info!(
        correlation_id = %correlation_id,
        should_suggest = advice.should_suggest,
        break_minutes = advice.break_duration_minutes,
        "Break advice computed"
    );
    json_response(StatusCode::OK, advice)
}

/// Handler for POST /compliance.
///
/// Malformed shift rows do not fail the request: their employees are listed
/// in `skipped_employees` and everyone else is reported.
async fn compliance_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComplianceRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compliance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let prepared = request
        .week()
        .and_then(|week| Ok((week, state.config_with_limits(request.legal_limits.clone())?)));
    let (week, config) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let report = aggregate_records(&week, &request.employees, &request.shifts, &config);
    info!(
        correlation_id = %correlation_id,
        report_id = %report.report_id,
        week_start = %week.start_date,
        employees_count = report.employee_compliance.len(),
        skipped_count = report.skipped_employees.len(),
        score = report.score,
        duration_us = start_time.elapsed().as_micros(),
        "Compliance report generated"
    );
    json_response(StatusCode::OK, report)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{ComplianceReport, RuleCode};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post(uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    fn morning_shift() -> Value {
        json!({
            "id": "shift_001",
            "employee_id": "emp_001",
            "date": "2026-03-10",
            "start_time": "09:00:00",
            "end_time": "13:00:00",
            "type": "morning"
        })
    }

    // API-001: suggestions for an open window
    #[tokio::test]
    async fn test_api_001_suggestions_returns_four_slots() {
        let body = json!({
            "employee_id": "emp_001",
            "date": "2026-03-10",
            "availability": {"start": "08:30", "end": "20:30"}
        });
        let (status, bytes) = post("/suggestions", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let slots: Value = serde_json::from_slice(&bytes).unwrap();
        let slots = slots.as_array().unwrap();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0]["id"], "full");
        assert_eq!(slots[0]["is_valid"], true);
    }

    // API-002: overlapping candidate is reported, not rejected
    #[tokio::test]
    async fn test_api_002_validate_reports_overlap() {
        let body = json!({
            "employee_id": "emp_001",
            "date": "2026-03-10",
            "availability": {"start": "08:30", "end": "20:30"},
            "candidate": {"start": "12:00", "end": "16:00"},
            "shifts": [morning_shift()]
        });
        let (status, bytes) = post("/validate", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let result: ValidationResult = serde_json::from_slice(&bytes).unwrap();
        assert!(!result.is_valid);
        assert!(result.error_codes().contains(&RuleCode::ShiftOverlap));
    }

    // API-003: a request-level limits override is applied
    #[tokio::test]
    async fn test_api_003_validate_with_limits_override() {
        let body = json!({
            "employee_id": "emp_001",
            "date": "2026-03-10",
            "availability": {"start": "08:00", "end": "20:00"},
            "candidate": {"start": "08:00", "end": "17:00", "break_duration_minutes": 30},
            "legal_limits": {
                "max_daily_hours": "8",
                "max_weekly_hours": "35",
                "min_rest_hours_weekly": "35",
                "min_pharmacists": 1,
                "break_required": true,
                "break_threshold_hours": "6",
                "break_duration_minutes": 20
            }
        });
        let (status, bytes) = post("/validate", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let result: ValidationResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(result.error_codes(), vec![RuleCode::DailyHoursExceeded]);
    }

    // API-004: unparsable time is a structured 400
    #[tokio::test]
    async fn test_api_004_invalid_time_returns_400() {
        let body = json!({
            "employee_id": "emp_001",
            "date": "2026-03-10",
            "availability": {"start": "8h30", "end": "20:30"},
            "candidate": {"start": "12:00", "end": "16:00"}
        });
        let (status, bytes) = post("/validate", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_TIME");
    }

    // API-005: missing field is a validation error
    #[tokio::test]
    async fn test_api_005_missing_field_returns_validation_error() {
        let body = json!({"employee_id": "emp_001"});
        let (status, bytes) = post("/suggestions", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    // API-006: syntax errors
    #[tokio::test]
    async fn test_api_006_malformed_json_returns_400() {
        let (status, bytes) = post("/break-advice", "{ not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_break_advice_for_long_slot() {
        let body = json!({"start": "09:00", "end": "17:00"});
        let (status, bytes) = post("/break-advice", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let advice: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(advice["should_suggest"], true);
        assert_eq!(advice["break_duration_minutes"], 30);
    }

    #[tokio::test]
    async fn test_compliance_skips_malformed_rows() {
        let body = json!({
            "week_start": "2026-03-09",
            "employees": [
                {"id": "emp_001", "first_name": "Claire", "last_name": "Martin", "role": "pharmacist"},
                {"id": "emp_002", "first_name": "Hugo", "last_name": "Petit", "role": "preparer"}
            ],
            "shifts": [
                morning_shift(),
                {
                    "id": "shift_bad",
                    "employee_id": "emp_002",
                    "date": "2026-03-10",
                    "start_time": "nine",
                    "end_time": "13:00"
                }
            ]
        });
        let (status, bytes) = post("/compliance", body.to_string()).await;
        assert_eq!(status, StatusCode::OK);

        let report: ComplianceReport = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report.employee_compliance.len(), 1);
        assert_eq!(report.skipped_employees.len(), 1);
        assert_eq!(report.skipped_employees[0].employee_id, "emp_002");
    }

    #[tokio::test]
    async fn test_compliance_inverted_week_returns_400() {
        let body = json!({
            "week_start": "2026-03-15",
            "week_end": "2026-03-09",
            "employees": []
        });
        let (status, bytes) = post("/compliance", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "INVALID_WEEK");
    }
}
