//! HTTP request handlers for the scheduling API.
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
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    cell_color_for, daily_totals, estimate_headcount_for_event, merge_requirements,
    parse_iso_date, start_of_week, summarize, week_days, weekly_totals,
};
use crate::error::{EngineError, EngineResult};

use super::request::{CellColorsRequest, HeadcountRequest, LaborRequest};
use super::response::{
    ApiError, ApiErrorResponse, CellColorRow, CellColorsResponse, HeadcountResponse,
    LaborResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/headcount", post(headcount_handler))
        .route("/labor", post(labor_handler))
        .route("/cell-colors", post(cell_colors_handler))
        .with_state(state)
}

/// Handler for POST /headcount.
///
/// Estimates staffing for each event and sums the requirements by date and role.
async fn headcount_handler(
    State(state): State<AppState>,
    payload: Result<Json<HeadcountRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing headcount request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let rules = request
        .roles
        .as_deref()
        .unwrap_or(state.config().headcount_rules());

    let requirements: Vec<_> = request
        .events
        .iter()
        .flat_map(|event| estimate_headcount_for_event(event, rules))
        .collect();
    let merged = merge_requirements(&requirements);

    info!(
        correlation_id = %correlation_id,
        events = request.events.len(),
        roles = rules.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Headcount estimated"
    );

    json_response(
        StatusCode::OK,
        &HeadcountResponse {
            requirements,
            merged,
        },
    )
}

/// Handler for POST /labor.
///
/// Aggregates daily and weekly hours, overtime and cost for one week.
async fn labor_handler(
    State(state): State<AppState>,
    payload: Result<Json<LaborRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing labor request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let week_start = match resolve_week(&request.week_start) {
        Ok(week_start) => week_start,
        Err(err) => return error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let policy = state.config().labor();
    let daily = daily_totals(week_start, &request.shifts, &request.employees, policy);
    let weekly = weekly_totals(week_start, &request.shifts, &request.employees, policy);
    let summary = summarize(&weekly, request.weekly_labor_budget);

    info!(
        correlation_id = %correlation_id,
        week_start = %week_start,
        employees = request.employees.len(),
        shifts = request.shifts.len(),
        total_dollars = %summary.total_dollars,
        duration_us = start_time.elapsed().as_micros(),
        "Labor totals computed"
    );

    json_response(
        StatusCode::OK,
        &LaborResponse {
            week_start,
            daily,
            weekly,
            summary,
        },
    )
}

/// Handler for POST /cell-colors.
///
/// Evaluates the conditional rules for every employee/day cell of a week.
async fn cell_colors_handler(
    payload: Result<Json<CellColorsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cell color request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let week_start = match resolve_week(&request.week_start) {
        Ok(week_start) => week_start,
        Err(err) => return error_response(err, correlation_id),
    };

    let days = week_days(week_start);
    let rows: Vec<CellColorRow> = request
        .employees
        .iter()
        .map(|employee| CellColorRow {
            employee_id: employee.id.clone(),
            colors: days
                .iter()
                .map(|&date| {
                    let shift = request
                        .shifts
                        .iter()
                        .find(|s| s.date == date && s.is_for(&employee.id));
                    cell_color_for(shift, date, &request.rules)
                })
                .collect(),
        })
        .collect();

    info!(
        correlation_id = %correlation_id,
        week_start = %week_start,
        cells = rows.len() * days.len(),
        "Cell colors evaluated"
    );

    json_response(StatusCode::OK, &CellColorsResponse { week_start, rows })
}

/// Parses a week identifier and normalizes it to its Monday.
fn resolve_week(value: &str) -> EngineResult<NaiveDate> {
    parse_iso_date(value)
        .map(start_of_week)
        .ok_or_else(|| EngineError::InvalidWeek {
            value: value.to_string(),
        })
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

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

    json_response(StatusCode::BAD_REQUEST, &error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = create_router(AppState::default())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
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
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_resolve_week_normalizes_to_monday() {
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        assert_eq!(resolve_week("2026-01-15").unwrap(), monday);
        assert!(matches!(
            resolve_week("15/01/2026"),
            Err(EngineError::InvalidWeek { .. })
        ));
    }

    #[tokio::test]
    async fn test_headcount_returns_200() {
        let (status, body) = post_json(
            "/headcount",
            json!({ "events": [ { "id": "beo_1", "date": "2026-06-06", "guest_count": 250 } ] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requirements"].as_array().unwrap().len(), 8);
        assert_eq!(body["merged"]["2026-06-06|server"], 10);
    }

    #[tokio::test]
    async fn test_labor_rejects_bad_week() {
        let (status, body) = post_json(
            "/labor",
            json!({ "week_start": "next week", "employees": [] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_WEEK");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let (status, body) = post_json("/cell-colors", json!({ "employees": [] })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
