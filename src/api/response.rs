//! Response types for the scheduling API.
//!
//! This module defines the success bodies and the error response
//! structures returned by the HTTP API.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{DailyLabor, LaborSummary, RequiredHeadcount, WeeklyLabor};
use crate::error::EngineError;

/// Response body for `/headcount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadcountResponse {
    /// One record per event per role.
    pub requirements: Vec<RequiredHeadcount>,
    /// Requirements summed by `"date|role"`.
    pub merged: BTreeMap<String, u32>,
}

/// Response body for `/labor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborResponse {
    /// The Monday the week starts on.
    pub week_start: NaiveDate,
    /// Seven per-day totals.
    pub daily: Vec<DailyLabor>,
    /// One total per employee.
    pub weekly: Vec<WeeklyLabor>,
    /// Week roll-up.
    pub summary: LaborSummary,
}

/// One employee's row of cell colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellColorRow {
    /// The employee.
    pub employee_id: String,
    /// Monday through Sunday; `None` means default background.
    pub colors: Vec<Option<String>>,
}

/// Response body for `/cell-colors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellColorsResponse {
    /// The Monday the week starts on.
    pub week_start: NaiveDate,
    /// Rows in roster order.
    pub rows: Vec<CellColorRow>,
}

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidWeek { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_WEEK",
                    format!("Invalid week identifier: {}", value),
                    "Weeks are identified by an ISO date (YYYY-MM-DD)",
                ),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
            EngineError::StoreRead { .. }
            | EngineError::StoreWrite { .. }
            | EngineError::StoreCorrupt { .. }
            | EngineError::UnsupportedStoreVersion { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Storage error", error.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_week_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidWeek {
            value: "soon".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_WEEK");
    }

    #[test]
    fn test_store_errors_map_to_server_error() {
        let api_error: ApiErrorResponse = EngineError::StoreCorrupt {
            key: "attendance".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "STORE_ERROR");
        assert!(api_error.error.details.unwrap().contains("attendance"));
    }
}
