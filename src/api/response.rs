//! Response types for the shift scheduler API.
//!
//! This module defines the JSON bodies returned by the handlers and the
//! mapping from [`SchedulerError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::{FormattedHours, MonthAnchor, MonthlyWorkingHours, Shift, ShiftType};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// The request field the message refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
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
            field: None,
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
            details: Some(details.into()),
            ..Self::new(code, message)
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
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn status_for(error: &SchedulerError) -> StatusCode {
    match error {
        SchedulerError::DuplicateShift { .. } | SchedulerError::StorageConflict { .. } => {
            StatusCode::CONFLICT
        }
        SchedulerError::InvalidShiftType { .. }
        | SchedulerError::InvalidDate { .. }
        | SchedulerError::MissingField { .. } => StatusCode::BAD_REQUEST,
        SchedulerError::Forbidden { .. } => StatusCode::FORBIDDEN,
        SchedulerError::NotFound { .. } => StatusCode::NOT_FOUND,
        SchedulerError::CorruptRecord { .. }
        | SchedulerError::Database(_)
        | SchedulerError::Migration(_)
        | SchedulerError::ConfigNotFound { .. }
        | SchedulerError::ConfigParseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SchedulerError> for ApiErrorResponse {
    fn from(error: SchedulerError) -> Self {
        let status = status_for(&error);

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            ApiError::with_details(error.kind(), "Internal server error", error.to_string())
        } else {
            ApiError {
                field: error.field().map(str::to_string),
                ..ApiError::new(error.kind(), error.to_string())
            }
        };

        ApiErrorResponse {
            status,
            error: body,
        }
    }
}

/// A shift as shown on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftResponse {
    /// Shift id.
    pub id: i64,
    /// Employee id.
    pub employee: i64,
    /// Shift date.
    pub shift_date: NaiveDate,
    /// Shift type code.
    pub shift_type: ShiftType,
    /// Shift type label, used as the calendar title.
    pub title: String,
    /// Start date and time.
    pub start: NaiveDateTime,
    /// End date and time.
    pub end: NaiveDateTime,
    /// Whether the shift falls on a weekend.
    pub is_weekend: bool,
    /// Whether the shift is still an availability request.
    pub is_available: bool,
    /// Calendar styling class: `"available"` for availability requests,
    /// otherwise the shift type label.
    pub class_name: String,
}

impl From<Shift> for ShiftResponse {
    fn from(shift: Shift) -> Self {
        let class_name = if shift.is_available {
            "available".to_string()
        } else {
            shift.shift_type.label().to_string()
        };

        Self {
            id: shift.id,
            employee: shift.employee_id,
            shift_date: shift.date,
            shift_type: shift.shift_type,
            title: shift.shift_type.label().to_string(),
            start: shift.starts_at(),
            end: shift.ends_at(),
            is_weekend: shift.is_weekend,
            is_available: shift.is_available,
            class_name,
        }
    }
}

/// One employee's monthly hours, with display strings.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyHoursResponse {
    /// Employee id.
    pub employee: i64,
    /// The month, as its first day.
    pub month_year: MonthAnchor,
    /// Total hours.
    pub total_hours: Decimal,
    /// Weekday hours.
    pub weekday_hours: Decimal,
    /// Weekend hours.
    pub weekend_hours: Decimal,
    /// Monday to Thursday hours after 19:00.
    pub after_19_hours: Decimal,
    /// The same buckets as `"<h> hours <m> minutes"`.
    pub formatted: FormattedHours,
}

impl From<MonthlyWorkingHours> for MonthlyHoursResponse {
    fn from(hours: MonthlyWorkingHours) -> Self {
        let formatted = hours.formatted();
        Self {
            employee: hours.employee_id,
            month_year: hours.month_year,
            total_hours: hours.total_hours,
            weekday_hours: hours.weekday_hours,
            weekend_hours: hours.weekend_hours,
            after_19_hours: hours.after_19_hours,
            formatted,
        }
    }
}

/// Acknowledgement for mutations with no body of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// What happened.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewShift;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("field"));
    }

    #[test]
    fn test_duplicate_maps_to_conflict_with_field() {
        let error = SchedulerError::DuplicateShift {
            employee_id: 1,
            date: make_date("2024-12-04"),
            shift_type: ShiftType::Day,
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "DUPLICATE_SHIFT");
        assert_eq!(response.error.field.as_deref(), Some("shift_type"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                SchedulerError::InvalidShiftType {
                    value: "NIGHT".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                SchedulerError::InvalidDate {
                    field: "shift_date".to_string(),
                    value: "2024-13-01".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                SchedulerError::MissingField {
                    field: "employee".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                SchedulerError::Forbidden {
                    action: "approve shifts".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                SchedulerError::NotFound {
                    resource: "Shift".to_string(),
                    id: "9".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                SchedulerError::StorageConflict {
                    message: "UNIQUE constraint failed".to_string(),
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (error, expected) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, expected, "{}", response.error.code);
        }
    }

    #[test]
    fn test_internal_errors_hide_message_in_details() {
        let error = SchedulerError::CorruptRecord {
            table: "shifts".to_string(),
            message: "bad type".to_string(),
        };
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.message, "Internal server error");
        assert!(response.error.details.unwrap().contains("bad type"));
    }

    #[test]
    fn test_shift_response_class_name() {
        let available = NewShift::derive(1, make_date("2024-12-06"), ShiftType::Evening, true).into_shift(5);
        let response = ShiftResponse::from(available);
        assert_eq!(response.class_name, "available");
        assert_eq!(response.title, "Evening Shift");
        assert_eq!(response.start.to_string(), "2024-12-06 15:00:00");
        assert_eq!(response.end.to_string(), "2024-12-06 22:00:00");

        let assigned = NewShift::derive(1, make_date("2024-12-06"), ShiftType::Day, false).into_shift(6);
        assert_eq!(ShiftResponse::from(assigned).class_name, "Day Shift");
    }

    #[test]
    fn test_monthly_hours_response_serializes_formatted() {
        let mut hours = MonthlyWorkingHours::empty(1, MonthAnchor::new(2024, 12).unwrap());
        hours.total_hours = Decimal::new(65, 1);
        hours.weekday_hours = Decimal::new(65, 1);
        hours.after_19_hours = Decimal::from(3);

        let json = serde_json::to_value(MonthlyHoursResponse::from(hours)).unwrap();
        assert_eq!(json["month_year"], "2024-12-01");
        assert_eq!(json["total_hours"], "6.5");
        assert_eq!(json["formatted"]["total"], "6 hours 30 minutes");
        assert_eq!(json["formatted"]["after_19"], "3 hours 0 minutes");
    }
}
