//! HTTP request handlers for the shift scheduler API.
//!
//! Every handler follows the same shape: assign a correlation id, validate
//! the body, delegate to [`ShiftScheduler`](crate::scheduling::ShiftScheduler),
//! log the outcome and map errors with [`ApiErrorResponse`].

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::models::Requester;

use super::request::{CopyShiftRequest, CreateShiftRequest, MonthQuery, MoveShiftRequest};
use super::response::{
    ApiError, ApiErrorResponse, MessageResponse, MonthlyHoursResponse, ShiftResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts", get(list_shifts_handler).post(create_shift_handler))
        .route("/shift-copies", post(copy_shift_handler))
        .route("/shifts/:id", delete(delete_shift_handler))
        .route("/shifts/:id/move", post(move_shift_handler))
        .route("/shifts/:id/approve", post(approve_shift_handler))
        .route("/shifts/:id/reject", post(reject_shift_handler))
        .route("/monthly-hours", get(list_monthly_hours_handler))
        .route(
            "/monthly-hours/employees/:employee_id",
            get(employee_monthly_hours_handler),
        )
        .route("/monthly-hours/recalculate", post(recalculate_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

/// Logs a failed operation and renders the error.
fn failure(correlation_id: Uuid, operation: &str, err: SchedulerError) -> Response {
    let response = ApiErrorResponse::from(err);
    if response.status.is_server_error() {
        error!(
            correlation_id = %correlation_id,
            operation,
            code = %response.error.code,
            details = ?response.error.details,
            "Request failed"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            operation,
            code = %response.error.code,
            message = %response.error.message,
            "Request rejected"
        );
    }
    response.into_response()
}

/// Turns a JSON body rejection into a 400 response.
fn body_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::malformed_json(body_text)
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
    ApiErrorResponse::bad_request(error).into_response()
}

/// Handler for GET /shifts.
async fn list_shifts_handler(
    State(state): State<AppState>,
    requester: Requester,
    Query(query): Query<MonthQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let month = match query.month() {
        Ok(month) => month,
        Err(err) => return failure(correlation_id, "list_shifts", err),
    };

    match state.scheduler().list_shifts(&requester, month).await {
        Ok(shifts) => {
            info!(
                correlation_id = %correlation_id,
                user_id = requester.user_id,
                count = shifts.len(),
                "Listed shifts"
            );
            let body: Vec<ShiftResponse> = shifts.into_iter().map(ShiftResponse::from).collect();
            json_response(StatusCode::OK, body)
        }
        Err(err) => failure(correlation_id, "list_shifts", err),
    }
}

/// Handler for POST /shifts.
async fn create_shift_handler(
    State(state): State<AppState>,
    requester: Requester,
    payload: Result<Json<CreateShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = requester.user_id, "Processing create shift request");

    let command = match payload {
        Ok(Json(request)) => match request.into_command() {
            Ok(command) => command,
            Err(err) => return failure(correlation_id, "create_shift", err),
        },
        Err(rejection) => return body_rejection(correlation_id, rejection),
    };

    match state.scheduler().create_shift(command, &requester).await {
        Ok(shift) => {
            info!(correlation_id = %correlation_id, shift_id = shift.id, "Shift created");
            json_response(StatusCode::CREATED, ShiftResponse::from(shift))
        }
        Err(err) => failure(correlation_id, "create_shift", err),
    }
}

/// Handler for POST /shift-copies.
async fn copy_shift_handler(
    State(state): State<AppState>,
    requester: Requester,
    payload: Result<Json<CopyShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = requester.user_id, "Processing copy shift request");

    let (employee_id, date, shift_type) = match payload {
        Ok(Json(request)) => match request.into_parts() {
            Ok(parts) => parts,
            Err(err) => return failure(correlation_id, "copy_shift", err),
        },
        Err(rejection) => return body_rejection(correlation_id, rejection),
    };

    match state
        .scheduler()
        .copy_shift(employee_id, date, shift_type, &requester)
        .await
    {
        Ok(shift) => {
            info!(correlation_id = %correlation_id, shift_id = shift.id, "Shift copied");
            json_response(StatusCode::CREATED, ShiftResponse::from(shift))
        }
        Err(err) => failure(correlation_id, "copy_shift", err),
    }
}

/// Handler for POST /shifts/:id/move.
async fn move_shift_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(shift_id): Path<i64>,
    payload: Result<Json<MoveShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, shift_id, "Processing move shift request");

    let new_date = match payload {
        Ok(Json(request)) => match request.new_date() {
            Ok(date) => date,
            Err(err) => return failure(correlation_id, "move_shift", err),
        },
        Err(rejection) => return body_rejection(correlation_id, rejection),
    };

    match state
        .scheduler()
        .move_shift(shift_id, new_date, &requester)
        .await
    {
        Ok(shift) => {
            info!(
                correlation_id = %correlation_id,
                previous_shift_id = shift_id,
                shift_id = shift.id,
                "Shift moved"
            );
            json_response(StatusCode::OK, ShiftResponse::from(shift))
        }
        Err(err) => failure(correlation_id, "move_shift", err),
    }
}

/// Handler for POST /shifts/:id/approve.
async fn approve_shift_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(shift_id): Path<i64>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.scheduler().approve_shift(shift_id, &requester).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, shift_id, "Shift approved");
            json_response(StatusCode::OK, MessageResponse::new("Shift approved"))
        }
        Err(err) => failure(correlation_id, "approve_shift", err),
    }
}

/// Handler for POST /shifts/:id/reject.
async fn reject_shift_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(shift_id): Path<i64>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.scheduler().reject_shift(shift_id, &requester).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, shift_id, "Shift rejected");
            json_response(StatusCode::OK, MessageResponse::new("Shift rejected and deleted"))
        }
        Err(err) => failure(correlation_id, "reject_shift", err),
    }
}

/// Handler for DELETE /shifts/:id.
async fn delete_shift_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(shift_id): Path<i64>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.scheduler().delete_shift(shift_id, &requester).await {
        Ok(()) => {
            info!(correlation_id = %correlation_id, shift_id, "Shift deleted");
            json_response(StatusCode::OK, MessageResponse::new("Shift deleted"))
        }
        Err(err) => failure(correlation_id, "delete_shift", err),
    }
}

/// Handler for GET /monthly-hours.
async fn list_monthly_hours_handler(
    State(state): State<AppState>,
    requester: Requester,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.scheduler().list_monthly_hours(&requester).await {
        Ok(records) => {
            let body: Vec<MonthlyHoursResponse> =
                records.into_iter().map(MonthlyHoursResponse::from).collect();
            json_response(StatusCode::OK, body)
        }
        Err(err) => failure(correlation_id, "list_monthly_hours", err),
    }
}

/// Handler for GET /monthly-hours/employees/:employee_id.
async fn employee_monthly_hours_handler(
    State(state): State<AppState>,
    requester: Requester,
    Path(employee_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let month = match query.month_or_current() {
        Ok(month) => month,
        Err(err) => return failure(correlation_id, "monthly_hours", err),
    };

    match state
        .scheduler()
        .monthly_hours(employee_id, month, &requester)
        .await
    {
        Ok(hours) => json_response(StatusCode::OK, MonthlyHoursResponse::from(hours)),
        Err(err) => failure(correlation_id, "monthly_hours", err),
    }
}

/// Handler for POST /monthly-hours/recalculate.
async fn recalculate_handler(
    State(state): State<AppState>,
    requester: Requester,
    Query(query): Query<MonthQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let month = match query.month_or_current() {
        Ok(month) => month,
        Err(err) => return failure(correlation_id, "recalculate_month", err),
    };

    match state.scheduler().recalculate_month(month, &requester).await {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                month = %month,
                employees = records.len(),
                "Monthly hours recalculated"
            );
            let body: Vec<MonthlyHoursResponse> =
                records.into_iter().map(MonthlyHoursResponse::from).collect();
            json_response(StatusCode::OK, body)
        }
        Err(err) => failure(correlation_id, "recalculate_month", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;
    use crate::scheduling::ShiftScheduler;
    use crate::storage::Database;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    async fn create_test_router() -> Router {
        let scheduler = ShiftScheduler::new(Database::in_memory().await.unwrap());
        let employee = Employee {
            id: 1,
            display_name: "Alice".to_string(),
            designation: "Care Worker".to_string(),
        };
        scheduler.register_employee(&employee).await.unwrap();
        create_router(AppState::new(scheduler))
    }

    fn manager_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .header("x-user-id", "100")
            .header("x-user-role", "manager")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_shift_returns_201() {
        let router = create_test_router().await;

        let response = router
            .oneshot(manager_request(
                "POST",
                "/shifts",
                r#"{"employee": 1, "shift_date": "2024-12-06", "shift_type": "EVENING"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let shift: ShiftResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(shift.employee, 1);
        assert_eq!(shift.class_name, "Evening Shift");
        assert!(!shift.is_weekend);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_test_router().await;

        let response = router
            .oneshot(manager_request("POST", "/shifts", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_invalid_shift_type_returns_400_with_field() {
        let router = create_test_router().await;

        let response = router
            .oneshot(manager_request(
                "POST",
                "/shifts",
                r#"{"employee": 1, "shift_date": "2024-12-06", "shift_type": "NIGHT"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "INVALID_SHIFT_TYPE");
        assert_eq!(error.field.as_deref(), Some("shift_type"));
    }

    #[tokio::test]
    async fn test_missing_identity_returns_401() {
        let router = create_test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/shifts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_error(response).await.code, "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_invalid_month_query_returns_400() {
        let router = create_test_router().await;

        let response = router
            .oneshot(manager_request("GET", "/shifts?month=2024-13", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "INVALID_DATE");
        assert_eq!(error.field.as_deref(), Some("month"));
    }
}
