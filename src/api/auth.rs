//! Requester identity from gateway headers.
//!
//! Authentication happens upstream. The gateway forwards the account id,
//! role and linked employee record in headers; this extractor turns them
//! into a [`Requester`].

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

use crate::models::{Requester, Role};

use super::response::{ApiError, ApiErrorResponse};

/// Header carrying the account id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the account role (`employee`, `manager` or `admin`).
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Header carrying the linked employee id, if the account has one.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

fn unauthenticated(message: impl Into<String>) -> ApiErrorResponse {
    ApiErrorResponse {
        status: StatusCode::UNAUTHORIZED,
        error: ApiError::new("UNAUTHENTICATED", message),
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, ApiErrorResponse> {
    match parts.headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v.trim()))
            .map_err(|_| unauthenticated(format!("Header {name} is not valid text"))),
    }
}

fn parse_id(name: &str, value: &str) -> Result<i64, ApiErrorResponse> {
    value
        .parse::<i64>()
        .map_err(|_| unauthenticated(format!("Header {name} must be an integer id")))
}

/// Reads the requester from the request headers.
pub(crate) fn requester_from_parts(parts: &Parts) -> Result<Requester, ApiErrorResponse> {
    let user_id = header_value(parts, USER_ID_HEADER)?
        .ok_or_else(|| unauthenticated(format!("Missing {USER_ID_HEADER} header")))
        .and_then(|v| parse_id(USER_ID_HEADER, v))?;

    let role = header_value(parts, USER_ROLE_HEADER)?
        .ok_or_else(|| unauthenticated(format!("Missing {USER_ROLE_HEADER} header")))?
        .parse::<Role>()
        .map_err(|e| unauthenticated(e.to_string()))?;

    let employee_id = header_value(parts, EMPLOYEE_ID_HEADER)?
        .map(|v| parse_id(EMPLOYEE_ID_HEADER, v))
        .transpose()?;

    Ok(Requester {
        user_id,
        role,
        employee_id,
    })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        requester_from_parts(parts)
    }
}
