//! HTTP API module for the shift scheduler.
//!
//! A thin axum layer over [`ShiftScheduler`](crate::scheduling::ShiftScheduler).
//! The caller's identity comes from gateway headers (see [`auth`]).

pub mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CopyShiftRequest, CreateShiftRequest, MonthQuery, MoveShiftRequest};
pub use response::{ApiError, ApiErrorResponse, MessageResponse, MonthlyHoursResponse, ShiftResponse};
pub use state::AppState;
