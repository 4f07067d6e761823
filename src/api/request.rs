//! Request types for the shift scheduler API.
//!
//! Bodies are accepted loosely (every field optional, dates and shift types
//! as text) and converted into domain values here, so a bad field produces
//! a field-scoped [`SchedulerError`] instead of a generic JSON rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{MonthAnchor, ShiftType};
use crate::scheduling::CreateShift;

fn required<'a>(field: &str, value: &'a Option<String>) -> SchedulerResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SchedulerError::MissingField {
            field: field.to_string(),
        })
}

fn parse_date(field: &str, value: &str) -> SchedulerResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| SchedulerError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Body of `POST /shifts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// Employee id. Optional for employees, required for managers.
    #[serde(default)]
    pub employee: Option<i64>,
    /// Date as `YYYY-MM-DD`.
    #[serde(default)]
    pub shift_date: Option<String>,
    /// `DAY` or `EVENING`.
    #[serde(default)]
    pub shift_type: Option<String>,
    /// Availability flag; defaults by role when absent.
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl CreateShiftRequest {
    /// Validates the body into a create command.
    pub fn into_command(self) -> SchedulerResult<CreateShift> {
        let date = parse_date("shift_date", required("shift_date", &self.shift_date)?)?;
        let shift_type = required("shift_type", &self.shift_type)?.parse::<ShiftType>()?;

        Ok(CreateShift {
            employee_id: self.employee,
            date,
            shift_type,
            is_available: self.is_available,
        })
    }
}

/// Body of `POST /shift-copies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopyShiftRequest {
    /// Employee id.
    #[serde(default)]
    pub employee: Option<i64>,
    /// Date as `YYYY-MM-DD`.
    #[serde(default)]
    pub shift_date: Option<String>,
    /// `DAY` or `EVENING`.
    #[serde(default)]
    pub shift_type: Option<String>,
}

impl CopyShiftRequest {
    /// Validates the body into `(employee_id, date, shift_type)`.
    pub fn into_parts(self) -> SchedulerResult<(i64, NaiveDate, ShiftType)> {
        let employee_id = self.employee.ok_or_else(|| SchedulerError::MissingField {
            field: "employee".to_string(),
        })?;
        let date = parse_date("shift_date", required("shift_date", &self.shift_date)?)?;
        let shift_type = required("shift_type", &self.shift_type)?.parse::<ShiftType>()?;

        Ok((employee_id, date, shift_type))
    }
}

/// Body of `POST /shifts/:id/move`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveShiftRequest {
    /// Target date as `YYYY-MM-DD`.
    #[serde(default)]
    pub new_date: Option<String>,
}

impl MoveShiftRequest {
    /// Validates the target date.
    pub fn new_date(&self) -> SchedulerResult<NaiveDate> {
        parse_date("new_date", required("new_date", &self.new_date)?)
    }
}

/// `?month=` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    /// `YYYY-MM`, or a `YYYY-MM-DD` date inside the month.
    #[serde(default)]
    pub month: Option<String>,
}

impl MonthQuery {
    /// The requested month, if one was given.
    pub fn month(&self) -> SchedulerResult<Option<MonthAnchor>> {
        match self.month.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => MonthAnchor::parse("month", value).map(Some),
            None => Ok(None),
        }
    }

    /// The requested month, or the current month.
    pub fn month_or_current(&self) -> SchedulerResult<MonthAnchor> {
        Ok(self.month()?.unwrap_or_else(MonthAnchor::current))
    }
}
