//! Error types for the shift scheduler.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the scheduling core can report. Each error carries a
//! machine-readable [`kind`](SchedulerError::kind) and, where it makes sense,
//! the request [`field`](SchedulerError::field) its message refers to.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ShiftType;

/// The main error type for the shift scheduler.
///
/// # Example
///
/// ```
/// use shift_scheduler::error::SchedulerError;
///
/// let error = SchedulerError::InvalidShiftType {
///     value: "NIGHT".to_string(),
/// };
/// assert_eq!(error.kind(), "INVALID_SHIFT_TYPE");
/// assert_eq!(error.field(), Some("shift_type"));
/// ```
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A shift with the same (employee, date, shift type) already exists.
    #[error("Shift already exists for employee {employee_id} on {date} ({shift_type})")]
    DuplicateShift {
        /// The employee the shift belongs to.
        employee_id: i64,
        /// The calendar date of the shift.
        date: NaiveDate,
        /// The shift type.
        shift_type: ShiftType,
    },

    /// The shift type code was not recognised.
    #[error("Invalid shift type '{value}': expected DAY or EVENING")]
    InvalidShiftType {
        /// The rejected value.
        value: String,
    },

    /// The requester's role or ownership does not allow the action.
    #[error("You do not have permission to {action}")]
    Forbidden {
        /// The attempted action, phrased for the message (e.g. "approve shifts").
        action: String,
    },

    /// A referenced shift or employee does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        resource: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A date or month input was malformed or out of range.
    #[error("Invalid date for '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The request field holding the date.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A required request field was not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// A transaction or constraint failure raised by the storage layer.
    #[error("Storage conflict: {message}")]
    StorageConflict {
        /// The message reported by the database.
        message: String,
    },

    /// A stored row could not be turned back into a domain value.
    #[error("Corrupt {table} record: {message}")]
    CorruptRecord {
        /// The table the row came from.
        table: String,
        /// What was wrong with it.
        message: String,
    },

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying schema migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl SchedulerError {
    /// Returns the machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            SchedulerError::DuplicateShift { .. } => "DUPLICATE_SHIFT",
            SchedulerError::InvalidShiftType { .. } => "INVALID_SHIFT_TYPE",
            SchedulerError::Forbidden { .. } => "FORBIDDEN",
            SchedulerError::NotFound { .. } => "NOT_FOUND",
            SchedulerError::InvalidDate { .. } => "INVALID_DATE",
            SchedulerError::MissingField { .. } => "MISSING_FIELD",
            SchedulerError::StorageConflict { .. } => "STORAGE_CONFLICT",
            SchedulerError::CorruptRecord { .. } => "CORRUPT_RECORD",
            SchedulerError::Database(_) => "DATABASE_ERROR",
            SchedulerError::Migration(_) => "MIGRATION_ERROR",
            SchedulerError::ConfigNotFound { .. } | SchedulerError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
        }
    }

    /// Returns the request field this error's message is scoped to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchedulerError::DuplicateShift { .. } | SchedulerError::InvalidShiftType { .. } => {
                Some("shift_type")
            }
            SchedulerError::InvalidDate { field, .. } | SchedulerError::MissingField { field } => {
                Some(field.as_str())
            }
            _ => None,
        }
    }

    pub(crate) fn not_found(resource: &str, id: impl ToString) -> Self {
        SchedulerError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn forbidden(action: &str) -> Self {
        SchedulerError::Forbidden {
            action: action.to_string(),
        }
    }
}

/// A type alias for Results that return SchedulerError.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_shift_displays_key() {
        let error = SchedulerError::DuplicateShift {
            employee_id: 7,
            date: NaiveDate::from_ymd_opt(2024, 12, 4).unwrap(),
            shift_type: ShiftType::Evening,
        };
        assert_eq!(
            error.to_string(),
            "Shift already exists for employee 7 on 2024-12-04 (EVENING)"
        );
        assert_eq!(error.kind(), "DUPLICATE_SHIFT");
        assert_eq!(error.field(), Some("shift_type"));
    }

    #[test]
    fn test_forbidden_displays_action() {
        let error = SchedulerError::forbidden("approve shifts");
        assert_eq!(
            error.to_string(),
            "You do not have permission to approve shifts"
        );
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_not_found_displays_resource_and_id() {
        let error = SchedulerError::not_found("Shift", 42);
        assert_eq!(error.to_string(), "Shift not found: 42");
        assert_eq!(error.kind(), "NOT_FOUND");
    }

    #[test]
    fn test_invalid_date_is_scoped_to_field() {
        let error = SchedulerError::InvalidDate {
            field: "new_date".to_string(),
            value: "2024-13-01".to_string(),
        };
        assert_eq!(error.field(), Some("new_date"));
        assert!(error.to_string().contains("2024-13-01"));
    }

    #[test]
    fn test_config_errors_share_kind() {
        let missing = SchedulerError::ConfigNotFound {
            path: "/missing.yaml".to_string(),
        };
        let bad = SchedulerError::ConfigParseError {
            path: "/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(missing.kind(), "CONFIG_ERROR");
        assert_eq!(bad.kind(), "CONFIG_ERROR");
        assert_eq!(
            bad.to_string(),
            "Failed to parse configuration file '/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<SchedulerError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_field() -> SchedulerResult<()> {
            Err(SchedulerError::MissingField {
                field: "employee".to_string(),
            })
        }

        fn propagates_error() -> SchedulerResult<()> {
            returns_missing_field()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(SchedulerError::MissingField { .. })
        ));
    }
}
