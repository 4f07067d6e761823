//! Role policy for scheduling operations.
//!
//! Managers and admins act on any employee's shifts. Employees act only on
//! the employee record linked to their account.

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::Requester;

/// Which employees' records a requester may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visibility {
    All,
    Only(i64),
    Nothing,
}

/// Fails with `Forbidden` unless the requester is a manager or admin.
pub(crate) fn require_manager(requester: &Requester, action: &str) -> SchedulerResult<()> {
    if requester.can_manage_shifts() {
        Ok(())
    } else {
        Err(SchedulerError::forbidden(action))
    }
}

/// Fails with `Forbidden` unless the requester may act for `employee_id`.
pub(crate) fn require_acts_for(
    requester: &Requester,
    employee_id: i64,
    action: &str,
) -> SchedulerResult<()> {
    if requester.acts_for(employee_id) {
        Ok(())
    } else {
        Err(SchedulerError::forbidden(action))
    }
}

/// Resolves whose shift a create request is for.
///
/// Employees default to their own record and may not name anyone else.
/// Managers and admins must name the employee.
pub(crate) fn target_employee(requester: &Requester, requested: Option<i64>) -> SchedulerResult<i64> {
    if requester.can_manage_shifts() {
        return requested.ok_or_else(|| SchedulerError::MissingField {
            field: "employee".to_string(),
        });
    }

    let own = requester
        .employee_id
        .ok_or_else(|| SchedulerError::not_found("Employee for user", requester.user_id))?;

    match requested {
        Some(employee_id) if employee_id != own => Err(SchedulerError::forbidden(
            "create shifts for other employees",
        )),
        _ => Ok(own),
    }
}

/// Availability when the request leaves it unset: employee requests are
/// availability requests, manager entries are assignments.
pub(crate) fn default_availability(requester: &Requester) -> bool {
    !requester.can_manage_shifts()
}

pub(crate) fn visibility(requester: &Requester) -> Visibility {
    if requester.can_manage_shifts() {
        Visibility::All
    } else {
        match requester.employee_id {
            Some(employee_id) => Visibility::Only(employee_id),
            None => Visibility::Nothing,
        }
    }
}
