//! Employee and requester identity types.
//!
//! Accounts live in an external identity service. The scheduler only needs
//! the caller's role and, for employees, the employee record they are linked
//! to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May only act on their own shifts and hours.
    Employee,
    /// Manages shifts for all employees.
    Manager,
    /// Same scheduling powers as a manager.
    Admin,
}

impl Role {
    /// Returns true for roles that may act on any employee's shifts.
    pub fn can_manage_shifts(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employee => write!(f, "employee"),
            Role::Manager => write!(f, "manager"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Returned when a role string is not one of `employee`, `manager`, `admin`.
#[derive(Debug, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// The authenticated caller of a scheduling operation.
///
/// # Example
///
/// ```
/// use shift_scheduler::models::Requester;
///
/// let employee = Requester::employee(10, 3);
/// assert!(employee.acts_for(3));
/// assert!(!employee.acts_for(4));
///
/// let manager = Requester::manager(1);
/// assert!(manager.acts_for(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    /// The account identifier.
    pub user_id: i64,
    /// The account role.
    pub role: Role,
    /// The employee record linked to the account, if any.
    pub employee_id: Option<i64>,
}

impl Requester {
    /// An employee account linked to `employee_id`.
    pub fn employee(user_id: i64, employee_id: i64) -> Self {
        Self {
            user_id,
            role: Role::Employee,
            employee_id: Some(employee_id),
        }
    }

    /// A manager account.
    pub fn manager(user_id: i64) -> Self {
        Self {
            user_id,
            role: Role::Manager,
            employee_id: None,
        }
    }

    /// An admin account.
    pub fn admin(user_id: i64) -> Self {
        Self {
            user_id,
            role: Role::Admin,
            employee_id: None,
        }
    }

    /// Returns true for managers and admins.
    pub fn can_manage_shifts(&self) -> bool {
        self.role.can_manage_shifts()
    }

    /// Returns true if the requester may act on `employee_id`'s records:
    /// managers and admins for anyone, employees only for themselves.
    pub fn acts_for(&self, employee_id: i64) -> bool {
        self.can_manage_shifts() || self.employee_id == Some(employee_id)
    }
}

/// A schedulable worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// Name shown on calendars.
    pub display_name: String,
    /// Job title.
    #[serde(default)]
    pub designation: String,
}
