//! Core data models for the shift scheduler.
//!
//! This module contains all the domain models used throughout the scheduler.

mod employee;
mod month;
mod monthly_hours;
mod shift;

pub use employee::{Employee, Requester, Role, UnknownRole};
pub use month::MonthAnchor;
pub use monthly_hours::{FormattedHours, MonthlyWorkingHours};
pub use shift::{NewShift, Shift, ShiftKey, ShiftType};
