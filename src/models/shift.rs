//! Shift model and related types.
//!
//! This module defines [`ShiftType`], the persisted [`Shift`] record, and
//! [`NewShift`], the only way to build a shift for storage. Start/end times
//! and the weekend flag of a [`NewShift`] are always derived from the shift
//! type and date; callers cannot supply them.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calculation::{is_weekend, shift_window};
use crate::error::SchedulerError;

use super::MonthAnchor;

/// The fixed categories of shift an employee can work.
///
/// # Example
///
/// ```
/// use shift_scheduler::models::ShiftType;
///
/// let shift_type: ShiftType = "evening".parse().unwrap();
/// assert_eq!(shift_type, ShiftType::Evening);
/// assert_eq!(shift_type.to_string(), "EVENING");
/// assert!("NIGHT".parse::<ShiftType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShiftType {
    /// Day shift, 07:00 to 15:00.
    Day,
    /// Evening shift, 15:00 to 22:00.
    #[serde(alias = "EVE")]
    Evening,
}

impl ShiftType {
    /// The code used in requests and storage.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftType::Day => "DAY",
            ShiftType::Evening => "EVENING",
        }
    }

    /// The human-readable label shown on calendars.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::Day => "Day Shift",
            ShiftType::Evening => "Evening Shift",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ShiftType {
    type Err = SchedulerError;

    /// Parses a shift type code. `EVE` is accepted as a legacy code for
    /// [`ShiftType::Evening`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAY" => Ok(ShiftType::Day),
            "EVENING" | "EVE" => Ok(ShiftType::Evening),
            _ => Err(SchedulerError::InvalidShiftType {
                value: s.to_string(),
            }),
        }
    }
}

/// The natural key of a shift: no employee may hold two shifts with the
/// same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftKey {
    /// The employee the shift belongs to.
    pub employee_id: i64,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: ShiftType,
}

impl ShiftKey {
    /// The error reported when this key is already taken.
    pub fn duplicate_error(&self) -> SchedulerError {
        SchedulerError::DuplicateShift {
            employee_id: self.employee_id,
            date: self.date,
            shift_type: self.shift_type,
        }
    }
}

/// A persisted work assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Storage identifier.
    pub id: i64,
    /// The employee the shift belongs to.
    pub employee_id: i64,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The shift type.
    pub shift_type: ShiftType,
    /// Start time derived from the shift type.
    pub start_time: NaiveTime,
    /// End time derived from the shift type.
    pub end_time: NaiveTime,
    /// Whether the date falls on a Saturday or Sunday.
    pub is_weekend: bool,
    /// True while the shift is an employee's availability request; false
    /// once assigned or approved.
    pub is_available: bool,
}

impl Shift {
    /// Returns the natural key of this shift.
    pub fn key(&self) -> ShiftKey {
        ShiftKey {
            employee_id: self.employee_id,
            date: self.date,
            shift_type: self.shift_type,
        }
    }

    /// Returns the month this shift is aggregated into.
    pub fn month(&self) -> MonthAnchor {
        MonthAnchor::containing(self.date)
    }

    /// The shift start as a full date-time.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// The shift end as a full date-time.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }
}

/// A shift that has not been stored yet.
///
/// The only constructor is [`NewShift::derive`], which computes the start
/// time, end time and weekend flag from the shift type and date.
///
/// # Example
///
/// ```
/// use shift_scheduler::models::{NewShift, ShiftType};
/// use chrono::{NaiveDate, NaiveTime};
///
/// // 2024-12-07 is a Saturday
/// let date = NaiveDate::from_ymd_opt(2024, 12, 7).unwrap();
/// let shift = NewShift::derive(1, date, ShiftType::Evening, false);
/// assert_eq!(shift.start_time(), NaiveTime::from_hms_opt(15, 0, 0).unwrap());
/// assert_eq!(shift.end_time(), NaiveTime::from_hms_opt(22, 0, 0).unwrap());
/// assert!(shift.is_weekend());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShift {
    employee_id: i64,
    date: NaiveDate,
    shift_type: ShiftType,
    start_time: NaiveTime,
    end_time: NaiveTime,
    is_weekend: bool,
    is_available: bool,
}

impl NewShift {
    /// Builds a shift for storage, deriving its times and weekend flag.
    pub fn derive(
        employee_id: i64,
        date: NaiveDate,
        shift_type: ShiftType,
        is_available: bool,
    ) -> Self {
        let (start_time, end_time) = shift_window(shift_type);
        Self {
            employee_id,
            date,
            shift_type,
            start_time,
            end_time,
            is_weekend: is_weekend(date),
            is_available,
        }
    }

    /// The employee the shift belongs to.
    pub fn employee_id(&self) -> i64 {
        self.employee_id
    }

    /// The calendar date of the shift.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The shift type.
    pub fn shift_type(&self) -> ShiftType {
        self.shift_type
    }

    /// The derived start time.
    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    /// The derived end time.
    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// The derived weekend flag.
    pub fn is_weekend(&self) -> bool {
        self.is_weekend
    }

    /// The availability flag.
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns the natural key of this shift.
    pub fn key(&self) -> ShiftKey {
        ShiftKey {
            employee_id: self.employee_id,
            date: self.date,
            shift_type: self.shift_type,
        }
    }

    /// Attaches the storage identifier assigned on insert.
    pub fn into_shift(self, id: i64) -> Shift {
        Shift {
            id,
            employee_id: self.employee_id,
            date: self.date,
            shift_type: self.shift_type,
            start_time: self.start_time,
            end_time: self.end_time,
            is_weekend: self.is_weekend,
            is_available: self.is_available,
        }
    }
}
