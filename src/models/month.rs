//! Month anchors.
//!
//! A [`MonthAnchor`] is the first calendar day of a month and is the key
//! monthly working hours are aggregated under.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{SchedulerError, SchedulerResult};

/// The first day of a calendar month.
///
/// # Example
///
/// ```
/// use shift_scheduler::models::MonthAnchor;
/// use chrono::NaiveDate;
///
/// let anchor = MonthAnchor::parse("month", "2024-12").unwrap();
/// assert_eq!(anchor.first_day(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
/// assert_eq!(anchor.last_day(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
/// assert_eq!(anchor.to_string(), "2024-12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MonthAnchor(NaiveDate);

impl MonthAnchor {
    /// Returns the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// Returns the month containing today's date (UTC).
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// Builds an anchor from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> SchedulerResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| SchedulerError::InvalidDate {
                field: "month".to_string(),
                value: format!("{year}-{month:02}"),
            })
    }

    /// Parses `YYYY-MM`, or any `YYYY-MM-DD` date inside the month.
    ///
    /// `field` names the request field for the error message.
    pub fn parse(field: &str, value: &str) -> SchedulerResult<Self> {
        let trimmed = value.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
            .map(Self::containing)
            .map_err(|_| SchedulerError::InvalidDate {
                field: field.to_string(),
                value: value.to_string(),
            })
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        if self.0.month() == 12 {
            // December does not roll into a "month 13"; its last day is fixed.
            self.0 + Days::new(30)
        } else {
            self.0 + Months::new(1) - Days::new(1)
        }
    }

    /// Returns true if `date` falls within the month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

impl fmt::Display for MonthAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}
