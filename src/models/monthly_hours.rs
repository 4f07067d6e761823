//! Monthly working hours model.
//!
//! [`MonthlyWorkingHours`] is a derived cache: every field can be rebuilt
//! from the shifts of one employee in one month.

use rust_decimal::Decimal;
use serde::Serialize;

use super::MonthAnchor;

/// One employee's aggregated hours for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyWorkingHours {
    /// The employee the hours belong to.
    pub employee_id: i64,
    /// First day of the aggregated month.
    pub month_year: MonthAnchor,
    /// All hours worked, after the break deduction.
    pub total_hours: Decimal,
    /// Hours of shifts dated Monday to Friday.
    pub weekday_hours: Decimal,
    /// Hours of shifts dated Saturday or Sunday, plus Friday hours after 19:00.
    pub weekend_hours: Decimal,
    /// Monday to Thursday hours after 19:00.
    pub after_19_hours: Decimal,
}

/// Hour buckets rendered as `"<h> hours <m> minutes"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedHours {
    /// Formatted total hours.
    pub total: String,
    /// Formatted weekday hours.
    pub weekday: String,
    /// Formatted weekend hours.
    pub weekend: String,
    /// Formatted after-19:00 hours.
    pub after_19: String,
}

impl MonthlyWorkingHours {
    /// A record with every bucket at zero.
    pub fn empty(employee_id: i64, month_year: MonthAnchor) -> Self {
        Self {
            employee_id,
            month_year,
            total_hours: Decimal::ZERO,
            weekday_hours: Decimal::ZERO,
            weekend_hours: Decimal::ZERO,
            after_19_hours: Decimal::ZERO,
        }
    }

    /// Renders every bucket for display.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_scheduler::models::{MonthAnchor, MonthlyWorkingHours};
    /// use rust_decimal::Decimal;
    ///
    /// let mut hours = MonthlyWorkingHours::empty(1, MonthAnchor::new(2024, 12).unwrap());
    /// hours.total_hours = Decimal::new(75, 1);
    /// assert_eq!(hours.formatted().total, "7 hours 30 minutes");
    /// ```
    pub fn formatted(&self) -> FormattedHours {
        FormattedHours {
            total: format_hours(self.total_hours),
            weekday: format_hours(self.weekday_hours),
            weekend: format_hours(self.weekend_hours),
            after_19: format_hours(self.after_19_hours),
        }
    }
}

fn format_hours(value: Decimal) -> String {
    let hours = value.trunc();
    let minutes = ((value - hours) * Decimal::from(60)).round();
    format!(
        "{} hours {} minutes",
        hours.normalize(),
        minutes.normalize()
    )
}
