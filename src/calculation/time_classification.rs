//! Time classification.
//!
//! Pure functions deciding whether a date is a weekend, which fixed window a
//! shift type occupies, and how many hours fall into a time range or past
//! the 19:00 cutoff.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShiftType;

/// Unpaid break deducted from every shift, in hours.
pub const BREAK_DEDUCTION_HOURS: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Hour of day from which evening hours are tracked separately.
pub const AFTER_HOURS_CUTOFF_HOUR: u32 = 19;

/// How a calendar date is bucketed for hour aggregation.
///
/// # Example
///
/// ```
/// use shift_scheduler::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2024-12-06 is a Friday
/// let friday = NaiveDate::from_ymd_opt(2024, 12, 6).unwrap();
/// assert_eq!(get_day_type(friday), DayType::Friday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Thursday.
    MondayToThursday,
    /// Friday: a weekday whose evening hours also count toward the weekend.
    Friday,
    /// Saturday or Sunday.
    Weekend,
}

impl DayType {
    /// Returns true for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayType::Weekend)
    }
}

/// Determines the day type for a date.
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        Weekday::Fri => DayType::Friday,
        _ => DayType::MondayToThursday,
    }
}

/// Returns true iff `date` falls on a Saturday or Sunday.
///
/// # Example
///
/// ```
/// use shift_scheduler::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 12, 7).unwrap())); // Saturday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 12, 6).unwrap())); // Friday
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    get_day_type(date).is_weekend()
}

/// Returns the fixed `(start, end)` window of a shift type.
///
/// Unrecognised type codes never reach this function: they are rejected
/// with `InvalidShiftType` when parsed into a [`ShiftType`].
pub fn shift_window(shift_type: ShiftType) -> (NaiveTime, NaiveTime) {
    match shift_type {
        ShiftType::Day => (at_hour(7), at_hour(15)),
        ShiftType::Evening => (at_hour(15), at_hour(22)),
    }
}

/// The 19:00 cutoff as a time of day.
pub fn after_hours_cutoff() -> NaiveTime {
    at_hour(AFTER_HOURS_CUTOFF_HOUR)
}

/// Hours between `start` and `end`, computed from their hour and minute
/// components. The break deduction is applied by the caller.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    let hours = i64::from(end.hour()) - i64::from(start.hour());
    let minutes = i64::from(end.minute()) - i64::from(start.minute());
    Decimal::from(hours) + Decimal::from(minutes) / Decimal::from(60)
}

/// Hours from 19:00 to `end`, or `None` if `end` is before 19:00.
pub fn hours_after_cutoff(end: NaiveTime) -> Option<Decimal> {
    if end < after_hours_cutoff() {
        return None;
    }
    Some(duration_hours(after_hours_cutoff(), end))
}

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_break_deduction_is_half_hour() {
        assert_eq!(BREAK_DEDUCTION_HOURS, dec("0.5"));
    }

    #[test]
    fn test_day_types_across_a_week() {
        // 2024-12-02 is a Monday
        assert_eq!(get_day_type(make_date("2024-12-02")), DayType::MondayToThursday);
        assert_eq!(get_day_type(make_date("2024-12-05")), DayType::MondayToThursday);
        assert_eq!(get_day_type(make_date("2024-12-06")), DayType::Friday);
        assert_eq!(get_day_type(make_date("2024-12-07")), DayType::Weekend);
        assert_eq!(get_day_type(make_date("2024-12-08")), DayType::Weekend);
    }

    #[test]
    fn test_friday_is_not_weekend() {
        assert!(!is_weekend(make_date("2024-12-06")));
        assert!(is_weekend(make_date("2024-12-08")));
    }

    #[test]
    fn test_shift_windows() {
        assert_eq!(shift_window(ShiftType::Day), (hm(7, 0), hm(15, 0)));
        assert_eq!(shift_window(ShiftType::Evening), (hm(15, 0), hm(22, 0)));
    }

    #[test]
    fn test_duration_of_fixed_windows() {
        let (day_start, day_end) = shift_window(ShiftType::Day);
        let (eve_start, eve_end) = shift_window(ShiftType::Evening);
        assert_eq!(duration_hours(day_start, day_end), dec("8"));
        assert_eq!(duration_hours(eve_start, eve_end), dec("7"));
    }

    #[test]
    fn test_duration_with_minutes() {
        assert_eq!(duration_hours(hm(9, 15), hm(17, 45)), dec("8.5"));
        assert_eq!(duration_hours(hm(9, 45), hm(10, 15)), dec("0.5"));
    }

    #[test]
    fn test_hours_after_cutoff() {
        assert_eq!(hours_after_cutoff(hm(22, 0)), Some(dec("3")));
        assert_eq!(hours_after_cutoff(hm(19, 30)), Some(dec("0.5")));
        assert_eq!(hours_after_cutoff(hm(19, 0)), Some(Decimal::ZERO));
        assert_eq!(hours_after_cutoff(hm(15, 0)), None);
    }
}
