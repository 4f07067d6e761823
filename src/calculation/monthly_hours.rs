//! Monthly working hours aggregation.
//!
//! Rebuilds an employee's hour buckets for one month from the full set of
//! their shifts. The result depends only on the shifts passed in, never on a
//! previous aggregate, so running it twice over the same shifts gives the
//! same record and shift order does not matter.

use rust_decimal::Decimal;

use crate::models::{MonthAnchor, MonthlyWorkingHours, Shift};

use super::time_classification::{
    duration_hours, get_day_type, hours_after_cutoff, DayType, BREAK_DEDUCTION_HOURS,
};

/// How a single shift feeds the monthly buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftContribution {
    /// Shift duration minus the break; added to the total and to the
    /// weekday or weekend bucket.
    pub worked_hours: Decimal,
    /// Day type of the shift date.
    pub day_type: DayType,
    /// Friday hours after 19:00, added to the weekend bucket on top of the
    /// weekday hours.
    pub friday_evening_hours: Decimal,
    /// Monday to Thursday hours after 19:00.
    pub after_19_hours: Decimal,
}

/// Works out what one shift contributes to its month.
///
/// # Example
///
/// ```
/// use shift_scheduler::calculation::{shift_contribution, DayType};
/// use shift_scheduler::models::{NewShift, ShiftType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // 2024-12-05 is a Thursday
/// let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
/// let shift = NewShift::derive(1, date, ShiftType::Evening, false).into_shift(1);
///
/// let contribution = shift_contribution(&shift);
/// assert_eq!(contribution.worked_hours, Decimal::new(65, 1));
/// assert_eq!(contribution.day_type, DayType::MondayToThursday);
/// assert_eq!(contribution.after_19_hours, Decimal::from(3));
/// ```
pub fn shift_contribution(shift: &Shift) -> ShiftContribution {
    let worked_hours = duration_hours(shift.start_time, shift.end_time) - BREAK_DEDUCTION_HOURS;
    let day_type = get_day_type(shift.date);
    let evening = hours_after_cutoff(shift.end_time).unwrap_or(Decimal::ZERO);

    let (friday_evening_hours, after_19_hours) = match day_type {
        DayType::Friday => (evening, Decimal::ZERO),
        DayType::MondayToThursday => (Decimal::ZERO, evening),
        DayType::Weekend => (Decimal::ZERO, Decimal::ZERO),
    };

    ShiftContribution {
        worked_hours,
        day_type,
        friday_evening_hours,
        after_19_hours,
    }
}

/// Aggregates `shifts` into the working hours of `employee_id` for `month`.
///
/// Shifts belonging to other employees or dated outside the month are
/// ignored.
///
/// # Rules
///
/// - Every shift contributes its duration minus a 0.5 hour break to the
///   total.
/// - The same amount goes to the weekday bucket (Monday to Friday) or the
///   weekend bucket (Saturday, Sunday).
/// - For shifts ending at or after 19:00, the hours past 19:00 are added to
///   the weekend bucket on Fridays and to the after-19 bucket Monday to
///   Thursday. Friday evening hours therefore appear in both the weekday
///   and weekend buckets.
///
/// # Example
///
/// ```
/// use shift_scheduler::calculation::compute_monthly_hours;
/// use shift_scheduler::models::{MonthAnchor, NewShift, ShiftType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // 2024-12-04 is a Wednesday
/// let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
/// let shift = NewShift::derive(1, date, ShiftType::Day, false).into_shift(1);
///
/// let hours = compute_monthly_hours(1, MonthAnchor::containing(date), &[shift]);
/// assert_eq!(hours.total_hours, Decimal::new(75, 1));
/// assert_eq!(hours.weekday_hours, Decimal::new(75, 1));
/// assert_eq!(hours.weekend_hours, Decimal::ZERO);
/// ```
pub fn compute_monthly_hours(
    employee_id: i64,
    month: MonthAnchor,
    shifts: &[Shift],
) -> MonthlyWorkingHours {
    let mut hours = MonthlyWorkingHours::empty(employee_id, month);

    for shift in shifts
        .iter()
        .filter(|s| s.employee_id == employee_id && month.contains(s.date))
    {
        let contribution = shift_contribution(shift);

        hours.total_hours += contribution.worked_hours;
        if contribution.day_type.is_weekend() {
            hours.weekend_hours += contribution.worked_hours;
        } else {
            hours.weekday_hours += contribution.worked_hours;
        }
        hours.weekend_hours += contribution.friday_evening_hours;
        hours.after_19_hours += contribution.after_19_hours;
    }

    hours
}
