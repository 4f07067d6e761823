//! Calculation logic for the shift scheduler.
//!
//! This module contains the time classification rules (weekend detection,
//! fixed shift windows, the 19:00 cutoff) and the monthly working hours
//! aggregation built on top of them.

mod monthly_hours;
mod time_classification;

pub use monthly_hours::{ShiftContribution, compute_monthly_hours, shift_contribution};
pub use time_classification::{
    AFTER_HOURS_CUTOFF_HOUR, BREAK_DEDUCTION_HOURS, DayType, after_hours_cutoff, duration_hours,
    get_day_type, hours_after_cutoff, is_weekend, shift_window,
};
