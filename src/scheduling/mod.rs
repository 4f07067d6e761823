//! Shift scheduling.
//!
//! [`ShiftScheduler`] owns shift create/move/copy/approve/reject/delete and
//! the monthly hours reads. [`Recalculator`] keeps the stored monthly hours
//! in step after each committed mutation.

mod authorization;
mod recalculation;
mod service;

pub use recalculation::Recalculator;
pub use service::{CreateShift, ShiftScheduler};
