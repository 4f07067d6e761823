//! Shift Scheduler
//!
//! This crate schedules employee shifts and keeps monthly working hours in
//! step with them. It enforces one shift per employee, date and shift type,
//! derives shift times and weekend flags from the shift type and date, and
//! aggregates hours into total, weekday, weekend and after-19:00 buckets.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod storage;
