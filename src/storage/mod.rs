//! SQLite persistence.
//!
//! [`Database`] owns the pool and applies migrations. The repository modules
//! are free functions over `&mut SqliteConnection`, so the same call works
//! on a pooled connection or inside a transaction.

pub mod employees;
pub mod monthly_hours;
mod pool;
pub mod shifts;

pub use pool::Database;
