//! Configuration loading and management for the shift scheduler.
//!
//! This module loads server, database and logging settings from a YAML file,
//! with environment variable overrides for deployment.
//!
//! # Example
//!
//! ```no_run
//! use shift_scheduler::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/scheduler.yaml").unwrap().into_config();
//! println!("Database: {}", config.database.url);
//! ```

mod loader;
mod types;

pub use loader::{BIND_ADDRESS_ENV, ConfigLoader, DATABASE_URL_ENV};
pub use types::{DatabaseConfig, LogFormat, LoggingConfig, SchedulerConfig, ServerConfig};
