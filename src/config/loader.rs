//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the scheduler
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{SchedulerError, SchedulerResult};

use super::types::SchedulerConfig;

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "SCHEDULER_DATABASE_URL";

/// Environment variable overriding `server.bind_address`.
pub const BIND_ADDRESS_ENV: &str = "SCHEDULER_BIND_ADDRESS";

/// Loads and provides access to the scheduler configuration.
///
/// # File Format
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:8080"
/// database:
///   url: "sqlite://scheduler.db"
///   max_connections: 5
/// logging:
///   format: text        # or json
///   filter: "info,shift_scheduler=debug"
/// employees:            # optional
///   - id: 1
///     display_name: "Alice Nguyen"
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_scheduler::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/scheduler.yaml")?.with_env_overrides();
/// println!("Listening on {}", loader.config().server.bind_address);
/// # Ok::<(), shift_scheduler::error::SchedulerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchedulerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or:
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not valid configuration YAML
    pub fn load<P: AsRef<Path>>(path: P) -> SchedulerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SchedulerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` names the source in
    /// error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> SchedulerResult<Self> {
        let config = serde_yaml::from_str::<SchedulerConfig>(content).map_err(|e| {
            SchedulerError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self { config })
    }

    /// Applies `SCHEDULER_DATABASE_URL` and `SCHEDULER_BIND_ADDRESS` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(DATABASE_URL_ENV).ok(),
            std::env::var(BIND_ADDRESS_ENV).ok(),
        )
    }

    fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|v| !v.trim().is_empty()) {
            self.config.database.url = url;
        }
        if let Some(address) = bind_address.filter(|v| !v.trim().is_empty()) {
            self.config.server.bind_address = address;
        }
        self
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> SchedulerConfig {
        self.config
    }
}
