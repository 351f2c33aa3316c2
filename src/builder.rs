//! Database builder for flexible configuration
//!
//! This module provides a builder pattern for creating databases with a
//! custom world size and name limits.

use crate::config::Config;
use crate::db::DB;
use crate::error::Result;

/// Builder for database configuration.
#[derive(Debug, Default)]
pub struct DBBuilder {
    config: Config,
}

impl DBBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the whole configuration with one parsed from JSON.
    pub fn config_json(mut self, json: &str) -> Result<Self> {
        self.config = Config::from_json(json)?;
        Ok(self)
    }

    /// Restrict both coordinates to `[min, max]`.
    pub fn world_bounds(mut self, min: i32, max: i32) -> Self {
        self.config.world_min = min;
        self.config.world_max = max;
        self
    }

    /// Longest accepted city name, in bytes.
    pub fn max_name_len(mut self, len: usize) -> Self {
        self.config.max_name_len = len;
        self
    }

    /// Build the database. Fails if the configuration does not validate.
    pub fn build(self) -> Result<DB> {
        self.config.check()?;
        log::debug!(
            "Opening database over [{}, {}]",
            self.config.world_min,
            self.config.world_max
        );
        Ok(DB::from_config(self.config))
    }
}
