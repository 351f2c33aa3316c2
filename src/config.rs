//! Configuration for gisdb
//!
//! This module provides the database configuration and re-exports the value
//! types from the `gisdb-types` crate for convenience.
use crate::error::{GisError, Result};
use serde::de::Error;

pub use gisdb_types::city::City;
pub use gisdb_types::listing::LevelEntry;
pub use gisdb_types::region::{Axis, Region};
pub use gisdb_types::stats::DbStats;

/// Shared handle to an immutable record. Both indices hold one per record.
pub type CityRef = std::rc::Rc<City>;

/// Smallest coordinate of the default world.
pub const DEFAULT_WORLD_MIN: i32 = 0;

/// Largest coordinate of the default world.
pub const DEFAULT_WORLD_MAX: i32 = 32767;

/// Database configuration
///
/// # Example
///
/// ```rust
/// use gisdb::Config;
///
/// let config = Config::from_json(r#"{ "world_max": 1023 }"#).unwrap();
/// assert_eq!(config.world_min, 0);
/// assert_eq!(config.world_max, 1023);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Inclusive lower bound for both coordinates
    #[serde(default = "Config::default_world_min")]
    pub world_min: i32,

    /// Inclusive upper bound for both coordinates
    #[serde(default = "Config::default_world_max")]
    pub world_max: i32,

    /// Longest accepted city name, in bytes
    #[serde(default = "Config::default_max_name_len")]
    pub max_name_len: usize,
}

impl Config {
    const fn default_world_min() -> i32 {
        DEFAULT_WORLD_MIN
    }

    const fn default_world_max() -> i32 {
        DEFAULT_WORLD_MAX
    }

    const fn default_max_name_len() -> usize {
        255
    }

    pub fn with_world_bounds(mut self, min: i32, max: i32) -> Self {
        assert!(min <= max, "World minimum must not exceed world maximum");
        self.world_min = min;
        self.world_max = max;
        self
    }

    pub fn with_max_name_len(mut self, len: usize) -> Self {
        assert!(len > 0, "Maximum name length must be greater than zero");

        if len > 64 * 1024 {
            log::warn!(
                "Maximum name length of {} bytes is very large; every record \
                stores its name once and both indices share it.",
                len
            );
        }

        self.max_name_len = len;
        self
    }

    /// The square covering every valid coordinate.
    pub fn world(&self) -> Region {
        Region::square(self.world_min, self.world_max)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.world_min < 0 {
            return Err(format!(
                "World minimum must not be negative, got {}",
                self.world_min
            ));
        }

        if self.world_min > self.world_max {
            return Err(format!(
                "World minimum {} exceeds world maximum {}",
                self.world_min, self.world_max
            ));
        }

        if self.max_name_len == 0 {
            return Err("Maximum name length must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Same as [`Config::validate`], mapped onto the crate error type.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(GisError::InvalidConfig)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_min: Self::default_world_min(),
            world_max: Self::default_world_max(),
            max_name_len: Self::default_max_name_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.world_min, 0);
        assert_eq!(config.world_max, 32767);
        assert_eq!(config.max_name_len, 255);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_world_bounds(0, 1023)
            .with_max_name_len(32);

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(Config::from_json(r#"{ "sync_policy": "always" }"#).is_err());
    }

    #[test]
    fn test_config_validation() {
        let inverted = Config {
            world_min: 10,
            world_max: 5,
            ..Config::default()
        };
        assert!(inverted.validate().is_err());
        assert!(matches!(inverted.check(), Err(GisError::InvalidConfig(_))));

        let negative = Config {
            world_min: -1,
            ..Config::default()
        };
        assert!(negative.validate().is_err());

        assert!(Config::from_json(r#"{ "max_name_len": 0 }"#).is_err());
    }

    #[test]
    fn test_world_region() {
        let world = Config::default().world();
        assert!(world.contains(0, 0));
        assert!(world.contains(32767, 32767));
        assert!(!world.contains(32768, 0));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default().with_world_bounds(0, 511);
        let toml_str = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&toml_str).unwrap(), config);
    }
}
