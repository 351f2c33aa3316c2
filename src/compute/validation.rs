//! Validation for coordinates, names and search radii.
//!
//! Every check runs at the coordinator boundary, before either index is
//! touched.

use crate::config::Config;
use crate::error::{GisError, Result};

/// Validates that `(x, y)` lies inside the configured world.
///
/// # Examples
///
/// ```
/// use gisdb::Config;
/// use gisdb::compute::validation::validate_coordinates;
///
/// let config = Config::default();
/// assert!(validate_coordinates(&config, 0, 32767).is_ok());
/// assert!(validate_coordinates(&config, -1, 5).is_err());
/// assert!(validate_coordinates(&config, 5, 32768).is_err());
/// ```
pub fn validate_coordinates(config: &Config, x: i32, y: i32) -> Result<()> {
    let range = config.world_min..=config.world_max;

    if !range.contains(&x) {
        return Err(GisError::InvalidInput(format!(
            "x coordinate out of range [{}, {}]: {}",
            config.world_min, config.world_max, x
        )));
    }

    if !range.contains(&y) {
        return Err(GisError::InvalidInput(format!(
            "y coordinate out of range [{}, {}]: {}",
            config.world_min, config.world_max, y
        )));
    }

    Ok(())
}

/// Validates a city name for insertion.
///
/// Names must contain a non-whitespace character and fit within
/// `config.max_name_len` bytes.
///
/// # Examples
///
/// ```
/// use gisdb::Config;
/// use gisdb::compute::validation::validate_name;
///
/// let config = Config::default();
/// assert!(validate_name(&config, "Blacksburg").is_ok());
/// assert!(validate_name(&config, "").is_err());
/// assert!(validate_name(&config, "   ").is_err());
/// ```
pub fn validate_name(config: &Config, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GisError::InvalidInput(
            "City name must not be empty".to_string(),
        ));
    }

    if name.len() > config.max_name_len {
        return Err(GisError::InvalidInput(format!(
            "City name exceeds {} bytes: {} bytes",
            config.max_name_len,
            name.len()
        )));
    }

    Ok(())
}

/// Validates a search radius and returns it as an unsigned distance.
///
/// # Examples
///
/// ```
/// use gisdb::compute::validation::validate_radius;
///
/// assert_eq!(validate_radius(0).unwrap(), 0);
/// assert!(validate_radius(-1).is_err());
/// ```
pub fn validate_radius(radius: i32) -> Result<u32> {
    u32::try_from(radius).map_err(|_| {
        GisError::InvalidInput(format!("Radius must not be negative, got: {}", radius))
    })
}
