//! Core database implementation for gisdb.
//!
//! This module defines the main `DB` type, which owns the spatial index and
//! the name index and keeps their populations identical.

use crate::compute::spatial::{KdTree, RangeSearch, Removal};
use crate::compute::validation::{validate_coordinates, validate_name, validate_radius};
use crate::config::{City, CityRef, Config, DbStats, LevelEntry};
use crate::error::{GisError, Result};
use std::rc::Rc;

mod name_index;

pub use name_index::NameIndex;

/// Main gisdb database structure (single-threaded by design).
///
/// The `DB` struct offers:
/// - Insertion of `(name, x, y)` city records with duplicate-coordinate
///   rejection
/// - Lookup and deletion by exact coordinate or by name
/// - Circular range search over the k-d tree
/// - Level-annotated dumps of both indices
///
/// Every record lives in both indices at once. Writes validate first, then
/// touch the spatial index, then the name index; a write that fails validation
/// or hits an occupied coordinate leaves both untouched.
///
/// # Thread Safety
///
/// **`DB` is not thread-safe.** Records are shared between the two indices
/// through `Rc`, which makes `DB` neither `Send` nor `Sync`; the compiler
/// rejects any attempt to move it across threads.
///
/// # Examples
///
/// ```rust
/// use gisdb::Gis;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut db = Gis::new();
/// db.insert("Blacksburg", 100, 200)?;
/// db.insert("Christiansburg", 120, 180)?;
///
/// let nearby = db.search(100, 200, 30)?;
/// assert_eq!(nearby.cities.len(), 2);
///
/// let removed = db.delete_at(100, 200)?;
/// assert_eq!(removed.removed.unwrap().name(), "Blacksburg");
/// assert!(db.info_by_name("Blacksburg").is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DB {
    spatial: KdTree,
    names: NameIndex,
    stats: DbStats,
    config: Config,
}

impl DB {
    /// Create an empty database with the default configuration.
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    pub fn builder() -> crate::builder::DBBuilder {
        crate::builder::DBBuilder::new()
    }

    /// Create an empty database with a custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        config.check()?;
        Ok(Self::from_config(config))
    }

    pub(crate) fn from_config(config: Config) -> Self {
        Self {
            spatial: KdTree::new(),
            names: NameIndex::new(),
            stats: DbStats::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of records stored.
    pub fn len(&self) -> usize {
        self.spatial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spatial.is_empty()
    }

    /// Insert a record at `(x, y)`.
    ///
    /// Fails with [`GisError::InvalidInput`] for an empty or overlong name or
    /// an out-of-bounds coordinate, and with
    /// [`GisError::DuplicateCoordinate`] when another record already sits at
    /// `(x, y)`. Neither index changes on failure.
    pub fn insert(&mut self, name: &str, x: i32, y: i32) -> Result<()> {
        self.stats.record_operation();

        if let Err(e) =
            validate_name(&self.config, name).and_then(|_| validate_coordinates(&self.config, x, y))
        {
            log::warn!("Rejected insert of {:?} at ({}, {}): {}", name, x, y, e);
            self.stats.record_rejected_insert();
            return Err(e);
        }

        let city = Rc::new(City::new(name, x, y));
        if !self.spatial.insert(Rc::clone(&city)) {
            log::debug!("Rejected insert of {}: coordinate occupied", city);
            self.stats.record_rejected_insert();
            return Err(GisError::DuplicateCoordinate { x, y });
        }
        self.names.insert(city);

        log::debug!("Inserted {} ({} records)", name, self.len());
        self.stats.record_insert();
        Ok(())
    }

    /// Delete the record at `(x, y)`, if any.
    ///
    /// The returned [`Removal`] carries the number of spatial-index nodes
    /// examined and the removed record. An empty database answers without
    /// touching the index, with `visited == 0`.
    ///
    /// A coordinate outside the configured world is an error
    /// ([`GisError::InvalidInput`]), not an empty [`Removal`].
    pub fn delete_at(&mut self, x: i32, y: i32) -> Result<Removal> {
        self.stats.record_operation();
        validate_coordinates(&self.config, x, y)?;

        if self.spatial.is_empty() {
            return Ok(Removal::default());
        }

        let removal = self.spatial.delete(x, y);
        match &removal.removed {
            Some(city) => {
                let unlinked = self.names.remove_exact(city);
                debug_assert!(unlinked, "name index lost track of {city}");
                self.stats.record_deletes(1);
                log::debug!("Deleted {} after visiting {} nodes", city, removal.visited);
            }
            None => log::trace!(
                "No record at ({}, {}); visited {} nodes",
                x,
                y,
                removal.visited
            ),
        }
        Ok(removal)
    }

    /// Delete every record named `name`.
    ///
    /// Records are taken one at a time, each being the first match in a
    /// preorder walk of the name index, and come back in that order. An empty
    /// name matches nothing.
    pub fn delete_by_name(&mut self, name: &str) -> Vec<CityRef> {
        self.stats.record_operation();
        let mut removed = Vec::new();
        if name.is_empty() {
            return removed;
        }

        while let Some(city) = self.names.find_first_by_name(name).map(Rc::clone) {
            let removal = self.spatial.delete(city.x(), city.y());
            debug_assert!(removal.removed.is_some(), "spatial index lost track of {city}");
            self.names.remove_exact(&city);
            removed.push(city);
        }

        if !removed.is_empty() {
            log::debug!("Deleted {} records named {}", removed.len(), name);
            self.stats.record_deletes(removed.len() as u64);
        }
        removed
    }

    /// The record at exactly `(x, y)`.
    ///
    /// A coordinate outside the configured world is an error
    /// ([`GisError::InvalidInput`]), not `Ok(None)`.
    pub fn info_at(&self, x: i32, y: i32) -> Result<Option<CityRef>> {
        validate_coordinates(&self.config, x, y)?;
        Ok(self.spatial.find(x, y).map(Rc::clone))
    }

    /// Every record named `name`, in name-index inorder.
    pub fn info_by_name(&self, name: &str) -> Vec<CityRef> {
        if name.is_empty() {
            return Vec::new();
        }
        self.names.list_by_name(name)
    }

    /// Every record within `radius` of `(x, y)`, boundary included.
    ///
    /// A negative radius is rejected. The center may lie anywhere, including
    /// outside the configured world.
    pub fn search(&mut self, x: i32, y: i32, radius: i32) -> Result<RangeSearch> {
        self.stats.record_operation();
        let radius = validate_radius(radius)?;

        let result = self.spatial.range_search(x, y, radius);
        self.stats.record_search();
        log::debug!(
            "Search around ({}, {}) radius {} found {} records, visited {} nodes",
            x,
            y,
            radius,
            result.cities.len(),
            result.visited
        );
        Ok(result)
    }

    /// Remove every record from both indices.
    pub fn clear(&mut self) {
        self.stats.record_operation();
        log::debug!("Clearing {} records", self.len());
        self.spatial.clear();
        self.names.clear();
    }

    /// Spatial index inorder, annotated with depth.
    pub fn spatial_levels(&self) -> Vec<LevelEntry<CityRef>> {
        self.spatial.levels()
    }

    /// Name index inorder, annotated with depth.
    pub fn name_levels(&self) -> Vec<LevelEntry<CityRef>> {
        self.names.levels()
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            record_count: self.len(),
            spatial_height: self.spatial.height(),
            name_height: self.names.height(),
            ..self.stats.clone()
        }
    }
}

impl Default for DB {
    fn default() -> Self {
        Self::new()
    }
}
