//! # gisdb-types
//!
//! Core value types for the gisdb in-memory geographic database.
//!
//! - **Records**: `City`, an immutable `(name, x, y)` triple
//! - **Geometry**: `Axis` and `Region`, the split axis and the rectangle a
//!   k-d tree node covers
//! - **Diagnostics**: `LevelEntry` for level-annotated traversals, `DbStats`
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use gisdb_types::city::City;
//! use gisdb_types::region::Region;
//!
//! let city = City::new("Blacksburg", 100, 200);
//! assert_eq!(city.to_string(), "Blacksburg (100, 200)");
//!
//! let world = Region::new(0, 0, 32767, 32767);
//! assert!(world.contains(city.x(), city.y()));
//! ```

pub mod city;
pub mod listing;
pub mod region;
pub mod stats;
