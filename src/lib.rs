//! In-memory geographic database of named integer-grid locations.
//!
//! ## Features
//! - **Spatial indexing**: a k-d tree keyed by `(x, y)` that rejects duplicate
//!   coordinates and answers exact lookups and circular range searches
//! - **Name indexing**: a binary search tree keyed by name, tolerant of
//!   repeated names
//! - **Consistency**: one coordinator owns both indices and applies every
//!   insert and delete to both
//!
//! ```rust
//! use gisdb::Gis;
//!
//! let mut db = Gis::new();
//! db.insert("P", 3, 4)?;
//!
//! // The 3-4-5 triangle sits exactly on the boundary.
//! assert!(db.search(0, 0, 4)?.cities.is_empty());
//! assert_eq!(db.search(0, 0, 5)?.cities[0].to_string(), "P (3, 4)");
//!
//! let removed = db.delete_by_name("P");
//! assert_eq!(removed.len(), 1);
//! # Ok::<(), gisdb::GisError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod db;
pub mod error;

pub use builder::DBBuilder;
pub use db::{DB, NameIndex};
pub use error::{GisError, Result};

pub type Gis = DB;

pub use config::{Axis, City, CityRef, Config, DbStats, LevelEntry, Region};

pub use compute::spatial::{KdTree, RangeSearch, Removal};
pub use compute::validation;

pub use gisdb_types::listing::render;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{DBBuilder, Gis, GisError, Result};

    pub use crate::{City, CityRef, Config, DbStats, LevelEntry};

    pub use crate::{RangeSearch, Removal};

    pub use crate::render;
}
