use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A named location on the integer grid.
///
/// A `City` never changes after construction. Equality compares all three
/// fields, so two records with the same name at different coordinates are
/// distinct. There is deliberately no `Ord` implementation: name-keyed
/// structures order records with [`City::cmp_name`], which ignores the
/// coordinates entirely.
///
/// # Examples
///
/// ```
/// use gisdb_types::city::City;
///
/// let a = City::new("Roanoke", 10, 20);
/// let b = City::new("Roanoke", 11, 20);
/// assert_ne!(a, b);
/// assert!(a.cmp_name(&b).is_eq());
/// assert_eq!(a.to_string(), "Roanoke (10, 20)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    name: String,
    x: i32,
    y: i32,
}

impl City {
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// The `(x, y)` pair.
    pub fn location(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Whether this record sits exactly at `(x, y)`.
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// Lexicographic comparison by name only.
    pub fn cmp_name(&self, other: &City) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Squared Euclidean distance to `(x, y)`.
    ///
    /// Computed in `u64` so any pair of `i32` coordinates is exact; the sum
    /// saturates rather than wrapping, which keeps comparisons against a
    /// squared radius correct.
    pub fn distance_sq(&self, x: i32, y: i32) -> u64 {
        squared_distance(self.x, self.y, x, y)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.x, self.y)
    }
}

/// Squared Euclidean distance between two grid points in widened arithmetic.
pub fn squared_distance(ax: i32, ay: i32, bx: i32, by: i32) -> u64 {
    let dx = u64::from(ax.abs_diff(bx));
    let dy = u64::from(ay.abs_diff(by));
    (dx * dx).saturating_add(dy * dy)
}
