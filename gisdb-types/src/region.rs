use crate::city::{City, squared_distance};
use serde::{Deserialize, Serialize};

/// Coordinate compared at one level of a k-d tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// X on even depths, Y on odd depths. The root sits at depth 0.
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Axis::X } else { Axis::Y }
    }

    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Picks this axis' component out of an `(x, y)` pair.
    pub fn select(self, x: i32, y: i32) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }

    pub fn coord(self, city: &City) -> i32 {
        self.select(city.x(), city.y())
    }

    /// Sort key with this axis as the primary component and the other axis
    /// breaking ties.
    pub fn lex_key(self, city: &City) -> (i32, i32) {
        (self.coord(city), self.other().coord(city))
    }
}

/// Closed axis-aligned rectangle on the integer grid.
///
/// A region may become empty (`min > max` on some axis) after repeated
/// splitting; an empty region contains no points and has no closest point.
///
/// # Examples
///
/// ```
/// use gisdb_types::region::{Axis, Region};
///
/// let world = Region::new(0, 0, 100, 100);
/// let (left, right) = world.split(Axis::X, 40);
/// assert_eq!(left.max_x(), 39);
/// assert_eq!(right.min_x(), 40);
/// assert!(!left.contains(40, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Region {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The whole `i32` plane.
    pub fn unbounded() -> Self {
        Self::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX)
    }

    /// Square region spanning `[min, max]` on both axes.
    pub fn square(min: i32, max: i32) -> Self {
        Self::new(min, min, max, max)
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Splits at `value` on `axis`. Values strictly below `value` fall in the
    /// first region, values at or above it in the second.
    pub fn split(&self, axis: Axis, value: i32) -> (Region, Region) {
        let mut below = *self;
        let mut above = *self;
        match axis {
            Axis::X => {
                below.max_x = below.max_x.min(value.saturating_sub(1));
                above.min_x = above.min_x.max(value);
            }
            Axis::Y => {
                below.max_y = below.max_y.min(value.saturating_sub(1));
                above.min_y = above.min_y.max(value);
            }
        }
        (below, above)
    }

    /// The point of this region nearest to `(x, y)`, i.e. `(x, y)` clamped
    /// into the rectangle. `None` for an empty region.
    pub fn closest_point(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if self.is_empty() {
            return None;
        }
        Some((
            x.max(self.min_x).min(self.max_x),
            y.max(self.min_y).min(self.max_y),
        ))
    }

    /// Whether any point of the region lies within `radius` of `(x, y)`.
    pub fn intersects_circle(&self, x: i32, y: i32, radius: u32) -> bool {
        let radius = u64::from(radius);
        match self.closest_point(x, y) {
            Some((px, py)) => squared_distance(px, py, x, y) <= radius * radius,
            None => false,
        }
    }
}
