pub mod kdtree;
pub use kdtree::{KdTree, RangeSearch, Removal};
