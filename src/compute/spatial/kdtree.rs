//! Two-dimensional k-d tree over city records.
//!
//! Each node holds exactly one record. Depth 0 splits on x, depth 1 on y, and
//! so on. Points equal to a node on the split axis always go to the right
//! subtree, on both axes, so every left subtree is strictly below its parent
//! on the split axis and every right subtree is at or above it. Deletion and
//! pruning both lean on that rule.
//!
//! The tree is never rebalanced: its shape depends only on insertion order and
//! the deletion replacement rule.
//!
//! # Example
//!
//! ```rust
//! use gisdb::compute::spatial::KdTree;
//! use gisdb::City;
//! use std::rc::Rc;
//!
//! let mut tree = KdTree::new();
//! assert!(tree.insert(Rc::new(City::new("P", 3, 4))));
//! assert!(!tree.insert(Rc::new(City::new("Q", 3, 4))));
//!
//! let hits = tree.range_search(0, 0, 5);
//! assert_eq!(hits.visited, 1);
//! assert_eq!(hits.cities[0].name(), "P");
//! ```

use crate::config::{Axis, CityRef, LevelEntry, Region};
use std::rc::Rc;

#[derive(Debug)]
struct KdNode {
    city: CityRef,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

impl KdNode {
    fn leaf(city: CityRef) -> Box<Self> {
        Box::new(Self {
            city,
            left: None,
            right: None,
        })
    }
}

/// Outcome of [`KdTree::delete`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removal {
    /// Nodes examined, including any replacement searches
    pub visited: usize,
    /// The record that was removed, if one sat at the coordinate
    pub removed: Option<CityRef>,
}

/// Outcome of [`KdTree::range_search`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSearch {
    /// Nodes examined; subtrees pruned by their bounding region do not count
    pub visited: usize,
    /// Matching records in inorder
    pub cities: Vec<CityRef>,
}

/// Circle used by the range search.
#[derive(Debug, Clone, Copy)]
struct CircleQuery {
    x: i32,
    y: i32,
    radius: u32,
    radius_sq: u64,
}

impl CircleQuery {
    fn new(x: i32, y: i32, radius: u32) -> Self {
        let r = u64::from(radius);
        Self {
            x,
            y,
            radius,
            radius_sq: r * r,
        }
    }

    fn contains(&self, node: &KdNode) -> bool {
        node.city.distance_sq(self.x, self.y) <= self.radius_sq
    }

    fn reaches(&self, region: &Region) -> bool {
        region.intersects_circle(self.x, self.y, self.radius)
    }
}

/// Spatial index keyed by `(x, y)` that rejects duplicate coordinates.
///
/// The tree itself accepts any `i32` coordinate; range-limiting input is the
/// caller's job.
#[derive(Debug, Default)]
pub struct KdTree {
    root: Option<Box<KdNode>>,
    len: usize,
}

impl KdTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        fn height_of(node: Option<&KdNode>) -> usize {
            node.map_or(0, |n| {
                1 + height_of(n.left.as_deref()).max(height_of(n.right.as_deref()))
            })
        }
        height_of(self.root.as_deref())
    }

    /// Inserts `city`, returning `false` if its coordinate is already taken.
    ///
    /// The duplicate check happens at every node on the way down, before the
    /// split comparison, so an occupied coordinate is refused no matter how
    /// deep it sits.
    pub fn insert(&mut self, city: CityRef) -> bool {
        let mut slot = &mut self.root;
        let mut depth = 0;

        while let Some(node) = slot {
            if node.city.is_at(city.x(), city.y()) {
                log::trace!("Coordinate ({}, {}) already occupied", city.x(), city.y());
                return false;
            }
            let axis = Axis::at_depth(depth);
            slot = if axis.coord(&city) < axis.coord(&node.city) {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        *slot = Some(KdNode::leaf(city));
        self.len += 1;
        true
    }

    /// Looks up the record at exactly `(x, y)`.
    pub fn find(&self, x: i32, y: i32) -> Option<&CityRef> {
        let mut current = self.root.as_deref();
        let mut depth = 0;

        while let Some(node) = current {
            if node.city.is_at(x, y) {
                return Some(&node.city);
            }
            let axis = Axis::at_depth(depth);
            current = if axis.select(x, y) < axis.coord(&node.city) {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
            depth += 1;
        }

        None
    }

    /// Removes the record at `(x, y)`.
    ///
    /// A node with a right subtree takes the lexicographic minimum of that
    /// subtree, ordered by the node's own split axis first and the other axis
    /// second. A node with only a left subtree takes that subtree's minimum and
    /// the remainder moves over to the right. Every node touched, including
    /// those scanned for a replacement, counts toward `visited`, even on a
    /// miss.
    pub fn delete(&mut self, x: i32, y: i32) -> Removal {
        let mut visited = 0;
        let removed = delete_from(&mut self.root, x, y, 0, &mut visited);
        if removed.is_some() {
            self.len -= 1;
        }
        Removal { visited, removed }
    }

    /// Collects every record within `radius` of `(x, y)`, boundary included.
    ///
    /// A child subtree is skipped when the region implied by the splits above
    /// it cannot reach the circle. The root covers the whole plane, so only
    /// splits ever narrow a region. Results come back in inorder.
    pub fn range_search(&self, x: i32, y: i32, radius: u32) -> RangeSearch {
        let query = CircleQuery::new(x, y, radius);
        let mut result = RangeSearch::default();
        if let Some(root) = self.root.as_deref() {
            search_node(root, 0, Region::unbounded(), &query, &mut result);
        }
        result
    }

    /// Inorder traversal annotated with each node's depth.
    pub fn levels(&self) -> Vec<LevelEntry<CityRef>> {
        fn walk(node: Option<&KdNode>, depth: usize, out: &mut Vec<LevelEntry<CityRef>>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), depth + 1, out);
                out.push(LevelEntry::new(depth, Rc::clone(&node.city)));
                walk(node.right.as_deref(), depth + 1, out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        walk(self.root.as_deref(), 0, &mut out);
        out
    }
}

fn delete_from(
    slot: &mut Option<Box<KdNode>>,
    x: i32,
    y: i32,
    depth: usize,
    visited: &mut usize,
) -> Option<CityRef> {
    let node = slot.as_mut()?;
    *visited += 1;
    let axis = Axis::at_depth(depth);

    if !node.city.is_at(x, y) {
        let next = if axis.select(x, y) < axis.coord(&node.city) {
            &mut node.left
        } else {
            &mut node.right
        };
        return delete_from(next, x, y, depth + 1, visited);
    }

    // Only a left subtree: hang it on the right so the replacement always
    // comes from the right side.
    if node.right.is_none() {
        node.right = node.left.take();
    }

    let Some(right) = node.right.as_deref() else {
        return slot.take().map(|leaf| leaf.city);
    };
    let replacement = Rc::clone(lex_min(right, axis, visited));
    let removed = std::mem::replace(&mut node.city, Rc::clone(&replacement));
    delete_from(
        &mut node.right,
        replacement.x(),
        replacement.y(),
        depth + 1,
        visited,
    );
    Some(removed)
}

/// Smallest record of the subtree under `axis`'s lexicographic order.
///
/// Both children of every node are examined: equal values on the split axis
/// go right on insert, so the minimum can sit on either side.
fn lex_min<'a>(node: &'a KdNode, axis: Axis, visited: &mut usize) -> &'a CityRef {
    *visited += 1;
    let mut best = &node.city;
    for child in [node.left.as_deref(), node.right.as_deref()]
        .into_iter()
        .flatten()
    {
        let candidate = lex_min(child, axis, visited);
        if axis.lex_key(candidate) < axis.lex_key(best) {
            best = candidate;
        }
    }
    best
}

fn search_node(
    node: &KdNode,
    depth: usize,
    region: Region,
    query: &CircleQuery,
    result: &mut RangeSearch,
) {
    result.visited += 1;
    let axis = Axis::at_depth(depth);
    let (below, above) = region.split(axis, axis.coord(&node.city));

    if let Some(left) = node.left.as_deref()
        && query.reaches(&below)
    {
        search_node(left, depth + 1, below, query, result);
    }

    if query.contains(node) {
        result.cities.push(Rc::clone(&node.city));
    }

    if let Some(right) = node.right.as_deref()
        && query.reaches(&above)
    {
        search_node(right, depth + 1, above, query, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::City;

    fn city(name: &str, x: i32, y: i32) -> CityRef {
        Rc::new(City::new(name, x, y))
    }

    fn tree_of(points: &[(&str, i32, i32)]) -> KdTree {
        let mut tree = KdTree::new();
        for &(name, x, y) in points {
            assert!(tree.insert(city(name, x, y)));
        }
        tree
    }

    fn listing(tree: &KdTree) -> Vec<(usize, String)> {
        tree.levels()
            .into_iter()
            .map(|e| (e.level, e.payload.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = KdTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert!(tree.find(1, 1).is_none());
        assert_eq!(tree.delete(1, 1), Removal::default());
        assert_eq!(tree.range_search(0, 0, 100), RangeSearch::default());
        assert!(tree.levels().is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicate_coordinate() {
        let mut tree = KdTree::new();
        assert!(tree.insert(city("A", 0, 0)));
        assert!(!tree.insert(city("B", 0, 0)));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.find(0, 0).unwrap().name(), "A");
    }

    #[test]
    fn test_insert_rejects_deep_duplicate() {
        let mut tree = tree_of(&[("R", 10, 10), ("T", 5, 5), ("A", 6, 7), ("B", 4, 5)]);
        assert!(!tree.insert(city("Dup", 4, 5)));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_ties_go_right_on_both_axes() {
        // Same x as the root goes right; same y as the depth-1 node goes right.
        let tree = tree_of(&[("R", 10, 10), ("S", 10, 3), ("U", 20, 3)]);
        assert_eq!(
            listing(&tree),
            vec![
                (0, "R (10, 10)".to_string()),
                (1, "S (10, 3)".to_string()),
                (2, "U (20, 3)".to_string()),
            ]
        );
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_find_exact() {
        let tree = tree_of(&[("R", 10, 10), ("T", 5, 5), ("A", 6, 7), ("B", 4, 5)]);
        assert_eq!(tree.find(6, 7).unwrap().name(), "A");
        assert_eq!(tree.find(4, 5).unwrap().name(), "B");
        assert!(tree.find(5, 4).is_none());
        assert!(tree.find(100, 100).is_none());
    }

    #[test]
    fn test_delete_uses_lexicographic_minimum_of_right_subtree() {
        // R splits on x, T on y, A on x. B lands under A's left.
        let mut tree = tree_of(&[("R", 10, 10), ("T", 5, 5), ("A", 6, 7), ("B", 4, 5)]);
        let removal = tree.delete(5, 5);

        assert_eq!(removal.removed.as_deref(), Some(&City::new("T", 5, 5)));
        assert_eq!(tree.len(), 3);
        assert!(tree.find(5, 5).is_none());
        assert_eq!(
            listing(&tree),
            vec![
                (1, "B (4, 5)".to_string()),
                (2, "A (6, 7)".to_string()),
                (0, "R (10, 10)".to_string()),
            ]
        );
        // Locate R, T; scan A, B; then locate A, B again.
        assert_eq!(removal.visited, 6);
    }

    #[test]
    fn test_delete_minimum_search_breaks_ties_on_secondary_axis() {
        // Both candidates share x = 20 under an x-splitting root; the one
        // with the smaller y must win even though it sits deeper.
        let mut tree = tree_of(&[("R", 10, 10), ("P", 20, 9), ("Q", 20, 4)]);
        tree.delete(10, 10);
        let levels = listing(&tree);
        assert_eq!(levels[0], (0, "Q (20, 4)".to_string()));
        assert!(tree.find(20, 9).is_some());
        assert!(tree.find(20, 4).is_some());
    }

    #[test]
    fn test_delete_minimum_is_found_on_right_side_of_subtree() {
        // Under the y-splitting node N(5, 20), M(3, 20) ties on y and goes
        // right. Deleting the x-splitting root must still find M as the
        // x-minimum of the right subtree.
        let mut tree = tree_of(&[("Root", 2, 50), ("N", 5, 20), ("M", 3, 20)]);
        let removal = tree.delete(2, 50);
        assert_eq!(removal.removed.unwrap().name(), "Root");
        assert_eq!(listing(&tree)[0], (0, "M (3, 20)".to_string()));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_delete_with_only_left_subtree_rewires_right() {
        let mut tree = tree_of(&[("R", 10, 10), ("L1", 5, 8), ("L2", 3, 12)]);
        let removal = tree.delete(10, 10);
        assert_eq!(removal.removed.unwrap().name(), "R");

        // L2 is the x-minimum; what is left of the old left subtree now hangs
        // on the right of the root.
        assert_eq!(
            listing(&tree),
            vec![(0, "L2 (3, 12)".to_string()), (1, "L1 (5, 8)".to_string())]
        );
        assert!(tree.find(5, 8).is_some());
        assert!(tree.range_search(5, 8, 0).cities.len() == 1);
    }

    #[test]
    fn test_delete_leaf_and_miss() {
        let mut tree = tree_of(&[("R", 10, 10), ("T", 5, 5)]);

        let miss = tree.delete(7, 7);
        assert!(miss.removed.is_none());
        assert_eq!(miss.visited, 2);
        assert_eq!(tree.len(), 2);

        let hit = tree.delete(5, 5);
        assert_eq!(hit.removed.unwrap().name(), "T");
        assert_eq!(hit.visited, 2);
        assert_eq!(tree.len(), 1);

        let root = tree.delete(10, 10);
        assert_eq!(root.visited, 1);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_delete_keeps_every_other_point_reachable() {
        let points: Vec<(String, i32, i32)> = (0..60)
            .map(|i| (format!("c{i}"), (i * 37) % 101, (i * 53) % 97))
            .collect();
        let mut tree = KdTree::new();
        for (name, x, y) in &points {
            tree.insert(city(name, *x, *y));
        }

        for (i, (_, x, y)) in points.iter().enumerate().step_by(3) {
            assert!(tree.delete(*x, *y).removed.is_some(), "point {i}");
        }

        for (i, (name, x, y)) in points.iter().enumerate() {
            let found = tree.find(*x, *y);
            if i % 3 == 0 {
                assert!(found.is_none());
            } else {
                assert_eq!(found.map(|c| c.name()), Some(name.as_str()));
            }
        }
        assert_eq!(tree.len(), 40);
        assert_eq!(tree.levels().len(), 40);
    }

    #[test]
    fn test_range_search_boundary_is_inclusive() {
        let tree = tree_of(&[("P", 3, 4)]);

        let miss = tree.range_search(0, 0, 4);
        assert!(miss.cities.is_empty());
        assert_eq!(miss.visited, 1);

        let hit = tree.range_search(0, 0, 5);
        assert_eq!(hit.cities.len(), 1);
        assert_eq!(hit.cities[0].to_string(), "P (3, 4)");
    }

    #[test]
    fn test_range_search_radius_zero_matches_center_only() {
        let tree = tree_of(&[("A", 5, 5), ("B", 5, 6), ("C", 6, 5)]);
        let result = tree.range_search(5, 5, 0);
        assert_eq!(result.cities.len(), 1);
        assert_eq!(result.cities[0].name(), "A");
    }

    #[test]
    fn test_range_search_prunes_far_subtrees() {
        let tree = tree_of(&[
            ("Root", 1000, 1000),
            ("Far", 30000, 30000),
            ("Near", 10, 10),
            ("Nearer", 2, 2),
        ]);
        let result = tree.range_search(0, 0, 20);
        let names: Vec<_> = result.cities.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Nearer", "Near"]);
        // Root, Near, Nearer; the right subtree of the root starts at x=1000.
        assert_eq!(result.visited, 3);
    }

    #[test]
    fn test_range_search_matches_brute_force() {
        let mut tree = KdTree::new();
        let mut all = Vec::new();
        for i in 0..200 {
            let c = city(&format!("c{i}"), (i * 7919) % 1000, (i * 104729) % 1000);
            if tree.insert(Rc::clone(&c)) {
                all.push(c);
            }
        }

        for &(cx, cy, r) in &[(500, 500, 100), (0, 0, 250), (999, 10, 60), (300, 700, 0)] {
            let result = tree.range_search(cx, cy, r);
            let mut got: Vec<_> = result.cities.iter().map(|c| c.location()).collect();
            let mut want: Vec<_> = all
                .iter()
                .filter(|c| c.distance_sq(cx, cy) <= u64::from(r) * u64::from(r))
                .map(|c| c.location())
                .collect();
            got.sort();
            want.sort();
            assert_eq!(got, want, "center ({cx}, {cy}) radius {r}");
            assert!(result.visited <= tree.len());
        }
    }

    #[test]
    fn test_range_search_visited_grows_with_radius() {
        let mut tree = KdTree::new();
        for i in 0..150 {
            tree.insert(city("c", (i * 211) % 4096, (i * 389) % 4096));
        }
        let mut last = 0;
        for radius in [0, 10, 50, 200, 800, 3000, 10000, 50000] {
            let visited = tree.range_search(2048, 1024, radius).visited;
            assert!(visited >= last, "radius {radius}: {visited} < {last}");
            last = visited;
        }
        assert_eq!(last, tree.len());
    }

    #[test]
    fn test_range_search_finds_points_anywhere_on_the_plane() {
        let tree = tree_of(&[("Root", 5, 5), ("Far", 50, 50), ("Neg", -40, -7)]);
        assert_eq!(tree.find(50, 50).unwrap().name(), "Far");

        let exact = tree.range_search(50, 50, 0);
        assert_eq!(exact.cities.len(), 1);
        assert_eq!(exact.cities[0].name(), "Far");

        let negative = tree.range_search(-40, -10, 3);
        assert_eq!(negative.cities.len(), 1);
        assert_eq!(negative.cities[0].name(), "Neg");
    }

    #[test]
    fn test_range_search_results_are_inorder() {
        let tree = tree_of(&[("R", 10, 10), ("T", 5, 5), ("A", 6, 7), ("B", 4, 5)]);
        let result = tree.range_search(10, 10, 100);
        let names: Vec<_> = result.cities.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["T", "B", "A", "R"]);
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_of(&[("R", 10, 10), ("T", 5, 5)]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.insert(city("R", 10, 10)));
    }
}
