//! Binary search tree of records keyed by name.
//!
//! Inserting a name equal to a node's name always descends left, so for every
//! node the left subtree holds names less than or equal to its own and the
//! right subtree strictly greater ones. Removal keeps that shape by promoting
//! the in-order predecessor.

use crate::config::{City, CityRef, LevelEntry};
use std::cmp::Ordering;
use std::rc::Rc;

#[derive(Debug)]
struct NameNode {
    city: CityRef,
    left: Option<Box<NameNode>>,
    right: Option<Box<NameNode>>,
}

#[derive(Debug, Default)]
pub struct NameIndex {
    root: Option<Box<NameNode>>,
    len: usize,
}

impl NameIndex {
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

    pub fn height(&self) -> usize {
        fn height_of(node: Option<&NameNode>) -> usize {
            node.map_or(0, |n| {
                1 + height_of(n.left.as_deref()).max(height_of(n.right.as_deref()))
            })
        }
        height_of(self.root.as_deref())
    }

    pub fn insert(&mut self, city: CityRef) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if city.cmp_name(&node.city) == Ordering::Greater {
                &mut node.right
            } else {
                &mut node.left
            };
        }
        *slot = Some(Box::new(NameNode {
            city,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    /// Removes the node holding exactly `city` (name and coordinates).
    pub fn remove_exact(&mut self, city: &City) -> bool {
        let removed = remove_from(&mut self.root, city);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// First record named `name` in preorder.
    ///
    /// Matches can only live on the search path for `name` and below its
    /// first match, so the first match met while descending is also the first
    /// one a full preorder walk would reach.
    pub fn find_first_by_name(&self, name: &str) -> Option<&CityRef> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match name.cmp(node.city.name()) {
                Ordering::Equal => return Some(&node.city),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Every record named `name`, in inorder.
    pub fn list_by_name(&self, name: &str) -> Vec<CityRef> {
        fn collect(node: Option<&NameNode>, name: &str, out: &mut Vec<CityRef>) {
            let Some(node) = node else { return };
            match name.cmp(node.city.name()) {
                Ordering::Greater => collect(node.right.as_deref(), name, out),
                Ordering::Less => collect(node.left.as_deref(), name, out),
                Ordering::Equal => {
                    collect(node.left.as_deref(), name, out);
                    out.push(Rc::clone(&node.city));
                }
            }
        }

        let mut out = Vec::new();
        collect(self.root.as_deref(), name, &mut out);
        out
    }

    /// Inorder traversal annotated with each node's depth.
    pub fn levels(&self) -> Vec<LevelEntry<CityRef>> {
        fn walk(node: Option<&NameNode>, depth: usize, out: &mut Vec<LevelEntry<CityRef>>) {
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

fn remove_from(slot: &mut Option<Box<NameNode>>, target: &City) -> bool {
    let Some(node) = slot.as_mut() else {
        return false;
    };
    match target.cmp_name(&node.city) {
        Ordering::Greater => remove_from(&mut node.right, target),
        Ordering::Less => remove_from(&mut node.left, target),
        Ordering::Equal if *node.city != *target => remove_from(&mut node.left, target),
        Ordering::Equal => {
            unlink(slot);
            true
        }
    }
}

/// Detaches the node in `slot`, promoting the maximum of its left subtree
/// when both children are present.
fn unlink(slot: &mut Option<Box<NameNode>>) {
    let Some(node) = slot.take() else { return };
    let NameNode { left, right, .. } = *node;

    *slot = match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (mut left, right) => take_max(&mut left).map(|city| {
            Box::new(NameNode {
                city,
                left,
                right,
            })
        }),
    };
}

/// Removes and returns the rightmost record under `slot`.
fn take_max(slot: &mut Option<Box<NameNode>>) -> Option<CityRef> {
    if slot.as_ref()?.right.is_some() {
        return take_max(&mut slot.as_mut()?.right);
    }
    let node = *slot.take()?;
    *slot = node.left;
    Some(node.city)
}
