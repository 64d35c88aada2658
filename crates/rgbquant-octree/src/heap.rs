//! Min-heap of surviving color nodes
//!
//! The heap stores [`ColorNode`] locators, never nodes, so the tree stays
//! flat while only the locators move. Slot 0 is unused; the live entries
//! are `1..=len` and slot 1 always holds the least populous survivor.
//!
//! Entries are ordered by the referenced node's `descendant_pixels`. Equal
//! counts go to the deeper node first, then to the lower index, so the
//! order is total and a node is never reduced while a live entry below it
//! remains.

use crate::tree::{ColorNode, Octree};
use std::cmp::Reverse;

type Key = (u32, Reverse<u32>, u32);

#[inline]
fn key(tree: &Octree, loc: ColorNode) -> Key {
    (
        tree.node(loc).descendant_pixels,
        Reverse(loc.level),
        loc.index,
    )
}

/// Binary min-heap of [`ColorNode`] locators, 1-based
#[derive(Debug, Clone)]
pub struct ColorHeap {
    slots: Vec<ColorNode>,
}

impl ColorHeap {
    /// Empty heap with room for `capacity` entries plus the unused slot 0
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(ColorNode::default());
        Self { slots }
    }

    /// Number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.slots.truncate(1);
    }

    /// Live entries in heap order
    pub fn entries(&self) -> &[ColorNode] {
        &self.slots[1..]
    }

    /// The least populous survivor
    #[inline]
    pub fn peek(&self) -> Option<ColorNode> {
        self.slots.get(1).copied()
    }

    /// Append without restoring heap order; call [`ColorHeap::heapify`]
    /// once all entries are in.
    pub(crate) fn push_unordered(&mut self, loc: ColorNode) {
        self.slots.push(loc);
    }

    /// Bottom-up heap construction over all pushed entries
    pub(crate) fn heapify(&mut self, tree: &Octree) {
        for pos in (1..=self.len() / 2).rev() {
            self.sift_down(pos, tree);
        }
    }

    /// Point the root at `loc` and restore order
    pub(crate) fn replace_top(&mut self, loc: ColorNode, tree: &Octree) {
        if self.is_empty() {
            return;
        }
        self.slots[1] = loc;
        self.sift_down(1, tree);
    }

    /// Drop the root, moving the last entry up in its place
    pub(crate) fn remove_top(&mut self, tree: &Octree) -> Option<ColorNode> {
        if self.is_empty() {
            return None;
        }
        let last = self.slots.pop()?;
        if self.is_empty() {
            return Some(last);
        }
        let top = std::mem::replace(&mut self.slots[1], last);
        self.sift_down(1, tree);
        Some(top)
    }

    fn sift_down(&mut self, mut pos: usize, tree: &Octree) {
        let len = self.len();
        let item = self.slots[pos];
        let item_key = key(tree, item);
        loop {
            let mut child = pos * 2;
            if child > len {
                break;
            }
            if child < len && key(tree, self.slots[child + 1]) < key(tree, self.slots[child]) {
                child += 1;
            }
            if item_key <= key(tree, self.slots[child]) {
                break;
            }
            self.slots[pos] = self.slots[child];
            pos = child;
        }
        self.slots[pos] = item;
    }
}
