//! Tree builder
//!
//! Turns the per-pixel statistics on the base level into a complete tree:
//! every non-empty base node becomes a [`ColorNode`] entry, and its pixel
//! count is propagated to all ancestors together with the child-presence
//! bits along the way.

use crate::error::{QuantError, QuantResult};
use crate::heap::ColorHeap;
use crate::tree::{ColorNode, Octree};

impl Octree {
    /// Aggregate base-level counts upward and fill `heap` with one entry
    /// per non-empty base node, in heap order.
    ///
    /// Returns the number of distinct base nodes holding pixels, or
    /// [`QuantError::WeightOverflow`] when an ancestor's pixel count would
    /// wrap.
    pub(crate) fn build_color_nodes(&mut self, heap: &mut ColorHeap) -> QuantResult<usize> {
        heap.clear();
        let base = self.base_level() as usize;
        let (ancestors, rest) = self.levels.split_at_mut(base);
        let base_nodes = &mut rest[0];

        for (index, node) in base_nodes.iter_mut().enumerate() {
            let own = node.own_pixels;
            if own == 0 {
                continue;
            }
            node.descendant_pixels = own;
            heap.push_unordered(ColorNode::new(base as u32, index as u32));

            let mut idx = index;
            for (level, nodes) in ancestors.iter_mut().enumerate().rev() {
                let bit = 1u8 << (idx & 7);
                idx >>= 3;
                let parent = &mut nodes[idx];
                let Some(total) = parent.descendant_pixels.checked_add(own) else {
                    return Err(QuantError::WeightOverflow {
                        level: level as u32,
                        index: idx,
                    });
                };
                parent.descendant_pixels = total;
                parent.child_mask |= bit;
            }
        }

        heap.heapify(self);
        Ok(heap.len())
    }
}
