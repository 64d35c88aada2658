//! Color reducer
//!
//! Greedily folds the least populous surviving node into its parent until
//! at most `max_colors` survivors remain. When the parent already holds
//! pixels it also has its own heap entry, so the merged entry is dropped;
//! otherwise the entry is re-pointed at the parent and the count stays the
//! same for this step.

use crate::error::{QuantError, QuantResult};
use crate::heap::ColorHeap;
use crate::tree::Octree;
use log::trace;

impl Octree {
    /// Reduce the live entries in `heap` to at most `max_colors`.
    ///
    /// Returns the number of merges performed, or
    /// [`QuantError::WeightOverflow`] when a parent's sums would wrap.
    pub(crate) fn reduce_colors(
        &mut self,
        heap: &mut ColorHeap,
        max_colors: usize,
    ) -> QuantResult<usize> {
        let mut merges = 0;
        while heap.len() > max_colors {
            let Some(top) = heap.peek() else { break };
            // The root has nowhere to go; it only reaches the top once it
            // is the last entry.
            let Some(parent) = top.parent() else { break };

            let mut source = *self.node(top);
            let dst = self.node_mut(parent);
            let parent_held_pixels = dst.own_pixels != 0;
            if !source.move_mass_into(dst) {
                return Err(QuantError::WeightOverflow {
                    level: parent.level,
                    index: parent.index as usize,
                });
            }
            dst.child_mask &= !(1u8 << top.octant());
            *self.node_mut(top) = source;

            if parent_held_pixels {
                heap.remove_top(self);
            } else {
                heap.replace_top(parent, self);
            }
            merges += 1;
            trace!(
                "merged node {}:{} into {}:{} ({} entries left)",
                top.level,
                top.index,
                parent.level,
                parent.index,
                heap.len()
            );
        }
        Ok(merges)
    }
}
