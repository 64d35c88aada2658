//! Palette synthesizer
//!
//! Walks the reduced tree depth first from the root. Present children are
//! visited from octant 7 down to 0 before the node itself, and every node
//! holding pixels of its own emits its rounded average color.

use crate::error::QuantResult;
use crate::tree::{ColorNode, Octree};
use rgbquant_core::{Palette, RgbQuad};

impl Octree {
    /// Append one entry per surviving node to `palette`.
    pub(crate) fn synthesize_palette(&self, palette: &mut Palette) -> QuantResult<()> {
        self.emit(ColorNode::new(0, 0), palette)
    }

    fn emit(&self, loc: ColorNode, palette: &mut Palette) -> QuantResult<()> {
        let node = self.node(loc);
        if node.child_mask != 0 {
            for octant in (0..8).rev() {
                if node.child_mask & (1 << octant) != 0 {
                    self.emit(loc.child(octant), palette)?;
                }
            }
        }
        if let Some((r, g, b)) = node.average() {
            palette.add_color(RgbQuad::new(r, g, b))?;
        }
        Ok(())
    }
}
