//! Octree storage
//!
//! The tree is kept as one flat array per level, level `l` holding `8^l`
//! nodes. Parent and child are related by index arithmetic only:
//! the children of node `i` on level `l` are `8 * i + octant` on level
//! `l + 1`, and the parent of node `i` is `i >> 3`. No node holds a
//! reference to another.
//!
//! Pixels are accumulated on the base level (the deepest one). The
//! builder, reducer and synthesizer live in their own modules as further
//! `impl Octree` blocks.

use crate::error::{QuantError, QuantResult};
use crate::index::IndexTable;
use crate::options::clamp_depth;

/// Accumulated statistics for one cube of RGB space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeNode {
    /// Sum of red values absorbed directly into this node
    pub weight_red: u32,
    /// Sum of green values absorbed directly into this node
    pub weight_green: u32,
    /// Sum of blue values absorbed directly into this node
    pub weight_blue: u32,
    /// Pixels absorbed directly into this node
    pub own_pixels: u32,
    /// Pixels absorbed by this node and everything below it
    pub descendant_pixels: u32,
    /// Bit `i` set iff child octant `i` still holds pixels
    pub child_mask: u8,
}

impl OctreeNode {
    /// Rounded average color of the pixels held directly by this node.
    ///
    /// Returns `None` for a node without pixels of its own.
    pub fn average(&self) -> Option<(u8, u8, u8)> {
        if self.own_pixels == 0 {
            return None;
        }
        let n = self.own_pixels as u64;
        let round = |weight: u32| ((weight as u64 + (n >> 1)) / n) as u8;
        Some((
            round(self.weight_red),
            round(self.weight_green),
            round(self.weight_blue),
        ))
    }

    /// Move this node's own pixels into `dst`, leaving it empty.
    ///
    /// Returns `false` and changes neither node when any of `dst`'s sums
    /// would wrap.
    pub(crate) fn move_mass_into(&mut self, dst: &mut OctreeNode) -> bool {
        let sums = (
            dst.weight_red.checked_add(self.weight_red),
            dst.weight_green.checked_add(self.weight_green),
            dst.weight_blue.checked_add(self.weight_blue),
            dst.own_pixels.checked_add(self.own_pixels),
        );
        let (Some(red), Some(green), Some(blue), Some(count)) = sums else {
            return false;
        };
        dst.weight_red = red;
        dst.weight_green = green;
        dst.weight_blue = blue;
        dst.own_pixels = count;
        self.weight_red = 0;
        self.weight_green = 0;
        self.weight_blue = 0;
        self.own_pixels = 0;
        true
    }
}

/// Location of one node: tree level plus flat index within that level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorNode {
    pub level: u32,
    pub index: u32,
}

impl ColorNode {
    pub fn new(level: u32, index: u32) -> Self {
        Self { level, index }
    }

    /// The node one level up, or `None` for the root
    #[inline]
    pub fn parent(self) -> Option<ColorNode> {
        (self.level > 0).then(|| ColorNode::new(self.level - 1, self.index >> 3))
    }

    /// Which of its parent's eight children this node is
    #[inline]
    pub fn octant(self) -> u32 {
        self.index & 7
    }

    /// Child `octant` of this node, one level down
    #[inline]
    pub fn child(self, octant: u32) -> ColorNode {
        ColorNode::new(self.level + 1, (self.index << 3) + octant)
    }
}

/// Depth-bounded RGB octree in per-level flat storage
#[derive(Debug, Clone)]
pub struct Octree {
    pub(crate) levels: Vec<Vec<OctreeNode>>,
    index: IndexTable,
}

impl Octree {
    /// Allocate a zeroed tree with `depth` levels (clamped to `2..=9`).
    pub fn new(depth: u32) -> Self {
        let mut tree = Self {
            levels: Vec::new(),
            index: IndexTable::new(depth),
        };
        tree.resize(depth);
        tree
    }

    /// Reconfigure to `depth` levels (clamped), zeroing every node.
    ///
    /// Levels deeper than the new depth are released; missing levels are
    /// allocated.
    pub fn resize(&mut self, depth: u32) {
        let depth = clamp_depth(depth) as usize;
        self.levels.truncate(depth);
        self.clear();
        for level in self.levels.len()..depth {
            self.levels.push(vec![OctreeNode::default(); 1 << (3 * level)]);
        }
        if self.index.depth() as usize != depth {
            self.index = IndexTable::new(depth as u32);
        }
    }

    /// Zero every node, keeping the allocation
    pub fn clear(&mut self) {
        for level in &mut self.levels {
            level.fill(OctreeNode::default());
        }
    }

    /// Number of levels
    pub fn depth(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Level on which pixels are accumulated
    pub fn base_level(&self) -> u32 {
        self.depth() - 1
    }

    /// Number of nodes on `level`, zero past the base
    pub fn level_len(&self, level: u32) -> usize {
        self.levels.get(level as usize).map_or(0, Vec::len)
    }

    /// Node at `loc`, if it exists
    pub fn get(&self, loc: ColorNode) -> Option<&OctreeNode> {
        self.levels.get(loc.level as usize)?.get(loc.index as usize)
    }

    #[inline]
    pub(crate) fn node(&self, loc: ColorNode) -> &OctreeNode {
        &self.levels[loc.level as usize][loc.index as usize]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, loc: ColorNode) -> &mut OctreeNode {
        &mut self.levels[loc.level as usize][loc.index as usize]
    }

    /// Base-level index an RGB triplet is accumulated into
    #[inline]
    pub fn base_index(&self, r: u8, g: u8, b: u8) -> usize {
        self.index.index(r, g, b)
    }

    /// Accumulate one pixel.
    ///
    /// Weights wrap on overflow: the sum of one channel over all pixels
    /// landing in a single node must stay below `2^32`, i.e. roughly 16.8
    /// million pixels of full intensity per node. Use
    /// [`Octree::try_insert`] when that cannot be guaranteed.
    #[inline]
    pub fn insert(&mut self, r: u8, g: u8, b: u8) {
        let index = self.index.index(r, g, b);
        let base = self.levels.len() - 1;
        let node = &mut self.levels[base][index];
        node.weight_red = node.weight_red.wrapping_add(r as u32);
        node.weight_green = node.weight_green.wrapping_add(g as u32);
        node.weight_blue = node.weight_blue.wrapping_add(b as u32);
        node.own_pixels = node.own_pixels.wrapping_add(1);
    }

    /// Accumulate one pixel, refusing to wrap any counter.
    pub fn try_insert(&mut self, r: u8, g: u8, b: u8) -> QuantResult<()> {
        let index = self.index.index(r, g, b);
        let base = self.levels.len() - 1;
        let node = &mut self.levels[base][index];
        let sums = (
            node.weight_red.checked_add(r as u32),
            node.weight_green.checked_add(g as u32),
            node.weight_blue.checked_add(b as u32),
            node.own_pixels.checked_add(1),
        );
        let (Some(red), Some(green), Some(blue), Some(count)) = sums else {
            return Err(QuantError::WeightOverflow {
                level: base as u32,
                index,
            });
        };
        node.weight_red = red;
        node.weight_green = green;
        node.weight_blue = blue;
        node.own_pixels = count;
        Ok(())
    }

    /// Total pixels held directly by base-level nodes
    pub fn base_pixel_count(&self) -> u64 {
        self.levels
            .last()
            .map_or(0, |base| base.iter().map(|n| n.own_pixels as u64).sum())
    }
}
