//! First-pass index table
//!
//! Maps an RGB triplet straight to its base-level octree slot without
//! walking the tree. Each channel value is spread so that its bits land
//! every third position (blue at bit 0 of each triple, green at bit 1,
//! red at bit 2), then shifted down to keep only the bits the configured
//! depth can resolve. Adding the three entries yields the Morton index.

use crate::options::{MAX_DEPTH, clamp_depth};

/// Spread the 8 bits of `c` to positions 0, 3, 6, ..., 21.
fn spread_bits(c: u8) -> u32 {
    (0..8).fold(0u32, |acc, bit| acc | (((c as u32) >> bit) & 1) << (bit * 3))
}

/// Per-channel lookup tables for the base-level node index
#[derive(Debug, Clone)]
pub struct IndexTable {
    red: [u32; 256],
    green: [u32; 256],
    blue: [u32; 256],
    depth: u32,
}

impl IndexTable {
    /// Build the tables for a tree of `depth` levels.
    ///
    /// The base level is `depth - 1`, so the top `depth - 1` bits of each
    /// channel survive and indices fall in `0..8^(depth - 1)`.
    pub fn new(depth: u32) -> Self {
        let depth = clamp_depth(depth);
        let shift = (MAX_DEPTH - depth) * 3;
        let mut red = [0u32; 256];
        let mut green = [0u32; 256];
        let mut blue = [0u32; 256];
        for c in 0..256usize {
            let spread = spread_bits(c as u8) >> shift;
            blue[c] = spread;
            green[c] = spread << 1;
            red[c] = spread << 2;
        }
        Self {
            red,
            green,
            blue,
            depth,
        }
    }

    /// Depth the table was built for
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Base-level node index for an RGB triplet
    #[inline]
    pub fn index(&self, r: u8, g: u8, b: u8) -> usize {
        (self.red[r as usize] + self.green[g as usize] + self.blue[b as usize]) as usize
    }
}
