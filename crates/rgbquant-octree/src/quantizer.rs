//! Phase-checked octree quantizer
//!
//! [`OctreeQuantizer`] owns the tree, the color-node heap, the palette and
//! the nearest-color cache, and enforces the order they must be used in:
//!
//! ```text
//! Unconfigured --set_depth--> Accumulating --build_palette--> Built
//!                                  ^                            |
//!                                  +----------clear-------------+
//! ```
//!
//! Pixels may only be inserted while accumulating, the palette is built
//! once per accumulation, and nearest-color queries need a built palette.
//! Calls out of order return [`QuantError::InvalidPhase`] instead of
//! silently corrupting the statistics.

use crate::error::{QuantError, QuantResult};
use crate::heap::ColorHeap;
use crate::nearest::{NearestResolver, NearestStats};
use crate::options::{ChannelWeights, MAX_COLORS, OctreeOptions, clamp_depth};
use crate::tree::{ColorNode, Octree, OctreeNode};
use log::debug;
use rgbquant_core::{Palette, RgbQuad, color};
use std::fmt;

/// Lifecycle phase of an [`OctreeQuantizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No storage allocated
    Unconfigured,
    /// Accepting pixels
    Accumulating,
    /// Palette built; accepting nearest-color queries
    Built,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Unconfigured => "unconfigured",
            Phase::Accumulating => "accumulating",
            Phase::Built => "built",
        };
        f.write_str(name)
    }
}

/// Octree color quantizer with explicit phases
#[derive(Debug, Clone)]
pub struct OctreeQuantizer {
    tree: Option<Octree>,
    heap: ColorHeap,
    palette: Option<Palette>,
    resolver: NearestResolver,
    phase: Phase,
    pixel_count: u64,
    unique_colors: usize,
}

impl OctreeQuantizer {
    /// Unconfigured quantizer using the default distance weights
    pub fn new() -> Self {
        Self::with_weights(ChannelWeights::default())
    }

    /// Unconfigured quantizer using `weights` for nearest-color matching
    pub fn with_weights(weights: ChannelWeights) -> Self {
        Self {
            tree: None,
            heap: ColorHeap::with_capacity(0),
            palette: None,
            resolver: NearestResolver::new(weights),
            phase: Phase::Unconfigured,
            pixel_count: 0,
            unique_colors: 0,
        }
    }

    /// Quantizer configured with the depth and weights from `options`
    pub fn from_options(options: &OctreeOptions) -> QuantResult<Self> {
        let mut quantizer = Self::with_weights(options.weights);
        quantizer.set_depth(options.depth)?;
        Ok(quantizer)
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured number of tree levels, or `None` when unconfigured
    pub fn depth(&self) -> Option<u32> {
        self.tree.as_ref().map(Octree::depth)
    }

    /// Configure, reconfigure or release the tree.
    ///
    /// Nonzero depths are clamped to `2..=9`; asking for the current depth
    /// does nothing. Depth 0 releases all storage and is allowed in any
    /// phase. Changing the depth once pixels have been inserted requires
    /// [`OctreeQuantizer::clear`] first.
    pub fn set_depth(&mut self, depth: u32) -> QuantResult<()> {
        if depth == 0 {
            self.release();
            return Ok(());
        }
        let depth = clamp_depth(depth);
        if self.depth() == Some(depth) {
            return Ok(());
        }
        if self.phase == Phase::Built || self.pixel_count > 0 {
            return Err(QuantError::InvalidPhase {
                operation: "set_depth",
                phase: self.phase,
            });
        }

        let tree = match self.tree.take() {
            Some(mut tree) => {
                tree.resize(depth);
                tree
            }
            None => Octree::new(depth),
        };
        self.heap = ColorHeap::with_capacity(tree.level_len(tree.base_level()));
        self.tree = Some(tree);
        self.phase = Phase::Accumulating;
        debug!("octree depth set to {depth}");
        Ok(())
    }

    fn release(&mut self) {
        self.tree = None;
        self.heap = ColorHeap::with_capacity(0);
        self.palette = None;
        self.resolver.invalidate();
        self.phase = Phase::Unconfigured;
        self.pixel_count = 0;
        self.unique_colors = 0;
    }

    /// Zero all statistics and drop the palette, keeping the depth.
    ///
    /// Returns to the accumulating phase so a new image can be processed.
    pub fn clear(&mut self) -> QuantResult<()> {
        let tree = self.tree.as_mut().ok_or(QuantError::NotConfigured)?;
        tree.clear();
        self.heap.clear();
        self.palette = None;
        self.resolver.invalidate();
        self.phase = Phase::Accumulating;
        self.pixel_count = 0;
        self.unique_colors = 0;
        Ok(())
    }

    fn check_accumulating(&self, operation: &'static str) -> QuantResult<()> {
        match self.phase {
            Phase::Accumulating => Ok(()),
            Phase::Unconfigured => Err(QuantError::NotConfigured),
            Phase::Built => Err(QuantError::InvalidPhase {
                operation,
                phase: self.phase,
            }),
        }
    }

    fn accumulating_tree(&mut self, operation: &'static str) -> QuantResult<&mut Octree> {
        self.check_accumulating(operation)?;
        self.tree.as_mut().ok_or(QuantError::NotConfigured)
    }

    /// Accumulate one pixel.
    ///
    /// Per-node channel sums wrap past `u32::MAX`; see
    /// [`Octree::insert`]. Use [`OctreeQuantizer::try_insert`] for a
    /// checked variant.
    pub fn insert(&mut self, r: u8, g: u8, b: u8) -> QuantResult<()> {
        self.accumulating_tree("insert")?.insert(r, g, b);
        self.pixel_count += 1;
        Ok(())
    }

    /// Accumulate one pixel, failing instead of wrapping a node's sums
    pub fn try_insert(&mut self, r: u8, g: u8, b: u8) -> QuantResult<()> {
        self.accumulating_tree("try_insert")?.try_insert(r, g, b)?;
        self.pixel_count += 1;
        Ok(())
    }

    /// Accumulate a packed `0xRRGGBBAA` pixel; alpha is ignored
    pub fn insert_pixel(&mut self, pixel: u32) -> QuantResult<()> {
        let (r, g, b) = color::extract_rgb(pixel);
        self.insert(r, g, b)
    }

    /// Accumulate every pixel of `pixels`
    pub fn insert_slice(&mut self, pixels: &[[u8; 3]]) -> QuantResult<()> {
        let tree = self.accumulating_tree("insert_slice")?;
        for &[r, g, b] in pixels {
            tree.insert(r, g, b);
        }
        self.pixel_count += pixels.len() as u64;
        Ok(())
    }

    /// Number of pixels inserted since the last configure or clear
    pub fn pixel_count(&self) -> u64 {
        self.pixel_count
    }

    /// Build, reduce and synthesize the palette.
    ///
    /// `max_colors` must be in `1..=256`. The palette holds one entry per
    /// surviving tree node and never more than `max_colors`.
    ///
    /// Merging nodes is checked: if a merged node's sums would wrap, the
    /// build fails with [`QuantError::WeightOverflow`], the accumulated
    /// pixels are discarded and the quantizer is back to accumulating.
    pub fn build_palette(&mut self, max_colors: u32) -> QuantResult<&Palette> {
        if max_colors == 0 || max_colors > MAX_COLORS {
            return Err(QuantError::InvalidParameters(format!(
                "max_colors must be between 1 and {MAX_COLORS}, got {max_colors}"
            )));
        }
        self.check_accumulating("build_palette")?;
        let tree = self.tree.as_mut().ok_or(QuantError::NotConfigured)?;

        let (unique, merges) = match build_and_reduce(tree, &mut self.heap, max_colors) {
            Ok(counts) => counts,
            Err(err) => {
                debug!("palette build failed, discarding {} pixels: {err}", self.pixel_count);
                self.clear()?;
                return Err(err);
            }
        };
        let tree = self.tree.as_ref().ok_or(QuantError::NotConfigured)?;
        let mut palette = Palette::new(max_colors as usize)?;
        tree.synthesize_palette(&mut palette)?;
        debug_assert_eq!(palette.len(), self.heap.len());
        debug!(
            "built palette: {} pixels, {} unique nodes, {} merges, {} colors",
            self.pixel_count,
            unique,
            merges,
            palette.len()
        );

        self.unique_colors = unique;
        self.resolver.invalidate();
        self.phase = Phase::Built;
        Ok(self.palette.insert(palette))
    }

    /// Build the palette into a caller-provided buffer.
    ///
    /// The buffer must have room for `max_colors` entries. Returns the
    /// number of entries written.
    pub fn build_palette_into(
        &mut self,
        out: &mut [RgbQuad],
        max_colors: u32,
    ) -> QuantResult<usize> {
        let needed = max_colors as usize;
        if out.len() < needed {
            return Err(QuantError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }
        let palette = self.build_palette(max_colors)?;
        let colors = palette.colors();
        out[..colors.len()].copy_from_slice(colors);
        Ok(colors.len())
    }

    /// The built palette, if any
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Number of surviving tree nodes (equals the palette length once built)
    pub fn colors_in_tree(&self) -> usize {
        self.heap.len()
    }

    /// Distinct base-level nodes before reduction in the last build
    pub fn unique_colors(&self) -> usize {
        self.unique_colors
    }

    /// Palette index of the entry nearest to `(r, g, b)`.
    ///
    /// Returns `Ok(None)` when the built palette is empty (no pixels were
    /// inserted).
    pub fn nearest_color_index(&mut self, r: u8, g: u8, b: u8) -> QuantResult<Option<usize>> {
        match (self.phase, self.palette.as_ref()) {
            (Phase::Built, Some(palette)) => Ok(self.resolver.resolve(palette, r, g, b)),
            (Phase::Unconfigured, _) => Err(QuantError::NotConfigured),
            (phase, _) => Err(QuantError::InvalidPhase {
                operation: "nearest_color_index",
                phase,
            }),
        }
    }

    /// Lookup counters of the nearest-color resolver
    pub fn nearest_stats(&self) -> NearestStats {
        self.resolver.stats()
    }

    /// Node at `(level, index)`, for inspecting the tree
    pub fn node(&self, level: u32, index: u32) -> Option<&OctreeNode> {
        self.tree.as_ref()?.get(ColorNode::new(level, index))
    }

    /// Locators of the surviving nodes, in heap order
    pub fn surviving_nodes(&self) -> &[ColorNode] {
        self.heap.entries()
    }
}

/// Unique base-node count and number of merges
fn build_and_reduce(
    tree: &mut Octree,
    heap: &mut ColorHeap,
    max_colors: u32,
) -> QuantResult<(usize, usize)> {
    let unique = tree.build_color_nodes(heap)?;
    let merges = tree.reduce_colors(heap, max_colors as usize)?;
    Ok((unique, merges))
}

impl Default for OctreeQuantizer {
    fn default() -> Self {
        Self::new()
    }
}
