//! rgbquant octree - Palette generation by octree color quantization
//!
//! Reduces a stream of 24-bit RGB pixels to a palette of at most 256
//! colors and maps colors back to their nearest palette entry:
//!
//! - **Index table** ([`index`]): RGB to base-level node in three lookups
//! - **Octree storage** ([`tree`]): per-level flat node arrays, depth 2-9
//! - **Color-node heap** ([`heap`]): min-heap of surviving node locators
//! - **Builder, reducer, synthesizer**: bottom-up counts, greedy merging of
//!   the least populous node, depth-first palette emission
//! - **Nearest color** ([`nearest`]): weighted scan with a one-entry cache
//! - **Quantizer** ([`quantizer`]): phase-checked front end
//! - **Pipeline** ([`pipeline`]): whole-buffer convenience entry point
//!
//! # Example
//!
//! ```
//! use rgbquant_octree::OctreeQuantizer;
//!
//! let mut q = OctreeQuantizer::new();
//! q.set_depth(5).unwrap();
//! for _ in 0..1000 {
//!     q.insert(200, 50, 10).unwrap();
//! }
//! let palette = q.build_palette(16).unwrap();
//! assert_eq!(palette.get_rgb(0), Some((200, 50, 10)));
//! assert_eq!(q.nearest_color_index(190, 60, 0).unwrap(), Some(0));
//! ```

mod builder;
pub mod distance;
pub mod error;
pub mod heap;
pub mod index;
pub mod nearest;
pub mod options;
pub mod pipeline;
pub mod quantizer;
mod reduce;
mod synth;
pub mod tree;

// Re-export core types
pub use rgbquant_core;

// Re-export error types
pub use error::{QuantError, QuantResult};

pub use distance::DistanceTable;
pub use heap::ColorHeap;
pub use index::IndexTable;
pub use nearest::{NearestResolver, NearestStats};
pub use options::{
    ChannelWeights, DEFAULT_DEPTH, MAX_COLORS, MAX_DEPTH, MIN_DEPTH, OctreeOptions, clamp_depth,
};
pub use pipeline::{QuantizedPixels, quantize_rgb};
pub use quantizer::{OctreeQuantizer, Phase};
pub use tree::{ColorNode, Octree, OctreeNode};
