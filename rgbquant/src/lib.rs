//! rgbquant - Octree palette quantization
//!
//! Reduces 24-bit RGB images to a palette of at most 256 colors and maps
//! every pixel to its nearest palette entry.
//!
//! # Overview
//!
//! - Palette and color primitives (`Palette`, `RgbQuad`, packed pixels)
//! - Octree accumulation, reduction and palette synthesis
//! - Weighted nearest-color lookup with a one-entry cache
//!
//! # Example
//!
//! ```
//! use rgbquant::{OctreeOptions, quantize_rgb};
//!
//! let pixels = vec![[255, 0, 0], [250, 5, 0], [0, 0, 255]];
//! let result = quantize_rgb(&pixels, &OctreeOptions::default()).unwrap();
//! assert!(result.palette.len() <= 3);
//! assert_eq!(result.indices.len(), 3);
//! ```

// Re-export core types
pub use rgbquant_core::*;

// The quantizer crate as a module, plus its main entry points
pub use rgbquant_octree as octree;
pub use rgbquant_octree::{
    ChannelWeights, OctreeOptions, OctreeQuantizer, Phase, QuantError, QuantResult,
    QuantizedPixels, quantize_rgb,
};
