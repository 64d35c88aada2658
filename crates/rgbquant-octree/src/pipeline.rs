//! Buffer-level quantization
//!
//! Runs the whole configure, accumulate, build, map sequence over a slice
//! of RGB pixels and returns the palette together with one index per
//! pixel, ready for an indexed-color encoder.

use crate::error::{QuantError, QuantResult};
use crate::options::OctreeOptions;
use crate::quantizer::OctreeQuantizer;
use rgbquant_core::Palette;

/// Palette plus per-pixel palette indices
#[derive(Debug, Clone)]
pub struct QuantizedPixels {
    pub palette: Palette,
    /// One palette index per input pixel, in input order
    pub indices: Vec<u8>,
}

/// Quantize `pixels` to at most `options.max_colors` colors.
pub fn quantize_rgb(pixels: &[[u8; 3]], options: &OctreeOptions) -> QuantResult<QuantizedPixels> {
    if pixels.is_empty() {
        return Err(QuantError::EmptyInput);
    }

    let mut quantizer = OctreeQuantizer::from_options(options)?;
    quantizer.insert_slice(pixels)?;
    let palette = quantizer.build_palette(options.max_colors)?.clone();

    let mut indices = Vec::with_capacity(pixels.len());
    for &[r, g, b] in pixels {
        let index = quantizer
            .nearest_color_index(r, g, b)?
            .ok_or(QuantError::EmptyInput)?;
        indices.push(index as u8);
    }

    Ok(QuantizedPixels { palette, indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            quantize_rgb(&[], &OctreeOptions::default()),
            Err(QuantError::EmptyInput)
        ));
    }

    #[test]
    fn test_few_colors_map_exactly() {
        let colors = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];
        let pixels = rgbquant_test::color_blocks(&colors, 100);
        let result = quantize_rgb(&pixels, &OctreeOptions::default()).unwrap();
        assert_eq!(result.palette.len(), 3);
        assert_eq!(result.indices.len(), 300);
        for (pixel, &index) in pixels.iter().zip(&result.indices) {
            let (r, g, b) = result.palette.get_rgb(index as usize).unwrap();
            assert_eq!([r, g, b], *pixel);
        }
    }

    #[test]
    fn test_invalid_max_colors() {
        let options = OctreeOptions {
            max_colors: 0,
            ..Default::default()
        };
        assert!(matches!(
            quantize_rgb(&[[1, 2, 3]], &options),
            Err(QuantError::InvalidParameters(_))
        ));
    }
}
