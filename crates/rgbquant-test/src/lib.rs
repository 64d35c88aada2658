//! rgbquant-test - Regression test helpers for rgbquant
//!
//! Provides [`RegParams`] for counting and reporting checks, plus a few
//! deterministic synthetic pixel sources so tests never depend on image
//! files.
//!
//! # Usage
//!
//! ```ignore
//! use rgbquant_test::{RegParams, gray_ramp};
//!
//! let mut rp = RegParams::new("octree_quant");
//! rp.compare_values(16.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::RegParams;

/// Every gray level once: `(i, i, i)` for `i` in `0..=255`.
pub fn gray_ramp() -> Vec<[u8; 3]> {
    (0..=255u8).map(|i| [i, i, i]).collect()
}

/// A `w` x `h` gradient, red along x, green along y, blue diagonal.
pub fn color_gradient(w: u32, h: u32) -> Vec<[u8; 3]> {
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            let r = ((x * 255) / w.max(1)) as u8;
            let g = ((y * 255) / h.max(1)) as u8;
            let b = (128u32.wrapping_add((x + y) * 64 / (w + h).max(1))) as u8;
            pixels.push([r, g, b]);
        }
    }
    pixels
}

/// `count` copies of each color in `colors`, in blocks.
pub fn color_blocks(colors: &[[u8; 3]], count: usize) -> Vec<[u8; 3]> {
    colors
        .iter()
        .flat_map(|&c| std::iter::repeat_n(c, count))
        .collect()
}

/// `n` pseudo-random pixels from a fixed xorshift sequence.
///
/// The same `seed` always yields the same pixels. A zero seed is remapped
/// since xorshift never leaves the all-zero state.
pub fn pseudo_random_pixels(n: usize, seed: u32) -> Vec<[u8; 3]> {
    let mut state = if seed == 0 { 0x9e37_79b9 } else { seed };
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            [r, g, b]
        })
        .collect()
}
