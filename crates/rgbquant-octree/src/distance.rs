//! Perceptual distance table
//!
//! Precomputes `weight * delta^2` for every signed channel difference in
//! `-255..=255`, so a palette scan costs three lookups and two adds per
//! entry.

use crate::options::ChannelWeights;
use rgbquant_core::RgbQuad;

const SPAN: usize = 511;
const MIDDLE: i32 = 255;

/// Weighted squared-difference lookup, one table per channel
#[derive(Debug, Clone)]
pub struct DistanceTable {
    red: [u32; SPAN],
    green: [u32; SPAN],
    blue: [u32; SPAN],
    weights: ChannelWeights,
}

impl DistanceTable {
    pub fn new(weights: ChannelWeights) -> Self {
        let mut red = [0u32; SPAN];
        let mut green = [0u32; SPAN];
        let mut blue = [0u32; SPAN];
        for (slot, delta) in (-MIDDLE..=MIDDLE).enumerate() {
            let square = (delta * delta) as u32;
            red[slot] = square * weights.red as u32;
            green[slot] = square * weights.green as u32;
            blue[slot] = square * weights.blue as u32;
        }
        Self {
            red,
            green,
            blue,
            weights,
        }
    }

    pub fn weights(&self) -> ChannelWeights {
        self.weights
    }

    /// Distance between a palette entry and an RGB triplet
    #[inline]
    pub fn distance(&self, entry: &RgbQuad, r: u8, g: u8, b: u8) -> u32 {
        self.red[slot(entry.red, r)]
            + self.green[slot(entry.green, g)]
            + self.blue[slot(entry.blue, b)]
    }
}

impl Default for DistanceTable {
    fn default() -> Self {
        Self::new(ChannelWeights::default())
    }
}

#[inline]
fn slot(a: u8, b: u8) -> usize {
    (a as i32 - b as i32 + MIDDLE) as usize
}
