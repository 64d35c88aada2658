//! Palette - Bounded color table produced by quantization
//!
//! A palette holds at most 256 entries, so every index fits in one byte of
//! indexed-color output.

use crate::error::{Error, Result};

/// Largest palette an indexed image can address with 8-bit indices.
pub const MAX_PALETTE_SIZE: usize = 256;

/// RGB palette entry
///
/// Field order matches the 4-byte blue/green/red/reserved quad used by
/// paletted raster formats, so a `&[RgbQuad]` can be handed to legacy
/// writers unchanged.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbQuad {
    /// Blue component (stored first for BMP compatibility)
    pub blue: u8,
    /// Green component
    pub green: u8,
    /// Red component
    pub red: u8,
    /// Padding byte, always written as zero
    pub reserved: u8,
}

impl RgbQuad {
    /// Create a new RGB entry
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved: 0,
        }
    }

    /// Create a grayscale entry
    pub fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// RGB components as a tuple
    #[inline]
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Little-endian view of the quad: `0xXXRRGGBB`.
    #[inline]
    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes([self.blue, self.green, self.red, self.reserved])
    }

    /// Inverse of [`RgbQuad::to_u32`].
    #[inline]
    pub fn from_u32(value: u32) -> Self {
        let [blue, green, red, reserved] = value.to_le_bytes();
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }
}

/// Ordered color table with a fixed upper bound on its length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<RgbQuad>,
    capacity: usize,
}

impl Palette {
    /// Create an empty palette that accepts up to `capacity` entries.
    ///
    /// `capacity` must be in `1..=256`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_PALETTE_SIZE {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            colors: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get maximum number of entries
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<&RgbQuad> {
        self.colors.get(index)
    }

    /// Get RGB values at index
    pub fn get_rgb(&self, index: usize) -> Option<(u8, u8, u8)> {
        self.colors.get(index).map(RgbQuad::rgb)
    }

    /// Add a color, returning its index
    pub fn add_color(&mut self, color: RgbQuad) -> Result<usize> {
        if self.colors.len() >= self.capacity {
            return Err(Error::PaletteFull {
                capacity: self.capacity,
            });
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Add an RGB color, returning its index
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(RgbQuad::new(r, g, b))
    }

    /// Replace the color at `index`
    pub fn set_color(&mut self, index: usize, color: RgbQuad) -> Result<()> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Get all colors as a slice
    pub fn colors(&self) -> &[RgbQuad] {
        &self.colors
    }

    /// Check if every entry has `red == green == blue`
    pub fn is_grayscale(&self) -> bool {
        self.colors
            .iter()
            .all(|c| c.red == c.green && c.green == c.blue)
    }

    /// Serialize in the legacy layout: 4 bytes per entry, blue first.
    pub fn to_bgrx_bytes(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|c| [c.blue, c.green, c.red, c.reserved])
            .collect()
    }

    /// Parse the legacy 4-byte-per-entry layout.
    ///
    /// The palette capacity is the number of entries found.
    pub fn from_bgrx_bytes(data: &[u8]) -> Result<Self> {
        if data.len() % 4 != 0 {
            return Err(Error::InvalidByteLength(data.len()));
        }
        let mut palette = Self::new(data.len() / 4)?;
        for chunk in data.chunks_exact(4) {
            palette.add_color(RgbQuad {
                blue: chunk[0],
                green: chunk[1],
                red: chunk[2],
                reserved: chunk[3],
            })?;
        }
        Ok(palette)
    }
}
