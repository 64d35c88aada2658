//! Quantizer configuration

/// Shallowest usable tree
pub const MIN_DEPTH: u32 = 2;
/// Deepest tree; its base level resolves all 8 bits of every channel
pub const MAX_DEPTH: u32 = 9;
/// Depth used by [`OctreeOptions::default`]
pub const DEFAULT_DEPTH: u32 = 5;
/// Largest palette that can be requested
pub const MAX_COLORS: u32 = 256;

/// Clamp a requested tree depth into `MIN_DEPTH..=MAX_DEPTH`.
#[inline]
pub fn clamp_depth(depth: u32) -> u32 {
    depth.clamp(MIN_DEPTH, MAX_DEPTH)
}

/// Per-channel weights of the perceptual distance
/// `red * dR^2 + green * dG^2 + blue * dB^2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelWeights {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ChannelWeights {
    /// Power-of-two approximation of the luma weights
    pub const FAST: Self = Self {
        red: 32,
        green: 64,
        blue: 16,
    };

    /// Rec. 601 luma weights in percent
    pub const LUMA: Self = Self {
        red: 30,
        green: 59,
        blue: 11,
    };
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self::FAST
    }
}

/// Options for octree quantization
#[derive(Debug, Clone)]
pub struct OctreeOptions {
    /// Number of tree levels, clamped to `MIN_DEPTH..=MAX_DEPTH`
    pub depth: u32,
    /// Maximum number of colors in the output palette
    pub max_colors: u32,
    /// Weights for nearest-color matching
    pub weights: ChannelWeights,
}

impl Default for OctreeOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            max_colors: MAX_COLORS,
            weights: ChannelWeights::default(),
        }
    }
}
