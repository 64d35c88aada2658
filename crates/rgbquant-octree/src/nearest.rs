//! Nearest-color resolver
//!
//! A linear scan over the palette under the weighted distance of
//! [`DistanceTable`], fronted by a one-entry cache of the last query.
//! Palettes hold at most 256 entries and neighbouring pixels often repeat,
//! so the scan plus cache is cheaper than any search structure.

use crate::distance::DistanceTable;
use crate::options::ChannelWeights;
use rgbquant_core::{Palette, color};

/// Query counters, for checking cache behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestStats {
    /// Total lookups served
    pub queries: u64,
    /// Lookups answered from the cache without scanning
    pub cache_hits: u64,
}

/// Weighted nearest-color search with a last-query cache
#[derive(Debug, Clone)]
pub struct NearestResolver {
    table: DistanceTable,
    last: Option<(u32, Option<usize>)>,
    stats: NearestStats,
}

impl NearestResolver {
    pub fn new(weights: ChannelWeights) -> Self {
        Self {
            table: DistanceTable::new(weights),
            last: None,
            stats: NearestStats::default(),
        }
    }

    pub fn weights(&self) -> ChannelWeights {
        self.table.weights()
    }

    pub fn stats(&self) -> NearestStats {
        self.stats
    }

    /// Forget the cached query; required whenever the palette changes.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Index of the palette entry closest to `(r, g, b)`.
    ///
    /// Ties go to the lowest index. Returns `None` only for an empty
    /// palette.
    pub fn resolve(&mut self, palette: &Palette, r: u8, g: u8, b: u8) -> Option<usize> {
        self.stats.queries += 1;
        let key = color::pack_rgb24(r, g, b);
        if let Some((last_key, last_index)) = self.last
            && last_key == key
        {
            self.stats.cache_hits += 1;
            return last_index;
        }

        let mut best = None;
        let mut best_distance = u32::MAX;
        for (index, entry) in palette.colors().iter().enumerate() {
            let distance = self.table.distance(entry, r, g, b);
            if distance < best_distance {
                best_distance = distance;
                best = Some(index);
            }
        }
        self.last = Some((key, best));
        best
    }
}

impl Default for NearestResolver {
    fn default() -> Self {
        Self::new(ChannelWeights::default())
    }
}
