//! 12-bit color buckets and their frequency table.

use palette::Srgb;

/// Number of distinct buckets: 4 bits for each of R, G and B.
pub const BUCKET_COUNT: usize = 1 << 12;

/// A reduced-precision color cell, packed as `R4<<8 | G4<<4 | B4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorBucket(u16);

impl ColorBucket {
    #[inline(always)]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorBucket(((r >> 4) as u16) << 8 | ((g >> 4) as u16) << 4 | (b >> 4) as u16)
    }

    /// Returns `None` for keys outside the 12-bit range.
    pub fn from_key(key: u16) -> Option<Self> {
        ((key as usize) < BUCKET_COUNT).then_some(ColorBucket(key))
    }

    pub fn key(self) -> u16 {
        self.0
    }

    /// The three 4-bit channel values.
    pub fn channels(self) -> [u8; 3] {
        [
            ((self.0 >> 8) & 0xF) as u8,
            ((self.0 >> 4) & 0xF) as u8,
            (self.0 & 0xF) as u8,
        ]
    }

    /// Un-quantize using the bucket's lower bound (`channel / 15`), not its
    /// centroid.
    pub fn color(self) -> Srgb<f32> {
        let [r, g, b] = self.channels();
        Srgb::new(r as f32 / 15.0, g as f32 / 15.0, b as f32 / 15.0)
    }
}

/// Occurrence count per bucket. Dense over the whole key space, so iteration
/// is always in ascending key order.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    counts: Box<[u64; BUCKET_COUNT]>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: Box::new([0; BUCKET_COUNT]),
            total: 0,
        }
    }

    #[inline(always)]
    pub fn insert(&mut self, bucket: ColorBucket) {
        self.counts[bucket.0 as usize] += 1;
        self.total += 1;
    }

    pub fn count(&self, bucket: ColorBucket) -> u64 {
        self.counts[bucket.0 as usize]
    }

    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Non-empty buckets in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorBucket, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(key, &c)| (ColorBucket(key as u16), c))
    }

    /// The `k` most frequent buckets, highest count first. Equal counts keep
    /// ascending key order.
    pub fn top(&self, k: usize) -> Vec<(ColorBucket, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        // Stable sort keeps the ascending-key order among ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<[u8; 3]> for FrequencyTable {
    fn extend<I: IntoIterator<Item = [u8; 3]>>(&mut self, iter: I) {
        for [r, g, b] in iter {
            self.insert(ColorBucket::from_rgb(r, g, b));
        }
    }
}
