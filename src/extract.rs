//! Dominant color extraction.
//!
//! The image is stretched to a small analysis raster, every pixel is dropped
//! into a 12-bit [`ColorBucket`], and the most populated buckets are turned
//! back into colors, most frequent first.

use palette::Srgb;

use crate::bucket::{ColorBucket, FrequencyTable};
use crate::raster::RasterImage;

pub const DEFAULT_ANALYSIS_SIZE: (u32, u32) = (64, 64);
pub const DEFAULT_TOP_K: usize = 5;
/// Largest analysis raster side. Larger requests are clamped to it.
pub const MAX_ANALYSIS_SIDE: u32 = 1024;

/// One color of an extracted palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub bucket: ColorBucket,
    /// Number of analysis pixels that fell into `bucket`.
    pub count: u64,
}

impl PaletteEntry {
    /// Normalized color at the bucket's lower bound.
    pub fn color(&self) -> Srgb<f32> {
        self.bucket.color()
    }

    pub fn rgb8(&self) -> Srgb<u8> {
        self.color().into_format::<u8>()
    }

    /// Uppercase `RRGGBB`, no leading `#`.
    pub fn hex(&self) -> String {
        let c = self.rgb8();
        format!("{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
    }
}

/// Resample `image` to `analysis_size` and return its `top_k` dominant
/// colors.
///
/// An image with no pixels, a zero analysis dimension, or `top_k == 0` all
/// give an empty palette. Each analysis side is clamped to
/// [`MAX_ANALYSIS_SIDE`].
pub fn extract_palette(
    image: &RasterImage,
    analysis_size: (u32, u32),
    top_k: usize,
) -> Vec<PaletteEntry> {
    let w = analysis_size.0.min(MAX_ANALYSIS_SIDE);
    let h = analysis_size.1.min(MAX_ANALYSIS_SIDE);
    if image.is_empty() || w == 0 || h == 0 || top_k == 0 {
        return Vec::new();
    }

    tracing::debug!(
        "Resampling {}x{} image to {}x{} for analysis",
        image.width(),
        image.height(),
        w,
        h
    );
    let analysis = image.resample(w, h);
    palette_from_pixels(&analysis, top_k)
}

/// Bucket an already-resampled buffer and return its `top_k` dominant colors.
pub fn palette_from_pixels(pixels: &RasterImage, top_k: usize) -> Vec<PaletteEntry> {
    if top_k == 0 {
        return Vec::new();
    }

    let mut table = FrequencyTable::new();
    table.extend(pixels.rgb_pixels());
    tracing::debug!(
        "Counted {} pixels into {} distinct buckets",
        table.total(),
        table.distinct()
    );

    table
        .top(top_k)
        .into_iter()
        .map(|(bucket, count)| PaletteEntry { bucket, count })
        .collect()
}
