//! Dominant color palettes for raster images.
//!
//! An image is stretched to a small analysis raster (64x64 by default), each
//! pixel is quantized to 4 bits per channel, and the most frequent buckets
//! come back as colors, most frequent first:
//!
//! ```
//! use image_to_palette_wasm::{RasterImage, extract_palette};
//!
//! let img = RasterImage::from_rgb_pixels(2, 1, &[[255, 0, 0], [255, 0, 0]])?;
//! let palette = extract_palette(&img, (64, 64), 5);
//! assert_eq!(palette.len(), 1);
//! assert_eq!(palette[0].hex(), "FF0000");
//! # Ok::<(), image_to_palette_wasm::PaletteError>(())
//! ```
//!
//! The crate also builds as a `cdylib` exposing [`dominant_colors`] and
//! [`palette_strip`] to JavaScript.

pub mod bucket;
pub mod config;
pub mod error;
pub mod extract;
pub mod raster;
pub mod strip;
mod wasm;

pub use bucket::{BUCKET_COUNT, ColorBucket, FrequencyTable};
pub use config::PaletteConfig;
pub use error::{PaletteError, Result};
pub use extract::{
    DEFAULT_ANALYSIS_SIZE, DEFAULT_TOP_K, MAX_ANALYSIS_SIDE, PaletteEntry, extract_palette,
    palette_from_pixels,
};
pub use raster::{RasterImage, decode_image, load_image};
pub use strip::{DEFAULT_STRIP_SIZE, encode_png, render_strip, save_strip};
pub use wasm::{dominant_colors, palette_strip};

/// Decode `input` and extract its palette with the sizes in `config`.
pub fn extract_palette_bytes(input: &[u8], config: &PaletteConfig) -> Result<Vec<PaletteEntry>> {
    let img = decode_image(input)?;
    Ok(extract_palette(&img, config.analysis_size(), config.top_k))
}
