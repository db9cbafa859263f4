//! Decoded RGBA8 input images.

use std::fs;
use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};

use crate::error::{PaletteError, Result};

/// A caller-owned, row-major RGBA8 bitmap.
///
/// The extractor only ever reads the red, green and blue samples; alpha is
/// carried along so that any decoded image can be wrapped without loss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    buf: RgbaImage,
}

impl RasterImage {
    /// Wrap a raw RGBA buffer. `raw.len()` must be exactly `width * height * 4`.
    ///
    /// Dimensions whose byte size does not fit in `usize` are reported as
    /// `InvalidBuffer` with `expected` saturated to `usize::MAX`.
    pub fn from_rgba(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        let actual = raw.len();
        let invalid = || PaletteError::InvalidBuffer {
            width,
            height,
            expected,
            actual,
        };
        if actual != expected {
            return Err(invalid());
        }
        let buf = RgbaImage::from_raw(width, height, raw).ok_or_else(invalid)?;
        Ok(Self { buf })
    }

    /// Build an image from a list of `[r, g, b]` pixels, fully opaque.
    pub fn from_rgb_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self> {
        let raw = pixels
            .iter()
            .flat_map(|&[r, g, b]| [r, g, b, 255])
            .collect();
        Self::from_rgba(width, height, raw)
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.width() == 0 || self.buf.height() == 0
    }

    /// Iterate over the RGB part of every pixel, row by row.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.buf.as_raw().chunks_exact(4).map(|px| [px[0], px[1], px[2]])
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.buf
    }

    /// Stretch to exactly `width` x `height` with nearest-neighbour sampling.
    ///
    /// Aspect ratio is not preserved. Returns a clone when the size already
    /// matches.
    pub fn resample(&self, width: u32, height: u32) -> RasterImage {
        if self.width() == width && self.height() == height {
            return self.clone();
        }
        RasterImage {
            buf: image::imageops::resize(&self.buf, width, height, FilterType::Nearest),
        }
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(buf: RgbaImage) -> Self {
        Self { buf }
    }
}

impl From<&DynamicImage> for RasterImage {
    fn from(img: &DynamicImage) -> Self {
        Self { buf: img.to_rgba8() }
    }
}

/// Decode encoded image bytes, guessing the format from the content.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes)?;
    let (w, h) = img.dimensions();
    tracing::debug!("Decoded {}x{} image ({} bytes)", w, h, bytes.len());
    Ok(RasterImage::from(&img))
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<RasterImage> {
    let bytes = fs::read(path).map_err(|source| PaletteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}
