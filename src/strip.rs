//! Palette strip export: one vertical band per color, left to right in
//! palette order.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{PaletteError, Result};
use crate::extract::PaletteEntry;

pub const DEFAULT_STRIP_SIZE: (u32, u32) = (1000, 200);

/// Render `entries` as a `width` x `height` opaque strip.
///
/// Band `i` of `n` spans columns `i*width/n .. (i+1)*width/n`.
pub fn render_strip(entries: &[PaletteEntry], width: u32, height: u32) -> Result<RgbaImage> {
    if entries.is_empty() {
        return Err(PaletteError::EmptyPalette);
    }
    if width == 0 {
        return Err(PaletteError::invalid_parameter("width", width));
    }
    if height == 0 {
        return Err(PaletteError::invalid_parameter("height", height));
    }

    let n = entries.len() as u64;
    let colors: Vec<Rgba<u8>> = entries
        .iter()
        .map(|e| {
            let c = e.rgb8();
            Rgba([c.red, c.green, c.blue, 255])
        })
        .collect();

    Ok(RgbaImage::from_fn(width, height, |x, _| {
        // x < width, so the band index is always < n.
        let band = (x as u64 * n / width as u64) as usize;
        colors[band]
    }))
}

fn png_bytes(strip: &RgbaImage) -> image::ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    strip.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// PNG-encode a rendered strip.
pub fn encode_png(strip: &RgbaImage) -> Result<Vec<u8>> {
    png_bytes(strip).map_err(|source| PaletteError::Encode { source })
}

/// Render and write a PNG strip to `path`.
///
/// Nothing is written when rendering fails.
pub fn save_strip(entries: &[PaletteEntry], path: &Path, width: u32, height: u32) -> Result<()> {
    let strip = render_strip(entries, width, height)?;
    let save_err = |message: String| PaletteError::Save {
        path: path.to_path_buf(),
        message,
    };
    let png = png_bytes(&strip).map_err(|e| save_err(e.to_string()))?;
    fs::write(path, png).map_err(|e| save_err(e.to_string()))?;
    tracing::debug!("Saved {}-color strip to {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::ColorBucket;

    fn entry(r: u8, g: u8, b: u8) -> PaletteEntry {
        PaletteEntry {
            bucket: ColorBucket::from_rgb(r, g, b),
            count: 1,
        }
    }

    #[test]
    fn bands_follow_palette_order() {
        let entries = [
            entry(255, 0, 0),
            entry(0, 255, 0),
            entry(0, 0, 255),
            entry(0, 0, 0),
            entry(255, 255, 255),
        ];
        let strip = render_strip(&entries, 1000, 200).unwrap();
        assert_eq!(strip.dimensions(), (1000, 200));

        assert_eq!(strip.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(strip.get_pixel(199, 199), &Rgba([255, 0, 0, 255]));
        assert_eq!(strip.get_pixel(200, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(strip.get_pixel(500, 100), &Rgba([0, 0, 255, 255]));
        assert_eq!(strip.get_pixel(799, 10), &Rgba([0, 0, 0, 255]));
        assert_eq!(strip.get_pixel(999, 199), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn uneven_width_covers_every_column() {
        let entries = [entry(255, 0, 0), entry(0, 255, 0), entry(0, 0, 255)];
        let strip = render_strip(&entries, 10, 1).unwrap();
        let reds = (0..10).filter(|&x| strip.get_pixel(x, 0)[0] == 255).count();
        let greens = (0..10).filter(|&x| strip.get_pixel(x, 0)[1] == 255).count();
        let blues = (0..10).filter(|&x| strip.get_pixel(x, 0)[2] == 255).count();
        assert_eq!(reds + greens + blues, 10);
        assert_eq!(strip.get_pixel(9, 0), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(render_strip(&[], 10, 10), Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn zero_height_is_rejected() {
        let err = render_strip(&[entry(1, 1, 1)], 10, 0).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidParameter { .. }));
    }

    #[test]
    fn encoded_strip_decodes_back() {
        let strip = render_strip(&[entry(0x80, 0x40, 0x20)], 4, 2).unwrap();
        let png = encode_png(&strip).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, strip);
    }

    #[test]
    fn encode_failure_has_no_path() {
        let err = encode_png(&RgbaImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, PaletteError::Encode { .. }));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let path = Path::new("/nonexistent/palette/strip.png");
        let err = save_strip(&[entry(1, 2, 3)], path, 10, 10).unwrap_err();
        match err {
            PaletteError::Save { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
