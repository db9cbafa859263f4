//! End-to-end tests: encoded bytes in, palette and strip out.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use image_to_palette_wasm::{
    ColorBucket, PaletteConfig, PaletteError, RasterImage, decode_image, extract_palette,
    extract_palette_bytes, load_image, palette_from_pixels, render_strip, save_strip,
};

fn png_of(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
    buf
}

/// 64x64 image where pixel `i` lands in bucket `i`.
fn every_bucket() -> RasterImage {
    let pixels: Vec<[u8; 3]> = (0..4096u16)
        .map(|i| {
            let r = ((i >> 8) & 0xF) as u8;
            let g = ((i >> 4) & 0xF) as u8;
            let b = (i & 0xF) as u8;
            [r << 4, g << 4, b << 4]
        })
        .collect();
    RasterImage::from_rgb_pixels(64, 64, &pixels).unwrap()
}

#[test]
fn all_buckets_tie_and_resolve_by_ascending_key() {
    let img = every_bucket();
    let palette = extract_palette(&img, (64, 64), 5);

    assert_eq!(palette.len(), 5);
    let keys: Vec<u16> = palette.iter().map(|e| e.bucket.key()).collect();
    assert_eq!(keys, vec![0, 1, 2, 3, 4]);
    assert!(palette.iter().all(|e| e.count == 1));
    assert_eq!(palette[1].color().blue, 1.0 / 15.0);
}

#[test]
fn length_is_min_of_top_k_and_distinct_buckets() {
    let img = RasterImage::from_rgb_pixels(
        3,
        1,
        &[[10, 20, 30], [200, 200, 200], [12, 25, 31]],
    )
    .unwrap();
    // [10,20,30] and [12,25,31] share bucket 0x011.
    assert_eq!(palette_from_pixels(&img, 5).len(), 2);
    assert_eq!(palette_from_pixels(&img, 1).len(), 1);
    assert_eq!(palette_from_pixels(&img, 0).len(), 0);
}

#[test]
fn channels_reconstruct_from_high_nibble() {
    let samples: [[u8; 3]; 4] = [[0, 15, 16], [31, 127, 128], [200, 239, 240], [255, 1, 77]];
    let img = RasterImage::from_rgb_pixels(4, 1, &samples).unwrap();
    let palette = palette_from_pixels(&img, 4);
    assert_eq!(palette.len(), 4);

    for entry in &palette {
        let c = entry.color();
        let source = samples
            .iter()
            .find(|s| ColorBucket::from_rgb(s[0], s[1], s[2]) == entry.bucket)
            .unwrap();
        let expect = |v: u8| (v / 16) as f32 / 15.0;
        assert_eq!(c.red, expect(source[0]));
        assert_eq!(c.green, expect(source[1]));
        assert_eq!(c.blue, expect(source[2]));
    }
}

#[test]
fn repeated_calls_are_identical() {
    let img = RgbaImage::from_fn(300, 200, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    let raster = RasterImage::from(img);
    let a = extract_palette(&raster, (64, 64), 5);
    let b = extract_palette(&raster, (64, 64), 5);
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
}

#[test]
fn concurrent_calls_agree() {
    let raster = every_bucket();
    let expected = extract_palette(&raster, (32, 32), 5);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| extract_palette(&raster, (32, 32), 5)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn alpha_is_ignored() {
    let img = RasterImage::from_rgba(2, 1, vec![255, 0, 0, 0, 255, 0, 0, 255]).unwrap();
    let palette = palette_from_pixels(&img, 5);
    assert_eq!(palette.len(), 1);
    assert_eq!(palette[0].count, 2);
}

#[test]
fn decoded_png_produces_palette() {
    let img = RgbaImage::from_fn(100, 50, |x, _| {
        if x < 75 {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([255, 255, 0, 255])
        }
    });
    let palette = extract_palette_bytes(&png_of(&img), &PaletteConfig::default()).unwrap();

    let hex: Vec<String> = palette.iter().map(|e| e.hex()).collect();
    assert_eq!(hex, vec!["0000FF", "FFFF00"]);
    assert!(palette[0].count > palette[1].count);
}

#[test]
fn undecodable_bytes_fail_before_extraction() {
    let err = extract_palette_bytes(&[0, 1, 2, 3], &PaletteConfig::default()).unwrap_err();
    assert!(matches!(err, PaletteError::Decode { .. }));
}

#[test]
fn strip_round_trips_through_disk() {
    let src = RasterImage::from_rgb_pixels(2, 1, &[[255, 0, 0], [0, 0, 255]]).unwrap();
    let palette = palette_from_pixels(&src, 5);

    let path = std::env::temp_dir().join(format!("palette_strip_{}.png", std::process::id()));
    save_strip(&palette, &path, 100, 20).unwrap();

    let saved = load_image(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let expected = render_strip(&palette, 100, 20).unwrap();
    assert_eq!(saved.as_rgba(), &expected);
    // Blue (key 0x00F) sorts before red (0xF00) on a tie.
    assert_eq!(expected.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    assert_eq!(expected.get_pixel(99, 19), &Rgba([255, 0, 0, 255]));
}

#[test]
fn decode_keeps_dimensions() {
    let img = RgbaImage::from_pixel(7, 3, Rgba([1, 2, 3, 255]));
    let raster = decode_image(&png_of(&img)).unwrap();
    assert_eq!((raster.width(), raster.height()), (7, 3));
}
