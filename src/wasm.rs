use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::extract::{DEFAULT_ANALYSIS_SIZE, PaletteEntry, extract_palette};
use crate::raster::decode_image;
use crate::strip::{encode_png, render_strip};

fn to_js(e: crate::PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn palette_for(input: &[u8], top_k: usize) -> Result<Vec<PaletteEntry>, JsValue> {
    let img = decode_image(input).map_err(to_js)?;
    Ok(extract_palette(&img, DEFAULT_ANALYSIS_SIZE, top_k))
}

fn hex_array(entries: &[PaletteEntry]) -> Array {
    let out = Array::new();
    for entry in entries {
        out.push(&JsValue::from_str(&entry.hex()));
    }
    out
}

/// Decode an encoded image and return its `top_k` dominant colors as
/// `RRGGBB` strings, most frequent first.
#[wasm_bindgen]
pub fn dominant_colors(input: Vec<u8>, top_k: usize) -> Result<Array, JsValue> {
    let entries = palette_for(&input, top_k)?;
    Ok(hex_array(&entries))
}

/// Like [`dominant_colors`], and additionally renders the palette as a
/// `width` x `height` PNG strip.
///
/// Returns `{ palette: string[], image: Uint8Array }`.
#[wasm_bindgen]
pub fn palette_strip(
    input: Vec<u8>,
    top_k: usize,
    width: u32,
    height: u32,
) -> Result<Object, JsValue> {
    let entries = palette_for(&input, top_k)?;
    let strip = render_strip(&entries, width, height).map_err(to_js)?;
    let png = encode_png(&strip).map_err(to_js)?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("palette"), &hex_array(&entries))?;
    Reflect::set(&result, &JsValue::from_str("image"), &Uint8Array::from(png.as_slice()))?;
    Ok(result)
}
