//! Tunable extraction and export parameters.
//!
//! Loaded from JSON, with every field optional:
//!
//! ```
//! use image_to_palette_wasm::PaletteConfig;
//!
//! let config = PaletteConfig::from_json_str(r#"{ "top_k": 8 }"#)?;
//! assert_eq!(config.top_k, 8);
//! assert_eq!(config.analysis_size(), (64, 64));
//! # Ok::<(), image_to_palette_wasm::PaletteError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};
use crate::extract::{DEFAULT_ANALYSIS_SIZE, DEFAULT_TOP_K, MAX_ANALYSIS_SIDE};
use crate::strip::DEFAULT_STRIP_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Width of the raster the image is stretched to before bucketing.
    pub analysis_width: u32,
    pub analysis_height: u32,
    /// Maximum number of palette entries.
    pub top_k: usize,
    /// Size of an exported palette strip.
    pub strip_width: u32,
    pub strip_height: u32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            analysis_width: DEFAULT_ANALYSIS_SIZE.0,
            analysis_height: DEFAULT_ANALYSIS_SIZE.1,
            top_k: DEFAULT_TOP_K,
            strip_width: DEFAULT_STRIP_SIZE.0,
            strip_height: DEFAULT_STRIP_SIZE.1,
        }
    }
}

impl PaletteConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| PaletteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Strip dimensions must be non-zero and analysis sides at most
    /// [`MAX_ANALYSIS_SIDE`]. A zero analysis size is allowed and yields
    /// empty palettes.
    pub fn validate(&self) -> Result<()> {
        if self.analysis_width > MAX_ANALYSIS_SIDE {
            return Err(PaletteError::invalid_parameter(
                "analysis_width",
                self.analysis_width,
            ));
        }
        if self.analysis_height > MAX_ANALYSIS_SIDE {
            return Err(PaletteError::invalid_parameter(
                "analysis_height",
                self.analysis_height,
            ));
        }
        if self.strip_width == 0 {
            return Err(PaletteError::invalid_parameter("strip_width", 0));
        }
        if self.strip_height == 0 {
            return Err(PaletteError::invalid_parameter("strip_height", 0));
        }
        Ok(())
    }

    pub fn analysis_size(&self) -> (u32, u32) {
        (self.analysis_width, self.analysis_height)
    }

    pub fn strip_size(&self) -> (u32, u32) {
        (self.strip_width, self.strip_height)
    }
}
