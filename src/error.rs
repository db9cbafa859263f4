//! Error types for palette extraction and export.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaletteError>;

#[derive(Error, Debug)]
pub enum PaletteError {
    /// Bytes are not a supported image format, or are corrupt.
    #[error("Unable to decode image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },

    #[error("Unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export sink rejected the write.
    #[error("Unable to save palette strip to {}: {message}", path.display())]
    Save { path: PathBuf, message: String },

    /// A rendered strip could not be PNG-encoded in memory.
    #[error("Unable to encode palette strip: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    #[error("Palette is empty")]
    EmptyPalette,

    #[error("Invalid configuration: {source}")]
    Config {
        #[source]
        source: serde_json::Error,
    },
}

impl PaletteError {
    pub(crate) fn invalid_parameter(parameter: &str, value: impl ToString) -> Self {
        PaletteError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<image::ImageError> for PaletteError {
    fn from(source: image::ImageError) -> Self {
        PaletteError::Decode { source }
    }
}

impl From<serde_json::Error> for PaletteError {
    fn from(source: serde_json::Error) -> Self {
        PaletteError::Config { source }
    }
}
