//! Error types for the asset packer.

use thiserror::Error;

/// Result type alias using PackerError.
pub type Result<T> = std::result::Result<T, PackerError>;

/// Main error type for asset packing operations.
#[derive(Error, Debug)]
pub enum PackerError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed pixel dump text.
    #[error("Pixel dump error: {0}")]
    PixelDump(String),

    /// External vector rasterizer failed.
    #[error("Rasterizer error: {0}")]
    Rasterize(String),
}
