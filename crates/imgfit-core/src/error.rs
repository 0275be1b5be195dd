//! Error types for the imgfit-core library.

use thiserror::Error;

/// Main error type for the imgfit library.
#[derive(Error, Debug)]
pub enum ImgfitError {
    /// I/O error while reading or writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while resizing one embedded image.
///
/// These never abort a run: the pipeline logs them and leaves the
/// offending image untouched.
#[derive(Error, Debug)]
pub enum ResizeError {
    /// The base64 payload could not be decoded.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a readable image.
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),

    /// Re-encoding the resized image failed.
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),

    /// The resolved target width rounds down to zero pixels.
    #[error("target width resolves to zero for a {source_width}px wide image")]
    ZeroWidth { source_width: u32 },
}

/// Result type for the imgfit library.
pub type Result<T> = std::result::Result<T, ImgfitError>;
