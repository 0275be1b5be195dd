//! Image resizing: width policy and the resizer seam.

mod policy;
mod resizer;

pub use policy::resolve_target_width;
pub use resizer::RasterResizer;

use crate::error::ResizeError;
use crate::models::embedded::ImageKind;

/// Trait for image resizing implementations.
pub trait ImageResizer {
    /// Read the pixel dimensions of an encoded image.
    fn dimensions(&self, data: &[u8]) -> Result<(u32, u32), ResizeError>;

    /// Resize an encoded image to `target_width`, keeping its aspect ratio.
    ///
    /// Implementations never enlarge: a target wider than the source keeps
    /// the source width. The result keeps the format detected from `data`;
    /// `fallback` is used only when the bytes are not a JPEG or PNG.
    fn resize(
        &self,
        data: &[u8],
        fallback: ImageKind,
        target_width: u32,
    ) -> Result<Vec<u8>, ResizeError>;
}
