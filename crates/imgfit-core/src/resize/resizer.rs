//! Raster resizing using the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageReader};
use tracing::debug;

use super::ImageResizer;
use crate::error::ResizeError;
use crate::models::config::ResizeConfig;
use crate::models::embedded::ImageKind;

/// Resizer backed by the `image` crate codecs.
#[derive(Debug, Clone)]
pub struct RasterResizer {
    /// Resampling filter.
    filter: FilterType,
    /// JPEG output quality (1 - 100).
    jpeg_quality: u8,
}

impl RasterResizer {
    /// Create a resizer with Lanczos3 resampling and JPEG quality 80.
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
            jpeg_quality: 80,
        }
    }

    /// Create a resizer from configuration.
    pub fn from_config(config: &ResizeConfig) -> Self {
        Self::new()
            .with_filter(config.filter.into())
            .with_jpeg_quality(config.jpeg_quality)
    }

    /// Set the resampling filter.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Set JPEG output quality.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    fn encode(&self, image: &DynamicImage, kind: ImageKind) -> Result<Vec<u8>, ResizeError> {
        let mut buffer = Vec::new();

        let written = match kind {
            ImageKind::Png => image.write_with_encoder(PngEncoder::new(&mut buffer)),
            ImageKind::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality);
                match image.color() {
                    ColorType::L8 | ColorType::Rgb8 => image.write_with_encoder(encoder),
                    // JPEG has no alpha channel and no 16-bit samples
                    _ => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder),
                }
            }
        };

        written.map_err(ResizeError::Encode)?;
        Ok(buffer)
    }
}

impl Default for RasterResizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageResizer for RasterResizer {
    fn dimensions(&self, data: &[u8]) -> Result<(u32, u32), ResizeError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ResizeError::Decode(e.into()))?
            .into_dimensions()
            .map_err(ResizeError::Decode)
    }

    fn resize(
        &self,
        data: &[u8],
        fallback: ImageKind,
        target_width: u32,
    ) -> Result<Vec<u8>, ResizeError> {
        let kind = image::guess_format(data)
            .ok()
            .and_then(ImageKind::from_format)
            .unwrap_or(fallback);
        if kind != fallback {
            debug!("Image tagged {} holds {} data, keeping {}", fallback, kind, kind);
        }

        let image = image::load_from_memory(data).map_err(ResizeError::Decode)?;
        let (width, height) = image.dimensions();

        let new_width = target_width.min(width);
        if new_width == 0 {
            return Err(ResizeError::ZeroWidth { source_width: width });
        }

        let resized = if new_width == width {
            debug!("Target width {} not below source width {}, keeping size", target_width, width);
            image
        } else {
            let new_height = scaled_height(width, height, new_width);
            debug!("Resizing {}x{} to {}x{}", width, height, new_width, new_height);
            image.resize_exact(new_width, new_height, self.filter)
        };

        self.encode(&resized, kind)
    }
}

/// Height that keeps the aspect ratio at `new_width`, never below 1.
fn scaled_height(width: u32, height: u32, new_width: u32) -> u32 {
    let scaled = (height as f64 * new_width as f64 / width as f64).round() as u32;
    scaled.max(1)
}
