//! Operator-supplied resize policy.

use crate::error::{ImgfitError, Result};

/// How embedded images should be resized.
///
/// `percentage` is relative to each image's own width, `min_width` is an
/// absolute pixel floor (or the target itself when used alone).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResizeRequest {
    /// Relative resize factor, usually in `(0, 100]`.
    pub percentage: Option<f64>,

    /// Minimum (or absolute) output width in pixels.
    pub min_width: Option<u32>,
}

impl ResizeRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the percentage factor.
    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Set the minimum width.
    pub fn with_min_width(mut self, width: u32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Check the request before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if self.percentage.is_none() && self.min_width.is_none() {
            return Err(ImgfitError::Config(
                "you must pass in one of percentage or width".to_string(),
            ));
        }

        if let Some(percentage) = self.percentage {
            if !percentage.is_finite() || percentage <= 0.0 {
                return Err(ImgfitError::Config(format!(
                    "percentage must be a positive number, got {}",
                    percentage
                )));
            }
        }

        if self.min_width == Some(0) {
            return Err(ImgfitError::Config(
                "width must be at least 1 pixel".to_string(),
            ));
        }

        Ok(())
    }
}
