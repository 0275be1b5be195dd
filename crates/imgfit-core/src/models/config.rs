//! Configuration structures for the resize pipeline.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::document::PatchStrategy;

/// Main configuration for imgfit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgfitConfig {
    /// Resampling and encoding configuration.
    pub resize: ResizeConfig,

    /// Document patching configuration.
    pub document: DocumentConfig,
}

/// Resampling and re-encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Resampling filter used when shrinking.
    pub filter: ResampleFilter,

    /// JPEG quality (1 - 100) for re-encoded JPEG images.
    pub jpeg_quality: u8,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::Lanczos3,
            jpeg_quality: 80,
        }
    }
}

/// Document patching settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// How replacements locate the text they overwrite.
    pub strategy: PatchStrategy,
}

/// Resampling filter names accepted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl ImgfitConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ImgfitConfig::default();
        assert_eq!(config.resize.filter, ResampleFilter::Lanczos3);
        assert_eq!(config.resize.jpeg_quality, 80);
        assert_eq!(config.document.strategy, PatchStrategy::FirstOccurrence);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ImgfitConfig =
            serde_json::from_str(r#"{"document": {"strategy": "positional"}}"#).unwrap();
        assert_eq!(config.document.strategy, PatchStrategy::Positional);
        assert_eq!(config.resize.jpeg_quality, 80);

        let config: ImgfitConfig =
            serde_json::from_str(r#"{"resize": {"filter": "catmull-rom"}}"#).unwrap();
        assert_eq!(config.resize.filter, ResampleFilter::CatmullRom);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ImgfitConfig::default();
        config.resize.jpeg_quality = 65;
        config.save(&path).unwrap();

        let loaded = ImgfitConfig::from_file(&path).unwrap();
        assert_eq!(loaded.resize.jpeg_quality, 65);
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ImgfitConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
