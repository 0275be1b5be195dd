//! Core library for resizing images embedded in diagram documents.
//!
//! This crate provides:
//! - Extraction of `data:image/(jpeg|png),<base64>;` blobs from raw text
//! - The width resolution policy (percentage and minimum width)
//! - Resizing through the [`ImageResizer`] seam, backed by the `image` crate
//! - In-place document patching and the sequential batch pipeline

pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod resize;

pub use document::{Document, PatchStrategy};
pub use error::{ImgfitError, ResizeError, Result};
pub use extract::{EmbeddedImage, ImageExtractor, ImageMatch};
pub use models::config::ImgfitConfig;
pub use models::embedded::ImageKind;
pub use models::request::ResizeRequest;
pub use pipeline::{BatchImageResizer, ImageOutcome, ResizeReport, SkipReason};
pub use resize::{ImageResizer, RasterResizer, resolve_target_width};
