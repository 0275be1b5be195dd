//! Embedded image extraction over raw document text.

use std::ops::Range;

use tracing::trace;

use super::patterns::{EMBEDDED_IMAGE, EMBEDDED_IMAGE_EXACT};
use crate::models::embedded::ImageKind;

/// An outer match of the embedded image pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch<'t> {
    /// Full matched substring, used as the replacement key.
    pub raw: &'t str,
    /// Byte range of the match in the scanned text.
    pub span: Range<usize>,
}

/// A fully parsed embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Format tag.
    pub kind: ImageKind,
    /// Base64 payload text.
    pub payload: String,
    /// Full matched substring.
    pub raw: String,
    /// Byte range in the originally read document.
    pub span: Range<usize>,
}

impl ImageMatch<'_> {
    /// Re-match against the strict blob shape.
    ///
    /// Returns `None` when the outer scan accepted something the strict
    /// shape rejects (for example a payload spanning several lines).
    pub fn parse(&self) -> Option<EmbeddedImage> {
        let caps = EMBEDDED_IMAGE_EXACT.captures(self.raw)?;
        let kind = ImageKind::from_tag(caps.get(1)?.as_str())?;

        Some(EmbeddedImage {
            kind,
            payload: caps.get(2)?.as_str().to_string(),
            raw: self.raw.to_string(),
            span: self.span.clone(),
        })
    }
}

/// Scanner for `data:image/(jpeg|png),<base64>;` blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageExtractor;

impl ImageExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Lazily iterate over every non-overlapping blob, left to right.
    ///
    /// Duplicates are yielded once per occurrence.
    pub fn find_all<'t>(&self, text: &'t str) -> impl Iterator<Item = ImageMatch<'t>> + 't {
        EMBEDDED_IMAGE.find_iter(text).map(|m| {
            trace!("Embedded image at bytes {}..{}", m.start(), m.end());
            ImageMatch {
                raw: m.as_str(),
                span: m.range(),
            }
        })
    }
}
