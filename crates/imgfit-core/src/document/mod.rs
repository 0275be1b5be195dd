//! In-memory document and replacement strategies.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a replacement finds the text it overwrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchStrategy {
    /// Replace the first remaining occurrence of the original blob.
    ///
    /// Identical blobs are consumed left to right, so two byte-identical
    /// images always receive the same treatment.
    #[default]
    FirstOccurrence,
    /// Replace the byte range recorded when the blob was extracted.
    Positional,
}

/// A pending replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Original blob text.
    pub original: String,
    /// Byte range of `original` in the text as first read.
    pub span: Range<usize>,
    /// Text to put in its place.
    pub replacement: String,
}

/// Document text loaded once and written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Replace the first occurrence of `original`.
    ///
    /// Returns `false` when `original` no longer occurs in the text.
    pub fn replace_first(&mut self, original: &str, replacement: &str) -> bool {
        match self.text.find(original) {
            Some(start) => {
                self.text
                    .replace_range(start..start + original.len(), replacement);
                true
            }
            None => false,
        }
    }

    /// Apply patches in order using `strategy`. Returns how many were applied.
    ///
    /// Positional patches refer to offsets in the unmodified text, so they
    /// must all come from the same scan of this document.
    pub fn apply(&mut self, patches: &[Patch], strategy: PatchStrategy) -> usize {
        match strategy {
            PatchStrategy::FirstOccurrence => {
                let mut applied = 0;
                for patch in patches {
                    if self.replace_first(&patch.original, &patch.replacement) {
                        applied += 1;
                    } else {
                        warn!("Image no longer present in document, replacement dropped");
                    }
                }
                applied
            }
            PatchStrategy::Positional => self.splice(patches),
        }
    }

    fn splice(&mut self, patches: &[Patch]) -> usize {
        let mut ordered: Vec<&Patch> = patches.iter().collect();
        ordered.sort_by_key(|patch| patch.span.start);

        let mut output = String::with_capacity(self.text.len());
        let mut cursor = 0;
        let mut applied = 0;

        for patch in ordered {
            let span = patch.span.clone();
            if span.start < cursor || self.text.get(span.clone()) != Some(patch.original.as_str()) {
                warn!(
                    "Bytes {}..{} no longer hold the extracted image, replacement dropped",
                    span.start, span.end
                );
                continue;
            }

            output.push_str(&self.text[cursor..span.start]);
            output.push_str(&patch.replacement);
            cursor = span.end;
            applied += 1;
        }

        output.push_str(&self.text[cursor..]);
        self.text = output;
        applied
    }
}
