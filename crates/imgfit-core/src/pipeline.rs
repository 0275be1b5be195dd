//! Sequential batch resize over one document.

use std::fs;
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::document::{Document, Patch, PatchStrategy};
use crate::error::{ResizeError, Result};
use crate::extract::{decode_payload, encode_payload, format_blob, EmbeddedImage, ImageExtractor};
use crate::models::config::ImgfitConfig;
use crate::models::embedded::ImageKind;
use crate::models::request::ResizeRequest;
use crate::resize::{resolve_target_width, ImageResizer, RasterResizer};

/// Callback invoked after each image with `(done, total)`.
type ProgressFn = Box<dyn Fn(usize, usize) + Send + Sync>;

/// What happened to one embedded image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    /// A replacement blob was produced.
    Resized {
        kind: ImageKind,
        from_width: u32,
        to_width: u32,
    },
    /// Left untouched without an error.
    Skipped(SkipReason),
    /// Decoding, resizing or encoding failed; left untouched.
    Failed(String),
}

/// Why an image was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The blob did not match the strict embedded image shape.
    Unparseable,
    /// Neither a percentage nor a width was requested.
    NoParameters,
}

/// Summary of one run, in extraction order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResizeReport {
    /// One outcome per extracted blob.
    pub outcomes: Vec<ImageOutcome>,
    /// Replacements actually written into the document.
    pub replaced: usize,
}

impl ResizeReport {
    pub fn found(&self) -> usize {
        self.outcomes.len()
    }

    pub fn resized(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Resized { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ImageOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

struct Replacement {
    blob: String,
    from_width: u32,
    to_width: u32,
}

/// Resizes every embedded image of a document, one at a time.
pub struct BatchImageResizer<R = RasterResizer> {
    resizer: R,
    request: ResizeRequest,
    strategy: PatchStrategy,
    progress: Option<ProgressFn>,
}

impl BatchImageResizer<RasterResizer> {
    /// Build a resizer from configuration and the operator's request.
    pub fn from_config(config: &ImgfitConfig, request: ResizeRequest) -> Self {
        Self::new(RasterResizer::from_config(&config.resize), request)
            .with_strategy(config.document.strategy)
    }
}

impl<R: ImageResizer> BatchImageResizer<R> {
    pub fn new(resizer: R, request: ResizeRequest) -> Self {
        Self {
            resizer,
            request,
            strategy: PatchStrategy::default(),
            progress: None,
        }
    }

    /// Set the patch strategy.
    pub fn with_strategy(mut self, strategy: PatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Report progress after each image.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Resize the document at `path` in place.
    ///
    /// The request is validated before the file is read. The file is
    /// written once, after every image has been attempted; per-image
    /// failures leave that image as it was.
    pub fn process_file(&self, path: &Path) -> Result<ResizeReport> {
        self.request.validate()?;

        info!("Starting processing of {}", path.display());

        let text = fs::read_to_string(path).map_err(|e| {
            error!("Error reading {}: {}", path.display(), e);
            e
        })?;

        let (output, report) = self.process_text(&text);

        fs::write(path, output).map_err(|e| {
            error!("Error writing {}: {}", path.display(), e);
            e
        })?;

        info!("All images processed. Updated file saved.");
        Ok(report)
    }

    /// Resize every embedded image in `text`, returning the new text.
    pub fn process_text(&self, text: &str) -> (String, ResizeReport) {
        let matches: Vec<_> = ImageExtractor::new().find_all(text).collect();
        let total = matches.len();
        info!("Found {} images to process.", total);

        let mut patches = Vec::new();
        let mut outcomes = Vec::with_capacity(total);

        for (index, image_match) in matches.iter().enumerate() {
            debug!("Processing image {} of {}...", index + 1, total);

            let outcome = match image_match.parse() {
                None => {
                    warn!("Image {} does not have the expected shape, leaving it as is", index + 1);
                    ImageOutcome::Skipped(SkipReason::Unparseable)
                }
                Some(image) => match self.resize_one(&image) {
                    Ok(Some(replacement)) => {
                        let outcome = ImageOutcome::Resized {
                            kind: image.kind,
                            from_width: replacement.from_width,
                            to_width: replacement.to_width,
                        };
                        patches.push(Patch {
                            original: image.raw,
                            span: image.span,
                            replacement: replacement.blob,
                        });
                        outcome
                    }
                    Ok(None) => ImageOutcome::Skipped(SkipReason::NoParameters),
                    Err(e) => {
                        warn!("Failed to resize image {}: {}", index + 1, e);
                        ImageOutcome::Failed(e.to_string())
                    }
                },
            };
            outcomes.push(outcome);

            if let Some(progress) = &self.progress {
                progress(index + 1, total);
            }
        }

        let mut document = Document::new(text);
        let replaced = document.apply(&patches, self.strategy);

        (document.into_string(), ResizeReport { outcomes, replaced })
    }

    fn resize_one(&self, image: &EmbeddedImage) -> std::result::Result<Option<Replacement>, ResizeError> {
        let data = decode_payload(&image.payload)?;
        let (width, _) = self.resizer.dimensions(&data)?;

        let Some(target) = resolve_target_width(width, &self.request) else {
            return Ok(None);
        };
        debug!("Final target width: {}", target);

        let resized = self.resizer.resize(&data, image.kind, target)?;
        let to_width = target.min(width);
        info!("Image resized to width: {}px", to_width);

        Ok(Some(Replacement {
            blob: format_blob(image.kind, &encode_payload(&resized)),
            from_width: width,
            to_width,
        }))
    }
}
