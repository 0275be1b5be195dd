//! Extraction of embedded image blobs from document text.

mod extractor;
mod patterns;
mod payload;

pub use extractor::{EmbeddedImage, ImageExtractor, ImageMatch};
pub use payload::{decode_payload, encode_payload, format_blob};
