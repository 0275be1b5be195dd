//! Base64 payload codec for embedded blobs.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::error::ResizeError;
use crate::models::embedded::ImageKind;

/// Decoder that accepts payloads with or without trailing padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 payload, ignoring ASCII whitespace.
///
/// URL-safe symbols (`-`, `_`) are accepted alongside the standard ones.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, ResizeError> {
    let needs_cleanup = payload
        .bytes()
        .any(|b| b.is_ascii_whitespace() || b == b'-' || b == b'_');

    if !needs_cleanup {
        return Ok(LENIENT.decode(payload)?);
    }

    let normalized: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    Ok(LENIENT.decode(normalized)?)
}

/// Encode image bytes as padded standard base64.
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Wrap a payload using the document's delimiter convention.
pub fn format_blob(kind: ImageKind, payload: &str) -> String {
    format!("data:image/{},{};", kind.as_tag(), payload)
}
