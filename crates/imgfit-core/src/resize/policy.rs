//! Target width resolution.

use tracing::debug;

use crate::models::request::ResizeRequest;

/// Resolve the target width for an image that is `source_width` pixels wide.
///
/// Returns `None` when the request carries neither a percentage nor a
/// minimum width. The result is not clamped to `source_width`; the resizer
/// applies the no-enlargement rule.
pub fn resolve_target_width(source_width: u32, request: &ResizeRequest) -> Option<u32> {
    match (request.percentage, request.min_width) {
        (Some(percentage), min_width) => {
            let calculated = (source_width as f64 * percentage / 100.0).floor() as u32;
            debug!(
                "Original width: {}, percentage resize: {}%, calculated width: {}",
                source_width, percentage, calculated
            );
            Some(min_width.map_or(calculated, |min| calculated.max(min)))
        }
        (None, Some(min_width)) => {
            debug!("Using minimum width directly: {}", min_width);
            Some(min_width)
        }
        (None, None) => {
            debug!("No resizing parameters provided");
            None
        }
    }
}
