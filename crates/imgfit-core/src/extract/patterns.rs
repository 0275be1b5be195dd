//! Regex patterns for embedded image blobs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Outer scan over the raw text stream; the payload runs up to the next ';'
    pub static ref EMBEDDED_IMAGE: Regex = Regex::new(
        r"data:image/(?:jpeg|png),[^;]+;"
    ).unwrap();

    // Strict shape of a single blob; '.' does not cross line breaks
    pub static ref EMBEDDED_IMAGE_EXACT: Regex = Regex::new(
        r"^data:image/(jpeg|png),(.*);$"
    ).unwrap();
}
