//! Content type lookup by file extension.

use std::path::Path;

pub const TEXT_HTML: &str = "text/html";
pub const IMAGE_JPG: &str = "image/jpg";

/// Returns the content type for `path`, or `None` for an extension the
/// server never serves.
pub fn content_type(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "html" => Some(TEXT_HTML),
        "jpg" => Some(IMAGE_JPG),
        _ => None,
    }
}
