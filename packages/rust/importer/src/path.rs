//! Output-path derivation for transformed documents.

use url::Url;

/// Derive the output document path from the source URL.
///
/// The URL's path component with a trailing slash removed and a literal
/// `.html` suffix stripped. Total and side-effect-free: the same URL always
/// yields the same path.
pub fn generate_document_path(url: &Url) -> String {
    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    let path = path.strip_suffix(".html").unwrap_or(path);
    path.to_string()
}
