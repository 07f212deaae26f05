//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Get MIME Content-Type based on file extension
///
/// The extension is expected to be lowercase; callers normalize before
/// lookup. Unknown extensions (and files without one) fall back to
/// `application/octet-stream` rather than relying on a sentinel table
/// entry.
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("manifest") => "text/cache-manifest",
        Some("html") => "text/html",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("css") => "text/css",
        Some("js") => "application/x-javascript",

        // Default
        _ => "application/octet-stream",
    }
}
