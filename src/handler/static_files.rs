//! Static file serving module
//!
//! Handles request-path resolution, file loading, MIME type detection,
//! and directory listings.

use crate::http::mime;
use crate::logger;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Outcome of resolving a request path and loading its target
#[derive(Debug)]
pub enum Loaded {
    /// File (or index file) contents with their Content-Type
    Content(Vec<u8>, &'static str),
    /// Generated directory listing HTML
    Listing(String),
    /// Directory requested without a trailing slash; redirect target
    Redirect(String),
    NotFound,
    Forbidden,
}

/// Resolve a request path to a location under the served root
///
/// The path is percent-decoded first, so the `..`-segment check also
/// catches encoded traversal like `%2e%2e`. Returns `None` for
/// undecodable paths and for any path containing a `..` segment.
pub fn resolve_path(root: &str, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let relative = decoded.trim_start_matches('/');
    let candidate = Path::new(relative);

    if candidate
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return None;
    }

    Some(Path::new(root).join(relative))
}

/// Load the file or directory a request path designates
///
/// Directories are probed for the configured index files in order; a
/// directory with no index file yields a generated listing.
pub async fn load(root: &str, request_path: &str, index_files: &[String]) -> Loaded {
    let Some(file_path) = resolve_path(root, request_path) else {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return Loaded::NotFound;
    };

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Served root not found or inaccessible '{root}': {e}"
            ));
            return Loaded::NotFound;
        }
    };

    // File not found is common (404), no need to log at warning level
    let file_path_canonical = match file_path.canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => return Loaded::Forbidden,
        Err(_) => return Loaded::NotFound,
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_path_canonical.display()
        ));
        return Loaded::NotFound;
    }

    if file_path_canonical.is_dir() {
        // Relative hrefs in a listing only resolve correctly with a
        // trailing slash, so redirect bare directory paths first
        if !request_path.ends_with('/') {
            return Loaded::Redirect(format!("{request_path}/"));
        }
        for index_file in index_files {
            let index_path = file_path_canonical.join(index_file);
            if index_path.is_file() {
                return read_file(&index_path).await;
            }
        }
        return list_directory(&file_path_canonical, request_path).await;
    }

    read_file(&file_path_canonical).await
}

/// Read a regular file and pair it with its Content-Type
async fn read_file(path: &Path) -> Loaded {
    match fs::read(path).await {
        Ok(content) => {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            let content_type = mime::content_type_for(extension.as_deref());
            Loaded::Content(content, content_type)
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Loaded::Forbidden,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {}", path.display(), e));
            Loaded::NotFound
        }
    }
}

/// Generate an HTML listing for a directory with no index file
///
/// Entries are name-sorted; subdirectories carry a trailing slash.
async fn list_directory(dir: &Path, request_path: &str) -> Loaded {
    let mut entries = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => return Loaded::Forbidden,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {}",
                dir.display(),
                e
            ));
            return Loaded::NotFound;
        }
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        names.push((name, is_dir));
    }
    names.sort();

    let display_path = escape_html(if request_path.is_empty() {
        "/"
    } else {
        request_path
    });

    let mut page = String::from("<!DOCTYPE HTML>\n<html>\n<head>\n");
    page.push_str(&format!(
        "<title>Directory listing for {display_path}</title>\n</head>\n<body>\n"
    ));
    page.push_str(&format!("<h1>Directory listing for {display_path}</h1>\n<hr>\n<ul>\n"));
    for (name, is_dir) in &names {
        let mut href = urlencoding::encode(name).into_owned();
        let mut display = escape_html(name);
        if *is_dir {
            href.push('/');
            display.push('/');
        }
        page.push_str(&format!("<li><a href=\"{href}\">{display}</a></li>\n"));
    }
    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    Loaded::Listing(page)
}

/// Escape characters with meaning in HTML text and attribute values
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
