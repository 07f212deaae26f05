//! HTTP response building module
//!
//! Provides builders for the error status responses the server emits,
//! decoupled from the file-serving logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::logger;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    let body = Bytes::from_static(b"404 Not Found");
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(body))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    let body = Bytes::from_static(b"403 Forbidden");
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(Full::new(body))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let body = Bytes::from_static(b"405 Method Not Allowed");
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .header("Allow", "GET, HEAD")
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(body))
        })
}

/// Build 301 Moved Permanently redirect response
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 OK response with the given content type and body
///
/// For HEAD requests the body is omitted but Content-Length still
/// reflects the full entity size.
pub fn build_ok_response(
    body: Bytes,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let len = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", len)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(status: &str, e: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {e}"));
}
