//! Request dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation and handing the path to the static file loader.

use crate::config::Config;
use crate::handler::static_files::{self, Loaded};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = version_str(req.version());

    let response = match &method {
        &Method::GET | &Method::HEAD => {
            let is_head = method == Method::HEAD;
            serve_path(&config, &path, is_head).await
        }
        other => {
            logger::log_warning(&format!("Method not allowed: {other}"));
            http::build_405_response()
        }
    };

    if config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path,
        );
        entry.http_version = version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_size(&response);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve the request path and build the file response
async fn serve_path(config: &Config, path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match static_files::load(&config.files.root, path, &config.files.index_files).await {
        Loaded::Content(content, content_type) => {
            http::response::build_ok_response(Bytes::from(content), content_type, is_head)
        }
        Loaded::Listing(page) => {
            http::response::build_ok_response(Bytes::from(page), "text/html", is_head)
        }
        Loaded::Redirect(location) => http::response::build_redirect_response(&location),
        Loaded::NotFound => http::build_404_response(),
        Loaded::Forbidden => http::build_403_response(),
    }
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        _ => "1.1",
    }
}

/// Size reported in the access log: the Content-Length of the entity,
/// which for HEAD responses differs from the bytes on the wire.
fn body_size(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
