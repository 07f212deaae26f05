// Server module entry point
// Provides listener binding and the accept loop

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module file is mapped to `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::bind_listener;
pub use server_loop::start_server_loop;

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn fixture_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("staticd-e2e-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn test_config(root: &PathBuf) -> Arc<Config> {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.files.root = root.to_str().unwrap().to_string();
        cfg.logging.access_log = false;
        Arc::new(cfg)
    }

    /// Bind an ephemeral loopback port, run the accept loop on a task,
    /// and return the bound address.
    async fn spawn_server(config: Arc<Config>) -> std::net::SocketAddr {
        let listener = super::bind_listener("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = super::start_server_loop(listener, config).await;
        });
        addr
    }

    /// Issue one raw HTTP/1.1 request and return the full response bytes.
    async fn request(addr: std::net::SocketAddr, method: &str, path: &str) -> Vec<u8> {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        response
    }

    fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("no header/body separator");
        let head = String::from_utf8_lossy(&raw[..split]).into_owned();
        (head, raw[split + 4..].to_vec())
    }

    #[tokio::test]
    async fn test_serves_html_with_content_type() {
        let root = fixture_root("html");
        fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/index.html").await;
        let (head, body) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200"));
        assert!(head.to_lowercase().contains("content-type: text/html"));
        assert_eq!(body, b"<h1>hi</h1>");
    }

    #[tokio::test]
    async fn test_serves_binary_bytes_unchanged() {
        let root = fixture_root("binary");
        let bytes: Vec<u8> = (0..=255u8).collect();
        fs::write(root.join("logo.png"), &bytes).unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/logo.png").await;
        let (head, body) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200"));
        assert!(head.to_lowercase().contains("content-type: image/png"));
        assert_eq!(body, bytes);
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let root = fixture_root("missing");
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/does-not-exist.txt").await;
        let (head, _) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 404"));
    }

    #[tokio::test]
    async fn test_unknown_extension_defaults_to_octet_stream() {
        let root = fixture_root("octet");
        fs::write(root.join("notes.text"), "plain").unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/notes.text").await;
        let (head, _) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200"));
        assert!(head
            .to_lowercase()
            .contains("content-type: application/octet-stream"));
    }

    #[tokio::test]
    async fn test_head_has_headers_but_no_body() {
        let root = fixture_root("head");
        fs::write(root.join("style.css"), "body{}").unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "HEAD", "/style.css").await;
        let (head, body) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200"));
        assert!(head.to_lowercase().contains("content-type: text/css"));
        assert!(head.to_lowercase().contains("content-length: 6"));
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_post_is_method_not_allowed() {
        let root = fixture_root("post");
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "POST", "/index.html").await;
        let (head, _) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 405"));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_byte_identical() {
        let root = fixture_root("repeat");
        fs::write(root.join("app.js"), "console.log(1);").unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let (_, first) = split_response(&request(addr, "GET", "/app.js").await);
        let (_, second) = split_response(&request(addr, "GET", "/app.js").await);
        assert_eq!(first, second);
        assert_eq!(first, b"console.log(1);");
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects_on_wire() {
        let root = fixture_root("redirect");
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("a.txt"), "a").unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/sub").await;
        let (head, _) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 301"));
        assert!(head.to_lowercase().contains("location: /sub/"));
    }

    #[tokio::test]
    async fn test_encoded_file_name_is_served() {
        let root = fixture_root("encoded");
        fs::write(root.join("a b.html"), "spaced").unwrap();
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/a%20b.html").await;
        let (head, body) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 200"));
        assert!(head.to_lowercase().contains("content-type: text/html"));
        assert_eq!(body, b"spaced");
    }

    #[tokio::test]
    async fn test_traversal_path_is_rejected() {
        let root = fixture_root("traversal");
        let addr = spawn_server(test_config(&root)).await;

        let raw = request(addr, "GET", "/../../etc/passwd").await;
        let (head, _) = split_response(&raw);
        assert!(head.starts_with("HTTP/1.1 404"));
    }
}
