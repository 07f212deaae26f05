// Listener module
// Binds the listening socket; bind failure is fatal and propagates to main

use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Bind a `TcpListener` on the configured address.
///
/// A port already in use (or any other bind failure) surfaces as the OS
/// error unchanged; the caller treats it as fatal with no retry.
pub async fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}
