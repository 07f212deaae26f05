// Server loop module
// Unbounded accept loop; runs until the process is terminated

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::config::Config;
use crate::logger;

/// Accept connections forever, dispatching each to request handling.
///
/// Accept errors are logged and the loop continues; the loop itself
/// never returns under normal operation.
pub async fn start_server_loop(
    listener: TcpListener,
    config: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                handle_connection(stream, peer_addr, Arc::clone(&config));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
