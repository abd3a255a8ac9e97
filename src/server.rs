use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::Config;

/// Ports tried after `PORT` when it is already taken.
pub const PORT_ATTEMPTS: u16 = 20;

/// Bind `PORT`, or the first free port among the next `PORT_ATTEMPTS`.
pub async fn bind_listener(config: &Config) -> Option<TcpListener> {
    let mut last_error: Option<io::Error> = None;
    for port in (0..=PORT_ATTEMPTS).filter_map(|offset| config.port.checked_add(offset)) {
        let addr = SocketAddr::from((config.host, port));
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if let Some(e) = last_error {
                    tracing::warn!(error = %e, "Port {} unavailable", config.port);
                }
                tracing::info!(%addr, "Server running");
                return Some(listener);
            }
            Err(e) => last_error = Some(e),
        }
    }
    None
}
