use anyhow::{Context, Result, bail};
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;

/// Binds the first free port starting at the configured one.
///
/// Only `AddrInUse` moves on to the next port; any other error, or running
/// out of attempts, is fatal.
pub async fn bind(cfg: &ServerConfig) -> Result<TcpListener> {
    let mut port = cfg.port;

    for _ in 0..cfg.port_attempts {
        let addr = format!("{}:{}", cfg.host, port);
        debug!("Binding {}", addr);

        match TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                warn!("Port {} in use, trying the next one", port);
                port = port.checked_add(1).context("ran out of ports to try")?;
            }
            Err(e) => return Err(e).with_context(|| format!("failed to bind {}", addr)),
        }
    }

    bail!(
        "no free port in {}..{} after {} attempts",
        cfg.port,
        port,
        cfg.port_attempts
    )
}

/// Accepts connections and serves them one at a time, in arrival order.
pub async fn run(cfg: &Config) -> Result<()> {
    let listener = bind(&cfg.server).await?;
    info!(
        "Listening on {}, serving {}",
        listener.local_addr()?,
        cfg.static_files.root.display()
    );

    serve(listener, cfg).await
}

/// The accept loop over an already bound listener.
pub async fn serve(listener: TcpListener, cfg: &Config) -> Result<()> {
    loop {
        let (socket, peer) = listener.accept().await.context("accept failed")?;
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, cfg.static_files.clone());
        match conn.run().await {
            Ok(Some(status)) => debug!(%peer, status = status.as_u16(), "Connection served"),
            Ok(None) => debug!(%peer, "Connection closed without a request"),
            Err(e) => tracing::error!("Connection error from {}: {:#}", peer, e),
        }
        // Dropping the connection closes the socket.
    }
}
