//! Portal HTTP server lifecycle.

use std::net::{IpAddr, SocketAddr};

use tokio::sync::oneshot;

use crate::config::PortalConfig;
use crate::web::router::portal_router_with_ctx;
use crate::web::types::PortalContext;

/// Handle to a running portal server.
pub struct PortalServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl PortalServer {
    /// Address the server is actually bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the server to stop. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Start the portal on the configured bind address.
pub async fn start_portal_server(config: PortalConfig) -> std::io::Result<PortalServer> {
    let addr = config.bind_addr;
    start_portal_server_at(config, addr).await
}

/// Start the portal on an OS-assigned port of `ip`. Used by tests that
/// need a live listener without fighting over port numbers.
pub async fn start_portal_server_on(
    config: PortalConfig,
    ip: IpAddr,
) -> std::io::Result<PortalServer> {
    start_portal_server_at(config, SocketAddr::new(ip, 0)).await
}

async fn start_portal_server_at(
    config: PortalConfig,
    addr: SocketAddr,
) -> std::io::Result<PortalServer> {
    let app = portal_router_with_ctx(PortalContext::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tracing::info!(%addr, "Portal server listening");
    tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!(error = %e, "Portal server terminated");
        }
    });

    Ok(PortalServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}
