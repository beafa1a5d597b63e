// src/presentation/http/mod.rs
pub mod routes;
pub mod state;

use crate::presentation::http::{routes::build_router, state::HttpState};
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// Bind the status listener. Called during startup so a bad or busy
/// address aborts the relay instead of being discovered at shutdown.
///
/// # Errors
///
/// Returns the I/O error when `addr` cannot be resolved or bound.
pub async fn bind(addr: &str) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("status server listening on {address}");
    Ok(listener)
}

/// Serve the status endpoints on an already bound listener until `cancel` fires.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    state: HttpState,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
}

/// Run [`serve`] in the background. A server that dies early cancels `cancel`
/// so the pipeline stops with it, and the error is handed back through the
/// join handle.
#[must_use]
pub fn spawn(
    listener: TcpListener,
    state: HttpState,
    cancel: CancellationToken,
) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        let result = serve(listener, state, cancel.clone()).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "status server stopped");
            cancel.cancel();
        }
        result
    })
}
