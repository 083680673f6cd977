use anyhow::{Context, Result};
use axum_server::Handle;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// In-flight requests get this long to finish after a shutdown signal.
const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Waits for Ctrl+C or SIGTERM and starts a graceful shutdown of `handle`.
pub(crate) async fn on_signal(handle: Handle<SocketAddr>) {
    match wait_for_signal().await {
        Ok(signal) => {
            info!(signal, grace_secs = GRACE_PERIOD.as_secs(), "Shutting down");
            handle.graceful_shutdown(Some(GRACE_PERIOD));
        },
        Err(e) => error!(error = %e, "Shutdown signal handler failed"),
    }
}

async fn wait_for_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?;
        tokio::select! {
            res = signal::ctrl_c() => res.map(|()| "SIGINT").context("Failed to listen for Ctrl+C"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
        Ok("Ctrl+C")
    }
}
