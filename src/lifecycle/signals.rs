//! OS signal handling.
//!
//! Ctrl+C (SIGINT) triggers graceful shutdown. Anything else, including
//! SIGTERM, ends the process immediately as before.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, then fire `shutdown`.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Ctrl+C received");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
