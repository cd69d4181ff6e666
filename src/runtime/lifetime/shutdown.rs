use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::services::LinkRegistry;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

/// Wait for Ctrl+C, then write the registry to disk one last time.
pub async fn listen_for_shutdown(registry: Arc<LinkRegistry>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, flushing data...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    let flush = tokio::task::spawn_blocking(move || registry.flush());

    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), flush).await {
        Ok(Ok(Ok(()))) => info!("Link data flushed, shutting down..."),
        Ok(Ok(Err(e))) => error!("Failed to flush link data on shutdown: {}", e),
        Ok(Err(e)) => error!("Flush task panicked: {}", e),
        Err(_) => error!(
            "Flushing link data timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}
