//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for Ctrl+C (SIGINT)
//! - Translate it into a graceful shutdown
//!
//! # Design Decisions
//! - A handler that cannot be installed never triggers shutdown; the server
//!   keeps serving without signal handling

use std::future::Future;

use crate::lifecycle::shutdown::Shutdown;

/// Wait for Ctrl+C, then trigger `shutdown`.
pub async fn wait_for_signal(shutdown: Shutdown) {
    shutdown_on(tokio::signal::ctrl_c(), shutdown).await
}

/// Trigger `shutdown` once `signal` completes successfully.
///
/// If `signal` fails, the error is logged and this never returns.
pub async fn shutdown_on<F>(signal: F, shutdown: Shutdown)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler, signal shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn signal_triggers_shutdown() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown_on(async { Ok::<(), std::io::Error>(()) }, shutdown).await;
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn handler_failure_keeps_serving() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        let failed = async { Err::<(), _>(std::io::Error::other("no signal support")) };
        let waited = tokio::time::timeout(
            Duration::from_millis(200),
            shutdown_on(failed, shutdown.clone()),
        )
        .await;

        assert!(waited.is_err(), "shutdown_on returned after a failed handler");
        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }
}
