//! Signal-driven cancellation
//!
//! Maps process interrupt and termination signals onto a single
//! [`CancellationToken`] shared by every toolchain invocation.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Keeps the signal listener alive; dropping it unsubscribes exactly once
#[derive(Debug)]
pub struct SignalGuard {
    listener: JoinHandle<()>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Create the execution context for a run
///
/// The returned token is cancelled when the process receives SIGINT or
/// SIGTERM (Ctrl-C on other platforms). Must be called inside a tokio runtime.
pub fn cancel_on_signals() -> std::io::Result<(CancellationToken, SignalGuard)> {
    let token = CancellationToken::new();
    let listener = spawn_listener(token.clone())?;
    Ok((token, SignalGuard { listener }))
}

#[cfg(unix)]
fn spawn_listener(token: CancellationToken) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("Received SIGINT, cancelling"),
            _ = terminate.recv() => tracing::info!("Received SIGTERM, cancelling"),
        }
        token.cancel();
    }))
}

#[cfg(not(unix))]
fn spawn_listener(token: CancellationToken) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, cancelling");
            token.cancel();
        }
    }))
}
