//! Shutdown coordination.

use std::sync::Arc;
use tokio::sync::watch;

/// Latching shutdown flag.
///
/// Cloning is cheap; every clone observes the same trigger. Waiters that
/// subscribe after the trigger return immediately.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal every waiter.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once [`trigger`](Self::trigger) has been called.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this only ends by observing `true`.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Resolve on Ctrl+C or on [`trigger`](Self::trigger), whichever comes first.
    pub async fn wait_or_ctrl_c(&self) {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                    self.wait().await;
                    return;
                }
                tracing::info!("Shutdown signal received");
                self.trigger();
            }
            _ = self.wait() => tracing::info!("Shutdown triggered"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
