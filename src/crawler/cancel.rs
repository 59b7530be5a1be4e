//! Crawl-wide cancellation signal

use std::sync::Arc;
use tokio::sync::watch;

/// A cloneable, one-way switch that stops a running crawl
///
/// Raising the signal stops new task submission, releases queued tasks and
/// lets tasks that are mid-fetch abandon their request. Once raised it stays
/// raised.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelSignal {
    /// Creates a signal in the not-cancelled state
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Raises the signal. Calling it more than once has no further effect.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Returns whether the signal has been raised
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the signal has been raised
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}
