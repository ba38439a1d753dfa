use std::fmt;

use tokio::sync::mpsc;

use crate::protocol::{DirectoryEvent, RemoteEvent};

/// Teardown callback registered alongside a subscription.
pub type Disposer = Box<dyn FnOnce() + Send + 'static>;

/// A live registration on one push-event stream.
///
/// Dropping the subscription runs its disposer exactly once, whichever way
/// the owner exits.
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    disposer: Option<Disposer>,
}

impl<T> Subscription<T> {
    pub fn new(receiver: mpsc::UnboundedReceiver<T>, disposer: Disposer) -> Self {
        Self {
            receiver,
            disposer: Some(disposer),
        }
    }

    /// Next event, or `None` once the stream has closed.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Unsubscribe now instead of waiting for drop.
    pub fn dispose(mut self) {
        self.run_disposer();
    }

    fn run_disposer(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.run_disposer();
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.disposer.is_some())
            .finish()
    }
}

/// Source of the two push-event streams.
pub trait EventSource: Send + Sync {
    fn subscribe_directory(&self) -> Subscription<DirectoryEvent>;

    fn subscribe_remote(&self) -> Subscription<RemoteEvent>;

    /// Tell the backend the client is listening on both streams.
    fn signal_ready(&self);
}
