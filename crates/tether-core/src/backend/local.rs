use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, watch};
use tracing::debug;

use super::events::{EventSource, Subscription};
use crate::protocol::{DirectoryEvent, PushEvent, RemoteEvent};

#[derive(Default)]
struct Listeners {
    next_id: u64,
    directory: Vec<(u64, mpsc::UnboundedSender<DirectoryEvent>)>,
    remote: Vec<(u64, mpsc::UnboundedSender<RemoteEvent>)>,
    ready_signals: usize,
}

/// In-memory event bus implementing [`EventSource`].
///
/// Cloning shares the same listener table.
#[derive(Clone)]
pub struct LocalBus {
    listeners: Arc<Mutex<Listeners>>,
    ready: Arc<watch::Sender<bool>>,
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalBus {
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            listeners: Arc::new(Mutex::new(Listeners::default())),
            ready: Arc::new(ready),
        }
    }

    /// Deliver a directory event to every subscriber. Returns how many
    /// subscribers received it.
    pub fn publish_directory(&self, event: DirectoryEvent) -> usize {
        let mut listeners = self.lock();
        listeners
            .directory
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        listeners.directory.len()
    }

    /// Deliver a remote event to every subscriber.
    pub fn publish_remote(&self, event: RemoteEvent) -> usize {
        let mut listeners = self.lock();
        listeners
            .remote
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        listeners.remote.len()
    }

    pub fn publish(&self, event: PushEvent) -> usize {
        match event {
            PushEvent::Directory(event) => self.publish_directory(event),
            PushEvent::Remote(event) => self.publish_remote(event),
        }
    }

    pub fn directory_subscribers(&self) -> usize {
        self.lock().directory.len()
    }

    pub fn remote_subscribers(&self) -> usize {
        self.lock().remote.len()
    }

    /// How many times the readiness signal has been emitted.
    pub fn ready_signals(&self) -> usize {
        self.lock().ready_signals
    }

    /// Wait until the readiness signal has been emitted at least once.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives as long as the bus, so this only ends once ready.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Drop every sender so subscribers see their streams close.
    pub fn close(&self) {
        let mut listeners = self.lock();
        listeners.directory.clear();
        listeners.remote.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn register<T: Send + 'static>(
        &self,
        add: impl FnOnce(&mut Listeners, u64, mpsc::UnboundedSender<T>),
        remove: fn(&mut Listeners, u64),
        stream: &'static str,
    ) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut listeners = self.lock();
            let id = listeners.next_id;
            listeners.next_id += 1;
            add(&mut *listeners, id, tx);
            id
        };
        debug!(event = "core.bus.subscribe_completed", stream = stream, id = id);

        let listeners = Arc::downgrade(&self.listeners);
        Subscription::new(
            rx,
            Box::new(move || {
                if let Some(listeners) = listeners.upgrade() {
                    let mut listeners = listeners.lock().unwrap_or_else(|e| e.into_inner());
                    remove(&mut *listeners, id);
                }
                debug!(event = "core.bus.unsubscribe_completed", stream = stream, id = id);
            }),
        )
    }
}

impl EventSource for LocalBus {
    fn subscribe_directory(&self) -> Subscription<DirectoryEvent> {
        self.register(
            |listeners, id, tx| listeners.directory.push((id, tx)),
            |listeners, id| listeners.directory.retain(|(i, _)| *i != id),
            "directory",
        )
    }

    fn subscribe_remote(&self) -> Subscription<RemoteEvent> {
        self.register(
            |listeners, id, tx| listeners.remote.push((id, tx)),
            |listeners, id| listeners.remote.retain(|(i, _)| *i != id),
            "remote",
        )
    }

    fn signal_ready(&self) {
        self.lock().ready_signals += 1;
        self.ready.send_replace(true);
        debug!(event = "core.bus.ready_signalled");
    }
}
