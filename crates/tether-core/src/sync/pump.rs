use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::EventSource;
use crate::config::TetherConfig;
use crate::protocol::{PushEvent, normalize};
use crate::state::SharedStore;

/// Counters reported when the pump stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub directory_events: usize,
    pub remote_events: usize,
    /// Events whose actions were rejected by the store.
    pub rejected: usize,
    pub ready_signalled: bool,
}

/// Drives both push-event streams into a [`SharedStore`].
///
/// Events are applied one at a time in the order each stream delivers them.
/// Both subscriptions are created before the readiness signal, and both are
/// dropped (running their disposers) on every exit path.
#[derive(Debug, Clone)]
pub struct EventPump {
    store: SharedStore,
    ready_delay: Duration,
    log_events: bool,
}

impl EventPump {
    pub fn new(store: SharedStore, config: &TetherConfig) -> Self {
        Self {
            store,
            ready_delay: config.ready_delay(),
            log_events: config.log_events(),
        }
    }

    /// Run until `shutdown` is cancelled or both streams close.
    ///
    /// If both streams close before the ready delay elapses, the readiness
    /// signal is never sent.
    pub async fn run<S: EventSource>(&self, source: &S, shutdown: CancellationToken) -> PumpStats {
        let mut directory = source.subscribe_directory();
        let mut remote = source.subscribe_remote();
        let mut stats = PumpStats::default();

        info!(
            event = "core.sync.pump_started",
            ready_delay = ?self.ready_delay,
        );

        if self.ready_delay.is_zero() {
            source.signal_ready();
            stats.ready_signalled = true;
        }
        let ready_timer = tokio::time::sleep(self.ready_delay);
        tokio::pin!(ready_timer);

        let mut directory_open = true;
        let mut remote_open = true;

        while directory_open || remote_open {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(event = "core.sync.pump_cancelled");
                    break;
                }
                _ = &mut ready_timer, if !stats.ready_signalled => {
                    source.signal_ready();
                    stats.ready_signalled = true;
                }
                event = directory.recv(), if directory_open => match event {
                    Some(event) => {
                        stats.directory_events += 1;
                        self.apply(PushEvent::Directory(event), &mut stats);
                    }
                    None => {
                        debug!(event = "core.sync.stream_closed", stream = "directory");
                        directory_open = false;
                    }
                },
                event = remote.recv(), if remote_open => match event {
                    Some(event) => {
                        stats.remote_events += 1;
                        self.apply(PushEvent::Remote(event), &mut stats);
                    }
                    None => {
                        debug!(event = "core.sync.stream_closed", stream = "remote");
                        remote_open = false;
                    }
                },
            }
        }

        drop(directory);
        drop(remote);

        info!(
            event = "core.sync.pump_stopped",
            directory_events = stats.directory_events,
            remote_events = stats.remote_events,
            rejected = stats.rejected,
        );
        stats
    }

    /// Apply recorded events one by one in the order given.
    ///
    /// Unlike [`EventPump::run`], order is kept across the two streams, so a
    /// recorded log reproduces the store exactly. No readiness signal is sent.
    pub fn replay(&self, events: impl IntoIterator<Item = PushEvent>) -> PumpStats {
        let mut stats = PumpStats::default();
        for event in events {
            match &event {
                PushEvent::Directory(_) => stats.directory_events += 1,
                PushEvent::Remote(_) => stats.remote_events += 1,
            }
            self.apply(event, &mut stats);
        }
        stats
    }

    /// Apply one event synchronously.
    pub fn apply(&self, event: PushEvent, stats: &mut PumpStats) {
        let stream = event.stream();
        let kind = event.kind();

        match self.store.dispatch_all(normalize(event)) {
            Ok(changes) => {
                if self.log_events {
                    debug!(
                        event = "core.sync.event_applied",
                        stream = stream,
                        kind = kind,
                        changes = changes.len(),
                    );
                }
            }
            Err(e) => {
                stats.rejected += 1;
                warn!(
                    event = "core.sync.event_rejected",
                    stream = stream,
                    kind = kind,
                    error = %e,
                );
            }
        }
    }
}
