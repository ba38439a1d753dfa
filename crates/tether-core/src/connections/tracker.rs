use std::collections::BTreeSet;

use crate::directory::ServiceId;

/// Receipt for an optimistic connect, used to roll it back safely.
///
/// Carries the authoritative epoch observed when the optimistic write was
/// made. A rollback is ignored once any authoritative write has happened
/// since, because the backend's report is newer than the local guess. A
/// token for a service that was already connected never removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticToken {
    pub service: ServiceId,
    epoch: u64,
    inserted: bool,
}

/// Tracks connected services.
///
/// Two writer families touch the set:
/// - optimistic writes from user actions (`connect_optimistic`,
///   `disconnect_optimistic`, `rollback`), which commute with each other for
///   different services;
/// - authoritative writes from the remote event stream (`replace_authoritative`,
///   `mark_connected`, `mark_disconnected`), which always win and bump the epoch.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    connected: BTreeSet<ServiceId>,
    epoch: u64,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a service connected before the backend has acknowledged it.
    pub fn connect_optimistic(&mut self, service: ServiceId) -> OptimisticToken {
        let inserted = self.connected.insert(service);
        OptimisticToken {
            service,
            epoch: self.epoch,
            inserted,
        }
    }

    /// Mark a service disconnected before the backend has acknowledged it.
    ///
    /// Returns `true` if the service was in the set.
    pub fn disconnect_optimistic(&mut self, service: ServiceId) -> bool {
        self.connected.remove(&service)
    }

    /// Undo an optimistic connect whose backend request failed.
    ///
    /// Returns `true` if the service was removed. Nothing happens when an
    /// authoritative write has superseded the optimistic one, or when the
    /// service was already in the set before the optimistic connect.
    pub fn rollback(&mut self, token: OptimisticToken) -> bool {
        if !token.inserted || token.epoch != self.epoch {
            return false;
        }
        self.connected.remove(&token.service)
    }

    /// Replace the whole set with the backend's report.
    pub fn replace_authoritative(&mut self, services: impl IntoIterator<Item = ServiceId>) {
        self.connected = services.into_iter().collect();
        self.epoch += 1;
    }

    /// The backend reported a single service as connected.
    pub fn mark_connected(&mut self, service: ServiceId) {
        self.connected.insert(service);
        self.epoch += 1;
    }

    /// The backend reported a single service as disconnected.
    pub fn mark_disconnected(&mut self, service: ServiceId) {
        self.connected.remove(&service);
        self.epoch += 1;
    }

    pub fn contains(&self, service: ServiceId) -> bool {
        self.connected.contains(&service)
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.connected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.connected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }
}
