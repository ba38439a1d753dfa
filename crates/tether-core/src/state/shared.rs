use std::sync::{Arc, Mutex, MutexGuard};

use super::dispatch::SyncState;
use super::errors::DispatchError;
use super::events::Change;
use super::store::Store;
use super::types::Action;

/// Cloneable handle to the process-wide [`SyncState`].
///
/// Constructed explicitly and passed to whoever needs it; tests build their
/// own. The lock is only taken inside synchronous calls, so it is never held
/// across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<SyncState>>,
}

impl SharedStore {
    pub fn new(state: SyncState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn dispatch(&self, action: Action) -> Result<Vec<Change>, DispatchError> {
        self.lock().dispatch(action)
    }

    /// Apply several actions in order, stopping at the first failure.
    pub fn dispatch_all(
        &self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<Vec<Change>, DispatchError> {
        let mut state = self.lock();
        let mut changes = Vec::new();
        for action in actions {
            changes.extend(state.dispatch(action)?);
        }
        Ok(changes)
    }

    /// Run a read-only query against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&SyncState) -> R) -> R {
        f(&self.lock())
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SyncState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        // Dispatch never panics mid-mutation, so a poisoned lock still holds
        // consistent state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for SharedStore {
    type Error = DispatchError;

    fn dispatch(&mut self, action: Action) -> Result<Vec<Change>, DispatchError> {
        SharedStore::dispatch(self, action)
    }
}
