//! Async action layer.
//!
//! Every user action follows the same shape: dispatch optimistic state,
//! await the backend, then apply the result (or roll back) keyed by the ids
//! carried in the request. The store lock is never held across the await,
//! and results never consult the current selection.

pub mod connections;
pub mod credentials;
pub mod directory;
pub mod errors;
pub mod tunnels;

use std::sync::Arc;

pub use errors::ClientError;

use crate::backend::Backend;
use crate::directory::{ServerId, ServiceId};
use crate::state::{Action, SharedStore};

pub struct Client<B: Backend> {
    backend: Arc<B>,
    store: SharedStore,
}

impl<B: Backend> Clone for Client<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            store: self.store.clone(),
        }
    }
}

impl<B: Backend> Client<B> {
    pub fn new(backend: Arc<B>, store: SharedStore) -> Self {
        Self { backend, store }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Flip a service's favorite membership. Returns the new membership.
    pub fn toggle_favorite(&self, service: ServiceId) -> Result<bool, ClientError> {
        self.store.dispatch(Action::ToggleFavorite { service })?;
        Ok(self.store.read(|s| s.favorites().contains(service)))
    }

    pub fn select_server(&self, id: Option<ServerId>) -> Result<(), ClientError> {
        self.store.dispatch(Action::SelectServer { id })?;
        Ok(())
    }

    pub fn select_service(&self, id: Option<ServiceId>) -> Result<(), ClientError> {
        self.store.dispatch(Action::SelectService { id })?;
        Ok(())
    }
}
