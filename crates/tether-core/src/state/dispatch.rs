use tracing::{debug, warn};

use crate::config::TetherConfig;
use crate::connections::ConnectionTracker;
use crate::credentials::CredentialFlow;
use crate::directory::DirectoryStore;
use crate::history::{Favorites, RecentConnections};
use crate::state::errors::DispatchError;
use crate::state::events::Change;
use crate::state::store::Store;
use crate::state::types::Action;
use crate::tunnels::{TunnelError, TunnelRegistry};

/// All synchronized client state.
///
/// Fields are read through accessors; every mutation goes through
/// [`Store::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    directory: DirectoryStore,
    connections: ConnectionTracker,
    tunnels: TunnelRegistry,
    credentials: CredentialFlow,
    recents: RecentConnections,
    favorites: Favorites,
}

impl SyncState {
    pub fn new(config: &TetherConfig) -> Self {
        Self {
            recents: RecentConnections::with_limit(config.recent_limit()),
            ..Self::default()
        }
    }

    pub fn directory(&self) -> &DirectoryStore {
        &self.directory
    }

    pub fn connections(&self) -> &ConnectionTracker {
        &self.connections
    }

    pub fn tunnels(&self) -> &TunnelRegistry {
        &self.tunnels
    }

    pub fn credentials(&self) -> &CredentialFlow {
        &self.credentials
    }

    pub fn recents(&self) -> &RecentConnections {
        &self.recents
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    fn apply(&mut self, action: Action) -> Result<Vec<Change>, DispatchError> {
        let changes = match action {
            Action::ReplaceDirectory { companies } => {
                self.directory.replace_directory(companies);
                vec![self.directory_replaced()]
            }
            Action::ClearDirectory => {
                self.directory.clear_directory();
                vec![self.directory_replaced()]
            }
            Action::SetExpanded { company_ids } => {
                self.directory.set_expanded(company_ids.clone());
                vec![Change::ExpandedChanged { company_ids }]
            }
            Action::SelectServer { id } => {
                self.directory.select_server(id);
                vec![self.selection_changed()]
            }
            Action::SelectService { id } => {
                self.directory.select_service(id);
                vec![self.selection_changed()]
            }
            Action::HideNode { node } => {
                let changed = self.directory.hide(node);
                vec![Change::NodeHidden { node, changed }]
            }
            Action::UnhideNode { node } => {
                let changed = self.directory.unhide(node);
                vec![Change::NodeRestored { node, changed }]
            }

            Action::ConnectOptimistic { service } => {
                let token = self.connections.connect_optimistic(service);
                vec![Change::ConnectedOptimistically { token }]
            }
            Action::DisconnectOptimistic { service } => {
                self.connections.disconnect_optimistic(service);
                vec![Change::DisconnectedOptimistically { service }]
            }
            Action::RollbackConnect { token } => {
                let applied = self.connections.rollback(token);
                if !applied {
                    debug!(
                        event = "core.connection.rollback_skipped",
                        service = %token.service,
                    );
                }
                vec![Change::ConnectRolledBack {
                    service: token.service,
                    applied,
                }]
            }
            Action::ReplaceConnected { services } => {
                self.connections.replace_authoritative(services);
                vec![Change::ConnectedServicesReplaced {
                    count: self.connections.len(),
                }]
            }
            Action::MarkConnected { service } => {
                self.connections.mark_connected(service);
                vec![Change::ServiceConnected { service }]
            }
            Action::MarkDisconnected { service } => {
                self.connections.mark_disconnected(service);
                vec![Change::ServiceDisconnected { service }]
            }

            Action::InsertTunnel { tunnel } => {
                let id = tunnel.id.clone();
                let mut changes = Vec::with_capacity(2);
                if let Some(demoted) = self.tunnels.insert(tunnel) {
                    changes.push(Change::TunnelDemoted { id: demoted });
                }
                changes.push(Change::TunnelInserted { id });
                changes
            }
            Action::RemoveTunnel { id } => {
                if self.tunnels.remove(&id).is_none() {
                    return Err(TunnelError::NotFound { id }.into());
                }
                vec![Change::TunnelRemoved { id }]
            }
            Action::SetTunnelStatus { id, status } => {
                self.tunnels.set_status(&id, status)?;
                vec![Change::TunnelStatusChanged { id, status }]
            }

            Action::RequestCredentials { service } => {
                let phase = self.credentials.request_prompt(service);
                vec![Change::CredentialPrompted { service, phase }]
            }
            Action::OfferCredential {
                service,
                remember,
                credential,
            } => {
                self.credentials.offer(service, remember, credential);
                vec![Change::CredentialPrompted {
                    service,
                    phase: self.credentials.phase(service),
                }]
            }
            Action::ResolveCredential {
                service,
                credential,
                remember,
            } => {
                let credential = self.credentials.resolve(service, credential, remember)?;
                vec![Change::CredentialResolved {
                    service,
                    credential,
                    remember,
                }]
            }
            Action::ClearCredentialPrompt => {
                let cleared = self.credentials.clear_prompt();
                vec![Change::CredentialPromptCleared {
                    service: cleared.map(|p| p.service),
                }]
            }
            Action::ForgetCredential { service } => {
                let removed = self.credentials.forget(service);
                vec![Change::CredentialForgotten { service, removed }]
            }

            Action::RecordConnection { entry } => {
                let id = entry.id;
                let evicted = self.recents.push(entry).map(|e| e.id);
                vec![Change::ConnectionRecorded { id, evicted }]
            }
            Action::ToggleFavorite { service } => {
                let favorite = self.favorites.toggle(service);
                vec![Change::FavoriteToggled { service, favorite }]
            }
        };
        Ok(changes)
    }

    fn directory_replaced(&self) -> Change {
        Change::DirectoryReplaced {
            servers: self.directory.servers().count(),
            services: self.directory.services().count(),
        }
    }

    fn selection_changed(&self) -> Change {
        Change::SelectionChanged {
            server: self.directory.selected_server_id(),
            service: self.directory.selected_service_id(),
        }
    }
}

impl Store for SyncState {
    type Error = DispatchError;

    fn dispatch(&mut self, action: Action) -> Result<Vec<Change>, DispatchError> {
        let name = action.name();
        debug!(event = "core.state.dispatch_started", action = name);

        let result = self.apply(action);

        match &result {
            Ok(changes) => debug!(
                event = "core.state.dispatch_completed",
                action = name,
                changes = changes.len(),
            ),
            Err(e) => warn!(
                event = "core.state.dispatch_failed",
                action = name,
                error = %e,
            ),
        }

        result
    }
}
