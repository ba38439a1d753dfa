use crate::connections::OptimisticToken;
use crate::credentials::Credential;
use crate::directory::{Company, CompanyId, DirectoryNode, ServerId, ServiceId};
use crate::history::RecentConnection;
use crate::tunnels::{Tunnel, TunnelId, TunnelStatus};

/// All synchronous state mutations.
///
/// Authoritative actions come from the push-event adapter; optimistic ones
/// and their rollbacks come from the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the full directory tree with a backend snapshot.
    ReplaceDirectory { companies: Vec<Company> },
    /// The backend reported an empty directory.
    ClearDirectory,
    SetExpanded { company_ids: Vec<CompanyId> },
    /// Select a server. A different server clears the service selection.
    SelectServer { id: Option<ServerId> },
    SelectService { id: Option<ServiceId> },
    /// Tombstone a node while its deletion is in flight.
    HideNode { node: DirectoryNode },
    /// Restore a tombstoned node after its deletion failed.
    UnhideNode { node: DirectoryNode },

    ConnectOptimistic { service: ServiceId },
    DisconnectOptimistic { service: ServiceId },
    /// Undo an optimistic connect unless the backend has spoken since.
    RollbackConnect { token: OptimisticToken },
    ReplaceConnected { services: Vec<ServiceId> },
    MarkConnected { service: ServiceId },
    MarkDisconnected { service: ServiceId },

    InsertTunnel { tunnel: Tunnel },
    RemoveTunnel { id: TunnelId },
    SetTunnelStatus { id: TunnelId, status: TunnelStatus },

    /// The backend asked for credentials.
    RequestCredentials { service: ServiceId },
    /// The backend offered a credential for display.
    OfferCredential {
        service: ServiceId,
        remember: bool,
        credential: Option<Credential>,
    },
    /// The user answered the pending prompt. `None` skips.
    ResolveCredential {
        service: ServiceId,
        credential: Option<Credential>,
        remember: bool,
    },
    ClearCredentialPrompt,
    ForgetCredential { service: ServiceId },

    RecordConnection { entry: RecentConnection },
    ToggleFavorite { service: ServiceId },
}

impl Action {
    /// Short name for logging; never includes payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ReplaceDirectory { .. } => "replace_directory",
            Action::ClearDirectory => "clear_directory",
            Action::SetExpanded { .. } => "set_expanded",
            Action::SelectServer { .. } => "select_server",
            Action::SelectService { .. } => "select_service",
            Action::HideNode { .. } => "hide_node",
            Action::UnhideNode { .. } => "unhide_node",
            Action::ConnectOptimistic { .. } => "connect_optimistic",
            Action::DisconnectOptimistic { .. } => "disconnect_optimistic",
            Action::RollbackConnect { .. } => "rollback_connect",
            Action::ReplaceConnected { .. } => "replace_connected",
            Action::MarkConnected { .. } => "mark_connected",
            Action::MarkDisconnected { .. } => "mark_disconnected",
            Action::InsertTunnel { .. } => "insert_tunnel",
            Action::RemoveTunnel { .. } => "remove_tunnel",
            Action::SetTunnelStatus { .. } => "set_tunnel_status",
            Action::RequestCredentials { .. } => "request_credentials",
            Action::OfferCredential { .. } => "offer_credential",
            Action::ResolveCredential { .. } => "resolve_credential",
            Action::ClearCredentialPrompt => "clear_credential_prompt",
            Action::ForgetCredential { .. } => "forget_credential",
            Action::RecordConnection { .. } => "record_connection",
            Action::ToggleFavorite { .. } => "toggle_favorite",
        }
    }

    /// Whether this action reports backend truth rather than a local guess.
    pub fn is_authoritative(&self) -> bool {
        matches!(
            self,
            Action::ReplaceDirectory { .. }
                | Action::ClearDirectory
                | Action::SetExpanded { .. }
                | Action::ReplaceConnected { .. }
                | Action::MarkConnected { .. }
                | Action::MarkDisconnected { .. }
                | Action::RequestCredentials { .. }
                | Action::OfferCredential { .. }
        )
    }
}
