use uuid::Uuid;

use crate::connections::OptimisticToken;
use crate::credentials::{Credential, PromptPhase};
use crate::directory::{CompanyId, DirectoryNode, ServerId, ServiceId};
use crate::tunnels::{TunnelId, TunnelStatus};

/// What a successful dispatch changed.
///
/// Failures use the `Result` error channel, never this type. Changes within
/// one dispatch are in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    DirectoryReplaced { servers: usize, services: usize },
    ExpandedChanged { company_ids: Vec<CompanyId> },
    SelectionChanged {
        server: Option<ServerId>,
        service: Option<ServiceId>,
    },
    /// `changed` is false when the node was already in the requested state.
    NodeHidden { node: DirectoryNode, changed: bool },
    NodeRestored { node: DirectoryNode, changed: bool },

    /// Carries the token needed to roll the connect back.
    ConnectedOptimistically { token: OptimisticToken },
    DisconnectedOptimistically { service: ServiceId },
    /// `applied` is false when an authoritative write superseded the guess.
    ConnectRolledBack { service: ServiceId, applied: bool },
    ConnectedServicesReplaced { count: usize },
    ServiceConnected { service: ServiceId },
    ServiceDisconnected { service: ServiceId },

    TunnelInserted { id: TunnelId },
    /// An older active tunnel to the same endpoint lost to a newer one.
    TunnelDemoted { id: TunnelId },
    TunnelRemoved { id: TunnelId },
    TunnelStatusChanged { id: TunnelId, status: TunnelStatus },

    CredentialPrompted { service: ServiceId, phase: PromptPhase },
    CredentialResolved {
        service: ServiceId,
        credential: Option<Credential>,
        remember: bool,
    },
    CredentialPromptCleared { service: Option<ServiceId> },
    CredentialForgotten { service: ServiceId, removed: bool },

    ConnectionRecorded { id: Uuid, evicted: Option<Uuid> },
    FavoriteToggled { service: ServiceId, favorite: bool },
}
