//! tether-core: client-side state synchronization for remote-access tunnels
//!
//! This library mirrors the state of an external tunneling daemon on the
//! client. It reconciles optimistic local actions with the authoritative
//! events the daemon pushes. It is used by the CLI and by any UI shell.
//!
//! # Main Entry Points
//!
//! - [`state`] - The single store, its actions and change notifications
//! - [`client`] - Async user actions against a [`Backend`]
//! - [`sync`] - Applies the daemon's push-event streams to the store
//! - [`views`] - Derived, read-only selectors
//! - [`config`] - Configuration management

pub mod backend;
pub mod client;
pub mod config;
pub mod connections;
pub mod credentials;
pub mod directory;
pub mod errors;
pub mod events;
pub mod history;
pub mod logging;
pub mod protocol;
pub mod state;
pub mod sync;
pub mod tunnels;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types at crate root for convenience
pub use backend::{Backend, BackendError, EventSource, LocalBus, Subscription};
pub use client::{Client, ClientError};
pub use config::TetherConfig;
pub use connections::{ConnectionError, ConnectionTracker, OptimisticToken};
pub use credentials::{Credential, CredentialError, CredentialFlow, CredentialPrompt, PromptPhase};
pub use directory::{
    Company, CompanyId, DirectoryError, DirectoryNode, DirectoryStore, NewService, Protocol,
    Server, ServerId, Service, ServiceId, ServicePatch,
};
pub use history::{Favorites, RecentConnection, RecentConnections};
pub use protocol::{DirectoryEvent, PushEvent, RemoteEvent};
pub use state::{Action, Change, DispatchError, SharedStore, Store, SyncState};
pub use sync::{EventPump, PumpStats};
pub use tunnels::{StopAllError, Tunnel, TunnelError, TunnelHandle, TunnelId, TunnelStatus};

// Re-export logging initialization
pub use logging::init_logging;
