//! Read-only selectors over [`SyncState`].
//!
//! Selectors own no state and never fail. Ids that no longer resolve against
//! the directory are dropped instead of reported.
//!
//! # Connectivity
//!
//! Two backend command families report connection state: tunnel start/stop
//! (host and port matching) and connect/disconnect (the connected-id set).
//! [`connectivity`] unifies them. A tunnel record that targets the service
//! decides the answer; the connected-id set is consulted only for services
//! with no tunnel record at all.

use serde::Serialize;

use crate::credentials::PromptPhase;
use crate::directory::{Server, Service, ServiceId};
use crate::history::RecentConnection;
use crate::state::SyncState;
use crate::tunnels::Tunnel;

/// A service together with the server that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDetails<'a> {
    pub service: &'a Service,
    pub server: &'a Server,
}

/// A history entry with whatever of its service and server still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentDetails<'a> {
    pub recent: &'a RecentConnection,
    pub service: Option<&'a Service>,
    pub server: Option<&'a Server>,
}

/// How a service is currently reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity<'a> {
    /// An active tunnel forwards to the service.
    Tunneled(&'a Tunnel),
    /// The daemon reports a connection and no tunnel record exists.
    Connected,
    Disconnected,
}

impl Connectivity<'_> {
    pub fn is_connected(&self) -> bool {
        !matches!(self, Connectivity::Disconnected)
    }
}

pub fn active_tunnel_count(state: &SyncState) -> usize {
    state.tunnels().active_count()
}

pub fn total_servers(state: &SyncState) -> usize {
    state.directory().servers().count()
}

pub fn total_services(state: &SyncState) -> usize {
    state.directory().services().count()
}

pub fn has_servers(state: &SyncState) -> bool {
    state.directory().servers().next().is_some()
}

pub fn is_favorite(state: &SyncState, service: ServiceId) -> bool {
    state.favorites().contains(service)
}

/// Favorited services that still exist, with their servers.
pub fn favorite_services(state: &SyncState) -> Vec<ServiceDetails<'_>> {
    let directory = state.directory();
    state
        .favorites()
        .iter()
        .filter_map(|id| {
            Some(ServiceDetails {
                service: directory.service(id)?,
                server: directory.server_of_service(id)?,
            })
        })
        .collect()
}

/// Recent connections, most recent first.
pub fn recent_connections_with_details(state: &SyncState) -> Vec<RecentDetails<'_>> {
    let directory = state.directory();
    state
        .recents()
        .iter()
        .map(|recent| RecentDetails {
            recent,
            service: directory.service(recent.service_id),
            server: directory.server(recent.server_id),
        })
        .collect()
}

/// The active tunnel forwarding to a service, if any.
pub fn tunnel_for_service(state: &SyncState, service: ServiceId) -> Option<&Tunnel> {
    let service = state.directory().service(service)?;
    state.tunnels().find_active(&service.host, service.port)
}

pub fn selected_server(state: &SyncState) -> Option<&Server> {
    state
        .directory()
        .selected_server_id()
        .and_then(|id| state.directory().server(id))
}

pub fn selected_service(state: &SyncState) -> Option<&Service> {
    state
        .directory()
        .selected_service_id()
        .and_then(|id| state.directory().service(id))
}

pub fn selected_service_tunnel(state: &SyncState) -> Option<&Tunnel> {
    state
        .directory()
        .selected_service_id()
        .and_then(|id| tunnel_for_service(state, id))
}

pub fn connectivity(state: &SyncState, service: ServiceId) -> Connectivity<'_> {
    let Some(target) = state.directory().service(service) else {
        return Connectivity::Disconnected;
    };

    if let Some(tunnel) = state.tunnels().find_active(&target.host, target.port) {
        return Connectivity::Tunneled(tunnel);
    }

    let has_tunnel_record = state
        .tunnels()
        .iter()
        .any(|t| t.targets(&target.host, target.port));
    if !has_tunnel_record && state.connections().contains(service) {
        Connectivity::Connected
    } else {
        Connectivity::Disconnected
    }
}

pub fn is_service_connected(state: &SyncState, service: ServiceId) -> bool {
    connectivity(state, service).is_connected()
}

/// Every visible service that is currently connected.
pub fn connected_services(state: &SyncState) -> Vec<&Service> {
    state
        .directory()
        .services()
        .filter(|s| is_service_connected(state, s.id))
        .collect()
}

/// Counts and prompt state, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    pub companies: usize,
    pub servers: usize,
    pub services: usize,
    pub connected: Vec<ServiceId>,
    pub active_tunnels: usize,
    pub favorites: usize,
    pub recents: usize,
    pub prompt: Option<PromptSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSummary {
    pub service: ServiceId,
    pub phase: PromptPhase,
    pub prefilled: bool,
}

pub fn summary(state: &SyncState) -> StateSummary {
    StateSummary {
        companies: state.directory().companies().len(),
        servers: total_servers(state),
        services: total_services(state),
        connected: connected_services(state).iter().map(|s| s.id).collect(),
        active_tunnels: active_tunnel_count(state),
        favorites: favorite_services(state).len(),
        recents: state.recents().len(),
        prompt: state.credentials().prompt().map(|p| PromptSummary {
            service: p.service,
            phase: p.phase,
            prefilled: p.credential.is_some(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::directory::store::test_helpers::{company, server, service};
    use crate::directory::{Company, ServerId};
    use crate::state::{Action, Store};
    use crate::tunnels::{TunnelHandle, TunnelId, TunnelStatus};

    struct Fixture {
        state: SyncState,
        web: ServiceId,
        db: ServiceId,
        server: ServerId,
    }

    fn fixture() -> Fixture {
        let web = service("example.com", 8080);
        let db = service("db.example.com", 5432);
        let host = server("app", vec![web.clone(), db.clone()]);
        let server_id = host.id;
        let mut state = SyncState::default();
        state
            .dispatch(Action::ReplaceDirectory {
                companies: vec![company("Acme", vec![host])],
            })
            .unwrap();
        Fixture {
            state,
            web: web.id,
            db: db.id,
            server: server_id,
        }
    }

    fn insert_tunnel(state: &mut SyncState, id: &str, hostname: &str, port: u16) {
        let tunnel = Tunnel::from_handle(
            TunnelHandle {
                id: TunnelId::from(id),
                hostname: hostname.to_string(),
                remote_port: Some(port),
                local_port: port,
                pid: Some(4242),
            },
            Utc::now(),
        );
        state.dispatch(Action::InsertTunnel { tunnel }).unwrap();
    }

    #[test]
    fn test_empty_state_views() {
        let state = SyncState::default();
        assert_eq!(active_tunnel_count(&state), 0);
        assert!(!has_servers(&state));
        assert!(favorite_services(&state).is_empty());
        assert!(recent_connections_with_details(&state).is_empty());
        assert!(selected_server(&state).is_none());
    }

    #[test]
    fn test_tunnel_matching_marks_service_connected() {
        let Fixture { mut state, web, db, .. } = fixture();
        insert_tunnel(&mut state, "t-1", "example.com", 8080);

        assert!(matches!(
            connectivity(&state, web),
            Connectivity::Tunneled(t) if t.id.as_str() == "t-1"
        ));
        assert!(!is_service_connected(&state, db));
        assert_eq!(active_tunnel_count(&state), 1);
        assert_eq!(tunnel_for_service(&state, web).map(|t| t.local_port), Some(8080));
    }

    #[test]
    fn test_connected_set_used_without_tunnel_record() {
        let Fixture { mut state, db, .. } = fixture();
        state.dispatch(Action::MarkConnected { service: db }).unwrap();
        assert_eq!(connectivity(&state, db), Connectivity::Connected);
    }

    #[test]
    fn test_inactive_tunnel_record_overrides_connected_set() {
        let Fixture { mut state, web, .. } = fixture();
        insert_tunnel(&mut state, "t-1", "example.com", 8080);
        state
            .dispatch(Action::SetTunnelStatus {
                id: TunnelId::from("t-1"),
                status: TunnelStatus::Error,
            })
            .unwrap();
        state.dispatch(Action::MarkConnected { service: web }).unwrap();

        assert_eq!(connectivity(&state, web), Connectivity::Disconnected);
    }

    #[test]
    fn test_unknown_service_is_disconnected() {
        let Fixture { mut state, .. } = fixture();
        let ghost = ServiceId::new_v4();
        state.dispatch(Action::MarkConnected { service: ghost }).unwrap();
        assert!(!is_service_connected(&state, ghost));
        assert!(connected_services(&state).is_empty());
    }

    #[test]
    fn test_favorites_drop_vanished_services() {
        let Fixture { mut state, web, db, .. } = fixture();
        state.dispatch(Action::ToggleFavorite { service: web }).unwrap();
        state.dispatch(Action::ToggleFavorite { service: db }).unwrap();
        assert_eq!(favorite_services(&state).len(), 2);

        let remaining = service("db.example.com", 5432);
        let tree: Vec<Company> = vec![company(
            "Acme",
            vec![server(
                "app",
                vec![crate::directory::Service { id: db, ..remaining }],
            )],
        )];
        state
            .dispatch(Action::ReplaceDirectory { companies: tree })
            .unwrap();

        let favorites = favorite_services(&state);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].service.id, db);
        assert!(is_favorite(&state, web));
    }

    #[test]
    fn test_recent_details_resolve_lazily() {
        let Fixture {
            mut state,
            web,
            server,
            ..
        } = fixture();
        let entry = RecentConnection::new("web", crate::directory::Protocol::Ssh, web, server);
        state.dispatch(Action::RecordConnection { entry }).unwrap();
        let dangling = RecentConnection::new(
            "gone",
            crate::directory::Protocol::Rdp,
            ServiceId::new_v4(),
            ServerId::new_v4(),
        );
        state
            .dispatch(Action::RecordConnection { entry: dangling })
            .unwrap();

        let details = recent_connections_with_details(&state);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].recent.name, "gone");
        assert!(details[0].service.is_none());
        assert_eq!(details[1].service.map(|s| s.id), Some(web));
        assert_eq!(details[1].server.map(|s| s.id), Some(server));
    }

    #[test]
    fn test_selection_views() {
        let Fixture {
            mut state,
            web,
            server,
            ..
        } = fixture();
        insert_tunnel(&mut state, "t-1", "example.com", 8080);
        state
            .dispatch(Action::SelectServer { id: Some(server) })
            .unwrap();
        state
            .dispatch(Action::SelectService { id: Some(web) })
            .unwrap();

        assert_eq!(selected_server(&state).map(|s| s.id), Some(server));
        assert_eq!(selected_service(&state).map(|s| s.id), Some(web));
        assert_eq!(
            selected_service_tunnel(&state).map(|t| t.id.clone()),
            Some(TunnelId::from("t-1"))
        );
    }

    #[test]
    fn test_summary_counts() {
        let Fixture { mut state, web, .. } = fixture();
        insert_tunnel(&mut state, "t-1", "example.com", 8080);
        state
            .dispatch(Action::RequestCredentials { service: web })
            .unwrap();

        let summary = summary(&state);
        assert_eq!(summary.companies, 1);
        assert_eq!(summary.servers, 1);
        assert_eq!(summary.services, 2);
        assert_eq!(summary.connected, vec![web]);
        assert_eq!(summary.active_tunnels, 1);
        let prompt = summary.prompt.unwrap();
        assert_eq!(prompt.phase, PromptPhase::PromptPending);
        assert!(!prompt.prefilled);
        assert!(has_servers(&state));
    }
}
