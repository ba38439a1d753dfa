use std::collections::HashSet;

use tracing::debug;

use super::types::{Company, CompanyId, Server, ServerId, Service, ServiceId};

/// A directory node that can be hidden while its deletion is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryNode {
    Server(ServerId),
    Service(ServiceId),
}

/// Holds the company → server → service tree plus display state.
///
/// Key invariants:
/// - `snapshot` is exactly what the backend last reported; it is never merged.
/// - `visible` is `snapshot` minus every tombstoned node, rebuilt on each change.
/// - A tombstone survives directory replacements until a snapshot arrives
///   that no longer contains the node, so an in-flight delete is never
///   resurrected by a stale snapshot.
#[derive(Debug, Clone, Default)]
pub struct DirectoryStore {
    snapshot: Vec<Company>,
    visible: Vec<Company>,
    tombstones: HashSet<DirectoryNode>,
    expanded: Vec<CompanyId>,
    selected_server: Option<ServerId>,
    selected_service: Option<ServiceId>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole tree with a backend snapshot.
    pub fn replace_directory(&mut self, companies: Vec<Company>) {
        self.snapshot = companies;

        let before = self.tombstones.len();
        let snapshot = &self.snapshot;
        self.tombstones.retain(|node| contains_node(snapshot, *node));
        if self.tombstones.len() != before {
            debug!(
                event = "core.directory.tombstones_pruned",
                pruned = before - self.tombstones.len(),
            );
        }

        self.rebuild();
    }

    /// Drop the whole tree (the backend reported an empty directory).
    pub fn clear_directory(&mut self) {
        self.replace_directory(Vec::new());
    }

    pub fn set_expanded(&mut self, company_ids: Vec<CompanyId>) {
        self.expanded = company_ids;
    }

    /// Select a server. Selecting a different server clears the service selection.
    pub fn select_server(&mut self, id: Option<ServerId>) {
        if id != self.selected_server {
            self.selected_service = None;
        }
        self.selected_server = id;
    }

    pub fn select_service(&mut self, id: Option<ServiceId>) {
        self.selected_service = id;
    }

    /// Hide a node while its deletion is awaiting acknowledgment.
    ///
    /// Returns `false` if the node was already hidden.
    pub fn hide(&mut self, node: DirectoryNode) -> bool {
        let inserted = self.tombstones.insert(node);
        if inserted {
            self.rebuild();
        }
        inserted
    }

    /// Make a hidden node visible again (its deletion failed).
    ///
    /// Returns `false` if the node was not hidden.
    pub fn unhide(&mut self, node: DirectoryNode) -> bool {
        let removed = self.tombstones.remove(&node);
        if removed {
            self.rebuild();
        }
        removed
    }

    pub fn is_hidden(&self, node: DirectoryNode) -> bool {
        self.tombstones.contains(&node)
    }

    /// The visible tree (tombstoned nodes removed).
    pub fn companies(&self) -> &[Company] {
        &self.visible
    }

    /// Iterate over all visible servers.
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.visible.iter().flat_map(|c| c.servers.iter())
    }

    /// Iterate over all visible services.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.servers().flat_map(|s| s.services.iter())
    }

    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.servers().find(|s| s.id == id)
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services().find(|s| s.id == id)
    }

    /// Find the server that owns a service.
    pub fn server_of_service(&self, id: ServiceId) -> Option<&Server> {
        self.servers()
            .find(|server| server.services.iter().any(|s| s.id == id))
    }

    pub fn expanded(&self) -> &[CompanyId] {
        &self.expanded
    }

    pub fn is_expanded(&self, id: CompanyId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn selected_server_id(&self) -> Option<ServerId> {
        self.selected_server
    }

    pub fn selected_service_id(&self) -> Option<ServiceId> {
        self.selected_service
    }

    fn rebuild(&mut self) {
        let tombstones = &self.tombstones;
        self.visible = self
            .snapshot
            .iter()
            .map(|company| Company {
                id: company.id,
                name: company.name.clone(),
                servers: company
                    .servers
                    .iter()
                    .filter(|server| !tombstones.contains(&DirectoryNode::Server(server.id)))
                    .map(|server| Server {
                        id: server.id,
                        name: server.name.clone(),
                        description: server.description.clone(),
                        services: server
                            .services
                            .iter()
                            .filter(|s| !tombstones.contains(&DirectoryNode::Service(s.id)))
                            .cloned()
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
    }
}

fn contains_node(companies: &[Company], node: DirectoryNode) -> bool {
    let mut servers = companies.iter().flat_map(|c| c.servers.iter());
    match node {
        DirectoryNode::Server(id) => servers.any(|s| s.id == id),
        DirectoryNode::Service(id) => servers.any(|s| s.services.iter().any(|svc| svc.id == id)),
    }
}


#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    fn sample() -> (Vec<Company>, ServerId, ServiceId) {
        let ssh = service("bastion.acme.internal", 22);
        let service_id = ssh.id;
        let bastion = server("bastion", vec![ssh, service("bastion.acme.internal", 3389)]);
        let server_id = bastion.id;
        let companies = vec![company(
            "Acme",
            vec![bastion, server("db", vec![service("db.acme.internal", 5432)])],
        )];
        (companies, server_id, service_id)
    }

    #[test]
    fn test_replace_directory_replaces_everything() {
        let mut store = DirectoryStore::new();
        let (companies, server_id, _) = sample();
        store.replace_directory(companies);
        assert_eq!(store.servers().count(), 2);
        assert!(store.server(server_id).is_some());

        let (other, _, _) = sample();
        store.replace_directory(other);
        assert!(store.server(server_id).is_none());
        assert_eq!(store.services().count(), 3);
    }

    #[test]
    fn test_clear_directory_empties_tree() {
        let mut store = DirectoryStore::new();
        store.replace_directory(sample().0);
        store.clear_directory();
        assert!(store.companies().is_empty());
        assert_eq!(store.services().count(), 0);
    }

    #[test]
    fn test_select_different_server_clears_service() {
        let mut store = DirectoryStore::new();
        let (companies, server_id, service_id) = sample();
        store.replace_directory(companies);

        store.select_server(Some(server_id));
        store.select_service(Some(service_id));
        assert_eq!(store.selected_service_id(), Some(service_id));

        store.select_server(Some(ServerId::new_v4()));
        assert_eq!(store.selected_service_id(), None);
    }

    #[test]
    fn test_reselect_same_server_keeps_service() {
        let mut store = DirectoryStore::new();
        let (companies, server_id, service_id) = sample();
        store.replace_directory(companies);

        store.select_server(Some(server_id));
        store.select_service(Some(service_id));
        store.select_server(Some(server_id));
        assert_eq!(store.selected_service_id(), Some(service_id));
    }

    #[test]
    fn test_deselect_server_clears_service() {
        let mut store = DirectoryStore::new();
        let (_, server_id, service_id) = sample();
        store.select_server(Some(server_id));
        store.select_service(Some(service_id));
        store.select_server(None);
        assert_eq!(store.selected_server_id(), None);
        assert_eq!(store.selected_service_id(), None);
    }

    #[test]
    fn test_server_of_service() {
        let mut store = DirectoryStore::new();
        let (companies, server_id, service_id) = sample();
        store.replace_directory(companies);
        assert_eq!(store.server_of_service(service_id).map(|s| s.id), Some(server_id));
        assert!(store.server_of_service(ServiceId::new_v4()).is_none());
    }

    #[test]
    fn test_hidden_server_survives_stale_snapshot() {
        let mut store = DirectoryStore::new();
        let (companies, server_id, service_id) = sample();
        store.replace_directory(companies.clone());

        assert!(store.hide(DirectoryNode::Server(server_id)));
        assert!(store.server(server_id).is_none());
        assert!(store.service(service_id).is_none());

        // A snapshot taken before the delete landed still lists the server.
        store.replace_directory(companies);
        assert!(store.server(server_id).is_none());
        assert!(store.is_hidden(DirectoryNode::Server(server_id)));
    }

    #[test]
    fn test_tombstone_pruned_once_snapshot_drops_node() {
        let mut store = DirectoryStore::new();
        let (mut companies, server_id, _) = sample();
        store.replace_directory(companies.clone());
        store.hide(DirectoryNode::Server(server_id));

        companies[0].servers.retain(|s| s.id != server_id);
        store.replace_directory(companies);
        assert!(!store.is_hidden(DirectoryNode::Server(server_id)));
    }

    #[test]
    fn test_unhide_restores_node() {
        let mut store = DirectoryStore::new();
        let (companies, _, service_id) = sample();
        store.replace_directory(companies);

        store.hide(DirectoryNode::Service(service_id));
        assert!(store.service(service_id).is_none());
        assert!(store.unhide(DirectoryNode::Service(service_id)));
        assert!(store.service(service_id).is_some());
        assert!(!store.unhide(DirectoryNode::Service(service_id)));
    }

    #[test]
    fn test_set_expanded() {
        let mut store = DirectoryStore::new();
        let (companies, _, _) = sample();
        let company_id = companies[0].id;
        store.replace_directory(companies);

        store.set_expanded(vec![company_id]);
        assert!(store.is_expanded(company_id));
        store.set_expanded(Vec::new());
        assert!(!store.is_expanded(company_id));
    }
}
