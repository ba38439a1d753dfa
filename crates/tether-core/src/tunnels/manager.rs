use tracing::warn;

use super::errors::TunnelError;
use super::types::{Tunnel, TunnelId, TunnelStatus};

/// Collection of tunnel records.
///
/// Key invariant: at most one `Active` record exists per
/// (hostname, remote port). Records are only ever inserted from a successful
/// backend reply and only removed after the backend confirmed the stop.
#[derive(Debug, Clone, Default)]
pub struct TunnelRegistry {
    tunnels: Vec<Tunnel>,
}

impl TunnelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tunnel the backend has started.
    ///
    /// A record with the same id is replaced. If another active record
    /// targets the same endpoint (two starts raced), that older record is
    /// demoted to `Inactive` and its id returned.
    pub fn insert(&mut self, tunnel: Tunnel) -> Option<TunnelId> {
        self.tunnels.retain(|t| t.id != tunnel.id);

        let mut demoted = None;
        if tunnel.is_active()
            && let Some(existing) = self
                .tunnels
                .iter_mut()
                .find(|t| t.is_active() && t.targets(&tunnel.hostname, tunnel.remote_port))
        {
            warn!(
                event = "core.tunnel.duplicate_active_demoted",
                demoted_id = %existing.id,
                new_id = %tunnel.id,
                hostname = %tunnel.hostname,
                remote_port = tunnel.remote_port,
            );
            existing.status = TunnelStatus::Inactive;
            demoted = Some(existing.id.clone());
        }

        self.tunnels.push(tunnel);
        demoted
    }

    /// Remove a record whose stop the backend confirmed.
    pub fn remove(&mut self, id: &TunnelId) -> Option<Tunnel> {
        let index = self.tunnels.iter().position(|t| &t.id == id)?;
        Some(self.tunnels.remove(index))
    }

    /// Update the lifecycle status of a record.
    ///
    /// # Errors
    /// Returns `TunnelError::NotFound` if no record has the id.
    pub fn set_status(&mut self, id: &TunnelId, status: TunnelStatus) -> Result<(), TunnelError> {
        if status == TunnelStatus::Active
            && let Some(target) = self.get(id)
            && let Some(other) = self.find_active(&target.hostname, target.remote_port)
            && &other.id != id
        {
            return Err(TunnelError::AlreadyActive {
                hostname: target.hostname.clone(),
                port: target.remote_port,
            });
        }

        let tunnel = self
            .tunnels
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TunnelError::NotFound { id: id.clone() })?;
        tunnel.status = status;
        Ok(())
    }

    pub fn get(&self, id: &TunnelId) -> Option<&Tunnel> {
        self.tunnels.iter().find(|t| &t.id == id)
    }

    /// Find the active tunnel targeting a remote endpoint.
    pub fn find_active(&self, hostname: &str, remote_port: u16) -> Option<&Tunnel> {
        self.tunnels
            .iter()
            .find(|t| t.is_active() && t.targets(hostname, remote_port))
    }

    /// Find the active tunnel already listening on a local port for a host.
    pub fn find_active_local(&self, hostname: &str, local_port: u16) -> Option<&Tunnel> {
        self.tunnels.iter().find(|t| {
            t.is_active()
                && t.local_port == local_port
                && t.hostname.eq_ignore_ascii_case(hostname)
        })
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tunnel> {
        self.tunnels.iter()
    }

    pub fn ids(&self) -> Vec<TunnelId> {
        self.tunnels.iter().map(|t| t.id.clone()).collect()
    }

    pub fn active_count(&self) -> usize {
        self.tunnels.iter().filter(|t| t.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.tunnels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunnels.is_empty()
    }
}
