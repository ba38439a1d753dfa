use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::{Client, ClientError};
use crate::backend::Backend;
use crate::directory::{DirectoryError, ServiceId};
use crate::history::RecentConnection;
use crate::state::Action;
use crate::tunnels::{StopAllError, Tunnel, TunnelError, TunnelId};

impl<B: Backend> Client<B> {
    /// Start a TCP tunnel to `hostname:local_port`.
    ///
    /// Rejected up front when an active tunnel for the host already listens
    /// on `local_port`. The record is inserted only after the backend assigns
    /// an id.
    pub async fn start_tunnel(
        &self,
        hostname: &str,
        local_port: u16,
    ) -> Result<Tunnel, ClientError> {
        info!(
            event = "core.tunnel.start_started",
            hostname = hostname,
            local_port = local_port,
        );

        let existing = self.store.read(|s| {
            s.tunnels()
                .find_active_local(hostname, local_port)
                .map(|t| t.id.clone())
        });
        if let Some(existing) = existing {
            warn!(
                event = "core.tunnel.start_rejected",
                hostname = hostname,
                local_port = local_port,
                existing = %existing,
            );
            return Err(TunnelError::AlreadyActive {
                hostname: hostname.to_string(),
                port: local_port,
            }
            .into());
        }

        let handle = match self.backend.start_tcp_tunnel(hostname, local_port).await {
            Ok(handle) => handle,
            Err(e) => {
                error!(
                    event = "core.tunnel.start_failed",
                    hostname = hostname,
                    local_port = local_port,
                    error = %e,
                );
                return Err(TunnelError::from(e).into());
            }
        };

        let tunnel = Tunnel::from_handle(handle, Utc::now());
        self.store.dispatch(Action::InsertTunnel {
            tunnel: tunnel.clone(),
        })?;

        info!(
            event = "core.tunnel.start_completed",
            tunnel_id = %tunnel.id,
            hostname = %tunnel.hostname,
            remote_port = tunnel.remote_port,
            local_port = tunnel.local_port,
        );
        Ok(tunnel)
    }

    /// Start a tunnel to a directory service and record it in history.
    pub async fn open_service_tunnel(&self, service_id: ServiceId) -> Result<Tunnel, ClientError> {
        let target = self.store.read(|s| {
            let directory = s.directory();
            let service = directory.service(service_id)?;
            let server = directory.server_of_service(service_id)?;
            Some((service.clone(), server.id))
        });
        let Some((service, server_id)) = target else {
            return Err(DirectoryError::ServiceNotFound { id: service_id }.into());
        };

        let existing = self.store.read(|s| {
            s.tunnels()
                .find_active(&service.host, service.port)
                .map(|t| t.id.clone())
        });
        if let Some(existing) = existing {
            warn!(
                event = "core.tunnel.start_rejected",
                service_id = %service_id,
                existing = %existing,
            );
            return Err(TunnelError::AlreadyActive {
                hostname: service.host,
                port: service.port,
            }
            .into());
        }

        let tunnel = self.start_tunnel(&service.host, service.port).await?;

        let entry = RecentConnection::new(
            format!("{}:{}", service.host, service.port),
            service.protocol,
            service.id,
            server_id,
        );
        self.store.dispatch(Action::RecordConnection { entry })?;
        Ok(tunnel)
    }

    /// Stop a tunnel. On failure the record is left untouched.
    pub async fn stop_tunnel(&self, id: &TunnelId) -> Result<(), ClientError> {
        Ok(self.stop_one(id).await?)
    }

    /// Stop every tunnel in turn. Returns how many were stopped.
    ///
    /// Failures do not short-circuit; tunnels that failed to stop remain.
    pub async fn stop_all_tunnels(&self) -> Result<usize, StopAllError> {
        let ids = self.store.read(|s| s.tunnels().ids());
        info!(event = "core.tunnel.stop_all_started", count = ids.len());

        let mut stopped = 0;
        let mut failures = Vec::new();
        for id in ids {
            match self.stop_one(&id).await {
                Ok(()) => stopped += 1,
                Err(e) => failures.push((id, e)),
            }
        }

        if failures.is_empty() {
            info!(event = "core.tunnel.stop_all_completed", stopped = stopped);
            Ok(stopped)
        } else {
            error!(
                event = "core.tunnel.stop_all_failed",
                stopped = stopped,
                failed = failures.len(),
            );
            Err(StopAllError { failures })
        }
    }

    async fn stop_one(&self, id: &TunnelId) -> Result<(), TunnelError> {
        info!(event = "core.tunnel.stop_started", tunnel_id = %id);

        if self.store.read(|s| s.tunnels().get(id).is_none()) {
            return Err(TunnelError::NotFound { id: id.clone() });
        }

        if let Err(e) = self.backend.stop_tcp_tunnel(id).await {
            error!(event = "core.tunnel.stop_failed", tunnel_id = %id, error = %e);
            return Err(e.into());
        }

        // Another stop may have removed it while the request was in flight.
        if let Err(e) = self.store.dispatch(Action::RemoveTunnel { id: id.clone() }) {
            debug!(event = "core.tunnel.stop_already_removed", tunnel_id = %id, error = %e);
        }

        info!(event = "core.tunnel.stop_completed", tunnel_id = %id);
        Ok(())
    }
}
