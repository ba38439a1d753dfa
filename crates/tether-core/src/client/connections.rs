use tracing::{error, info};

use super::{Client, ClientError};
use crate::backend::Backend;
use crate::connections::ConnectionError;
use crate::directory::ServiceId;
use crate::history::RecentConnection;
use crate::state::{Action, Change};

impl<B: Backend> Client<B> {
    /// Connect a service through the daemon.
    ///
    /// The service shows as connected immediately. If the request fails the
    /// optimistic entry is rolled back, unless the remote stream has reported
    /// on connections in the meantime.
    pub async fn connect_service(&self, service_id: ServiceId) -> Result<(), ClientError> {
        info!(event = "core.connection.connect_started", service_id = %service_id);

        let target = self.store.read(|s| {
            let directory = s.directory();
            let service = directory.service(service_id)?;
            let server = directory.server_of_service(service_id)?;
            Some((service.clone(), server.name.clone(), server.id))
        });
        let Some((service, server_name, server_id)) = target else {
            return Err(ConnectionError::ServiceNotFound { id: service_id }.into());
        };

        let changes = self.store.dispatch(Action::ConnectOptimistic {
            service: service_id,
        })?;
        let token = changes.into_iter().find_map(|change| match change {
            Change::ConnectedOptimistically { token } => Some(token),
            _ => None,
        });

        if let Err(e) = self.backend.connect_service(service_id).await {
            error!(
                event = "core.connection.connect_failed",
                service_id = %service_id,
                error = %e,
            );
            if let Some(token) = token {
                self.store.dispatch(Action::RollbackConnect { token })?;
            }
            return Err(ConnectionError::from(e).into());
        }

        let entry = RecentConnection::new(server_name, service.protocol, service_id, server_id);
        self.store.dispatch(Action::RecordConnection { entry })?;

        info!(event = "core.connection.connect_completed", service_id = %service_id);
        Ok(())
    }

    /// Disconnect a service through the daemon.
    ///
    /// A failed request is not undone locally; the daemon's next report on
    /// the remote stream restores the true state.
    pub async fn disconnect_service(&self, service_id: ServiceId) -> Result<(), ClientError> {
        info!(event = "core.connection.disconnect_started", service_id = %service_id);

        self.store.dispatch(Action::DisconnectOptimistic {
            service: service_id,
        })?;

        if let Err(e) = self.backend.disconnect_service(service_id).await {
            error!(
                event = "core.connection.disconnect_failed",
                service_id = %service_id,
                error = %e,
            );
            return Err(ConnectionError::from(e).into());
        }

        info!(event = "core.connection.disconnect_completed", service_id = %service_id);
        Ok(())
    }
}
