use tracing::{error, info};

use super::{Client, ClientError};
use crate::backend::Backend;
use crate::directory::{
    DirectoryError, DirectoryNode, NewService, ServerId, ServiceId, ServicePatch,
};
use crate::state::Action;

impl<B: Backend> Client<B> {
    /// Create a server. It appears once the directory stream reports it.
    pub async fn add_server(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<ServerId, ClientError> {
        info!(event = "core.directory.add_server_started", name = name);
        let id = self
            .backend
            .add_server(name, description)
            .await
            .map_err(|e| {
                error!(event = "core.directory.add_server_failed", name = name, error = %e);
                DirectoryError::from(e)
            })?;
        info!(event = "core.directory.add_server_completed", server_id = %id);
        Ok(id)
    }

    pub async fn update_server(
        &self,
        id: ServerId,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), ClientError> {
        self.require_server(id)?;
        self.backend
            .update_server(id, name, description)
            .await
            .map_err(|e| {
                error!(event = "core.directory.update_server_failed", server_id = %id, error = %e);
                DirectoryError::from(e)
            })?;
        info!(event = "core.directory.update_server_completed", server_id = %id);
        Ok(())
    }

    /// Delete a server. It is hidden while the request is in flight and
    /// restored if the request fails.
    pub async fn delete_server(&self, id: ServerId) -> Result<(), ClientError> {
        info!(event = "core.directory.delete_server_started", server_id = %id);
        self.require_server(id)?;

        let node = DirectoryNode::Server(id);
        self.store.dispatch(Action::HideNode { node })?;

        if let Err(e) = self.backend.delete_server(id).await {
            error!(event = "core.directory.delete_server_failed", server_id = %id, error = %e);
            self.store.dispatch(Action::UnhideNode { node })?;
            return Err(DirectoryError::from(e).into());
        }

        if self.store.read(|s| s.directory().selected_server_id() == Some(id)) {
            self.store.dispatch(Action::SelectServer { id: None })?;
        }
        info!(event = "core.directory.delete_server_completed", server_id = %id);
        Ok(())
    }

    pub async fn add_service(
        &self,
        server_id: ServerId,
        service: NewService,
    ) -> Result<ServiceId, ClientError> {
        self.require_server(server_id)?;
        info!(
            event = "core.directory.add_service_started",
            server_id = %server_id,
            protocol = %service.protocol,
            host = %service.host,
            port = service.port,
        );
        let id = self
            .backend
            .add_service(server_id, service)
            .await
            .map_err(|e| {
                error!(
                    event = "core.directory.add_service_failed",
                    server_id = %server_id,
                    error = %e
                );
                DirectoryError::from(e)
            })?;
        info!(event = "core.directory.add_service_completed", service_id = %id);
        Ok(id)
    }

    /// Delete a service. Hidden while in flight, restored on failure.
    pub async fn delete_service(&self, service_id: ServiceId) -> Result<(), ClientError> {
        info!(event = "core.directory.delete_service_started", service_id = %service_id);
        let server_id = self.require_owner(service_id)?;

        let node = DirectoryNode::Service(service_id);
        self.store.dispatch(Action::HideNode { node })?;

        if let Err(e) = self.backend.delete_service(service_id, server_id).await {
            error!(
                event = "core.directory.delete_service_failed",
                service_id = %service_id,
                error = %e,
            );
            self.store.dispatch(Action::UnhideNode { node })?;
            return Err(DirectoryError::from(e).into());
        }

        if self.store.read(|s| s.directory().selected_service_id() == Some(service_id)) {
            self.store.dispatch(Action::SelectService { id: None })?;
        }
        info!(event = "core.directory.delete_service_completed", service_id = %service_id);
        Ok(())
    }

    /// Apply a partial update. An empty patch sends nothing.
    pub async fn update_service(
        &self,
        service_id: ServiceId,
        patch: ServicePatch,
    ) -> Result<(), ClientError> {
        let server_id = self.require_owner(service_id)?;
        if patch.is_empty() {
            return Ok(());
        }
        self.backend
            .update_service(server_id, service_id, patch)
            .await
            .map_err(|e| {
                error!(
                    event = "core.directory.update_service_failed",
                    service_id = %service_id,
                    error = %e,
                );
                DirectoryError::from(e)
            })?;
        info!(event = "core.directory.update_service_completed", service_id = %service_id);
        Ok(())
    }

    fn require_server(&self, id: ServerId) -> Result<(), DirectoryError> {
        if self.store.read(|s| s.directory().server(id).is_some()) {
            Ok(())
        } else {
            Err(DirectoryError::ServerNotFound { id })
        }
    }

    fn require_owner(&self, service_id: ServiceId) -> Result<ServerId, DirectoryError> {
        self.store
            .read(|s| s.directory().server_of_service(service_id).map(|server| server.id))
            .ok_or(DirectoryError::ServiceNotFound { id: service_id })
    }
}
