//! The backend command surface and push-event subscription.
//!
//! The tunneling daemon owns the real tunnel lifecycle. This module only
//! describes how the client talks to it:
//!
//! - [`Backend`]: request/response commands. Each call may fail with a
//!   [`BackendError`] and is never retried here.
//! - [`EventSource`]: the two push-event streams plus the readiness signal.
//!   Subscriptions tear themselves down on drop.
//! - [`LocalBus`]: an in-memory [`EventSource`] used by the CLI replay and
//!   tests.

pub mod errors;
pub mod events;
pub mod local;

use std::future::Future;

pub use errors::BackendError;
pub use events::{Disposer, EventSource, Subscription};
pub use local::LocalBus;

use crate::credentials::Credential;
use crate::directory::{NewService, ServerId, ServiceId, ServicePatch};
use crate::tunnels::{TunnelHandle, TunnelId};

/// Commands accepted by the tunneling daemon.
///
/// Directory and connection commands report their effects through the push
/// streams as well; callers still get the direct result so they can roll back
/// optimistic state keyed by the ids they passed in.
pub trait Backend: Send + Sync + 'static {
    fn add_server(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> impl Future<Output = Result<ServerId, BackendError>> + Send;

    fn update_server(
        &self,
        id: ServerId,
        name: &str,
        description: Option<&str>,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn delete_server(&self, id: ServerId) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn add_service(
        &self,
        server_id: ServerId,
        service: NewService,
    ) -> impl Future<Output = Result<ServiceId, BackendError>> + Send;

    fn delete_service(
        &self,
        service_id: ServiceId,
        server_id: ServerId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn update_service(
        &self,
        server_id: ServerId,
        service_id: ServiceId,
        patch: ServicePatch,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Ask the daemon to connect. Success means the request was accepted; the
    /// daemon follows up with `Connected` or `PromptCredentials`.
    fn connect_service(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn disconnect_service(
        &self,
        service_id: ServiceId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn start_tcp_tunnel(
        &self,
        hostname: &str,
        local_port: u16,
    ) -> impl Future<Output = Result<TunnelHandle, BackendError>> + Send;

    fn stop_tcp_tunnel(&self, id: &TunnelId)
    -> impl Future<Output = Result<(), BackendError>> + Send;

    fn save_service_credential(
        &self,
        service_id: ServiceId,
        credential: &Credential,
        remember: bool,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
