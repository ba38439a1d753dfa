//! Scripted backend for client tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::{Notify, Semaphore};

use crate::backend::{Backend, BackendError};
use crate::credentials::Credential;
use crate::directory::{NewService, ServerId, ServiceId, ServicePatch};
use crate::tunnels::{TunnelHandle, TunnelId};

pub(crate) enum Reply {
    Ok,
    Server(ServerId),
    Service(ServiceId),
    Tunnel(TunnelHandle),
    Fail(BackendError),
}

/// Suspends one backend call until released.
pub(crate) struct Gate {
    entered: Notify,
    release: Semaphore,
}

impl Gate {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    pub(crate) async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn release(&self) {
        self.release.add_permits(1);
    }
}

/// Backend whose replies are queued per command.
///
/// With nothing queued, commands succeed: ids are freshly generated and
/// tunnels echo the requested host and port.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    replies: Mutex<HashMap<&'static str, VecDeque<Reply>>>,
    gates: Mutex<HashMap<&'static str, Arc<Gate>>>,
    calls: Mutex<Vec<&'static str>>,
    next_tunnel: Mutex<u32>,
}

impl ScriptedBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, command: &'static str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(command)
            .or_default()
            .push_back(reply);
    }

    pub(crate) fn fail(&self, command: &'static str, message: &str) {
        self.push(command, Reply::Fail(BackendError::rejected(command, message)));
    }

    /// Suspend the next call to `command` until the returned gate is released.
    pub(crate) fn gate(&self, command: &'static str) -> Arc<Gate> {
        let gate = Arc::new(Gate::new());
        self.gates.lock().unwrap().insert(command, Arc::clone(&gate));
        gate
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, command: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == command).count()
    }

    async fn enter(&self, command: &'static str) -> Option<Reply> {
        self.calls.lock().unwrap().push(command);
        let gate = self.gates.lock().unwrap().remove(command);
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.acquire().await.unwrap().forget();
        }
        self.replies
            .lock()
            .unwrap()
            .get_mut(command)
            .and_then(VecDeque::pop_front)
    }

    async fn unit(&self, command: &'static str) -> Result<(), BackendError> {
        match self.enter(command).await {
            None | Some(Reply::Ok) => Ok(()),
            Some(Reply::Fail(e)) => Err(e),
            Some(_) => Err(BackendError::Protocol {
                message: format!("unexpected reply for {command}"),
            }),
        }
    }
}

impl Backend for ScriptedBackend {
    async fn add_server(
        &self,
        _name: &str,
        _description: Option<&str>,
    ) -> Result<ServerId, BackendError> {
        match self.enter("add_server").await {
            None | Some(Reply::Ok) => Ok(ServerId::new_v4()),
            Some(Reply::Server(id)) => Ok(id),
            Some(Reply::Fail(e)) => Err(e),
            Some(_) => Err(BackendError::Protocol {
                message: "unexpected reply for add_server".to_string(),
            }),
        }
    }

    async fn update_server(
        &self,
        _id: ServerId,
        _name: &str,
        _description: Option<&str>,
    ) -> Result<(), BackendError> {
        self.unit("update_server").await
    }

    async fn delete_server(&self, _id: ServerId) -> Result<(), BackendError> {
        self.unit("delete_server").await
    }

    async fn add_service(
        &self,
        _server_id: ServerId,
        _service: NewService,
    ) -> Result<ServiceId, BackendError> {
        match self.enter("add_service").await {
            None | Some(Reply::Ok) => Ok(ServiceId::new_v4()),
            Some(Reply::Service(id)) => Ok(id),
            Some(Reply::Fail(e)) => Err(e),
            Some(_) => Err(BackendError::Protocol {
                message: "unexpected reply for add_service".to_string(),
            }),
        }
    }

    async fn delete_service(
        &self,
        _service_id: ServiceId,
        _server_id: ServerId,
    ) -> Result<(), BackendError> {
        self.unit("delete_service").await
    }

    async fn update_service(
        &self,
        _server_id: ServerId,
        _service_id: ServiceId,
        _patch: ServicePatch,
    ) -> Result<(), BackendError> {
        self.unit("update_service").await
    }

    async fn connect_service(&self, _service_id: ServiceId) -> Result<(), BackendError> {
        self.unit("connect_service").await
    }

    async fn disconnect_service(&self, _service_id: ServiceId) -> Result<(), BackendError> {
        self.unit("disconnect_service").await
    }

    async fn start_tcp_tunnel(
        &self,
        hostname: &str,
        local_port: u16,
    ) -> Result<TunnelHandle, BackendError> {
        match self.enter("start_tcp_tunnel").await {
            None | Some(Reply::Ok) => {
                let n = {
                    let mut next = self.next_tunnel.lock().unwrap();
                    *next += 1;
                    *next
                };
                Ok(TunnelHandle {
                    id: TunnelId(format!("tunnel-{n}")),
                    hostname: hostname.to_string(),
                    remote_port: None,
                    local_port,
                    pid: Some(1000 + n),
                })
            }
            Some(Reply::Tunnel(handle)) => Ok(handle),
            Some(Reply::Fail(e)) => Err(e),
            Some(_) => Err(BackendError::Protocol {
                message: "unexpected reply for start_tcp_tunnel".to_string(),
            }),
        }
    }

    async fn stop_tcp_tunnel(&self, _id: &TunnelId) -> Result<(), BackendError> {
        self.unit("stop_tcp_tunnel").await
    }

    async fn save_service_credential(
        &self,
        _service_id: ServiceId,
        _credential: &Credential,
        _remember: bool,
    ) -> Result<(), BackendError> {
        self.unit("save_service_credential").await
    }
}
