use serde::{Deserialize, Serialize};

use crate::backend::BackendError;
use crate::credentials::Credential;
use crate::directory::{Company, CompanyId, ServiceId};

/// Events on the directory stream.
///
/// Externally tagged, matching the daemon's JSON: `"Empty"`,
/// `{"Updated": [...]}`, `{"Expanded": [...]}`,
/// `{"ServiceCredential": {"service": ..., "remember": ..., "credential": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryEvent {
    /// The directory is empty.
    Empty,
    /// Full directory snapshot.
    Updated(Vec<Company>),
    /// Expanded company ids.
    Expanded(Vec<CompanyId>),
    /// A credential to show for a service. `None` asks for re-entry.
    ServiceCredential {
        service: ServiceId,
        remember: bool,
        #[serde(default)]
        credential: Option<Credential>,
    },
}

/// Events on the remote (connection) stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteEvent {
    /// Full set of connected services.
    ConnectedServices(Vec<ServiceId>),
    Connected(ServiceId),
    Disconnected(ServiceId),
    /// The daemon needs credentials before it can connect the service.
    PromptCredentials(ServiceId),
}

/// An event from either stream, as recorded in replay logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushEvent {
    Directory(DirectoryEvent),
    Remote(RemoteEvent),
}

impl PushEvent {
    /// Parse one JSON-encoded event.
    pub fn from_json(line: &str) -> Result<Self, BackendError> {
        serde_json::from_str(line).map_err(|e| BackendError::Protocol {
            message: e.to_string(),
        })
    }

    pub fn stream(&self) -> &'static str {
        match self {
            PushEvent::Directory(_) => "directory",
            PushEvent::Remote(_) => "remote",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PushEvent::Directory(DirectoryEvent::Empty) => "empty",
            PushEvent::Directory(DirectoryEvent::Updated(_)) => "updated",
            PushEvent::Directory(DirectoryEvent::Expanded(_)) => "expanded",
            PushEvent::Directory(DirectoryEvent::ServiceCredential { .. }) => "service_credential",
            PushEvent::Remote(RemoteEvent::ConnectedServices(_)) => "connected_services",
            PushEvent::Remote(RemoteEvent::Connected(_)) => "connected",
            PushEvent::Remote(RemoteEvent::Disconnected(_)) => "disconnected",
            PushEvent::Remote(RemoteEvent::PromptCredentials(_)) => "prompt_credentials",
        }
    }
}
