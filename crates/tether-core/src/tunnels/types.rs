use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque tunnel identifier assigned by the backend at creation time.
///
/// Never generated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelId(pub String);

impl TunnelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TunnelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TunnelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TunnelStatus {
    Active,
    Inactive,
    Error,
}

impl fmt::Display for TunnelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunnelStatus::Active => write!(f, "active"),
            TunnelStatus::Inactive => write!(f, "inactive"),
            TunnelStatus::Error => write!(f, "error"),
        }
    }
}

/// The backend's reply to `start_tcp_tunnel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TunnelHandle {
    pub id: TunnelId,
    pub hostname: String,
    /// Port on the remote host. Absent when the backend forwards the local
    /// listener to the same port number on the origin.
    #[serde(default)]
    pub remote_port: Option<u16>,
    pub local_port: u16,
    #[serde(default)]
    pub pid: Option<u32>,
}

/// A live tunnel record mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tunnel {
    pub id: TunnelId,
    /// Display name, `hostname:local_port`.
    pub name: String,
    pub hostname: String,
    pub remote_port: u16,
    pub local_port: u16,
    pub pid: Option<u32>,
    pub status: TunnelStatus,
    pub created_at: DateTime<Utc>,
}

impl Tunnel {
    /// Build an active record from a backend handle.
    pub fn from_handle(handle: TunnelHandle, created_at: DateTime<Utc>) -> Self {
        let remote_port = handle.remote_port.unwrap_or(handle.local_port);
        Self {
            name: format!("{}:{}", handle.hostname, handle.local_port),
            id: handle.id,
            hostname: handle.hostname,
            remote_port,
            local_port: handle.local_port,
            pid: handle.pid,
            status: TunnelStatus::Active,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TunnelStatus::Active
    }

    /// Whether this tunnel targets the given remote endpoint.
    pub fn targets(&self, hostname: &str, remote_port: u16) -> bool {
        self.remote_port == remote_port && self.hostname.eq_ignore_ascii_case(hostname)
    }
}
