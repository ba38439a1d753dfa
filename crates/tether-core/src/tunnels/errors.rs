use crate::backend::BackendError;
use crate::errors::TetherError;
use crate::tunnels::types::TunnelId;

#[derive(Debug, thiserror::Error)]
pub enum TunnelError {
    #[error("An active tunnel to {hostname}:{port} already exists")]
    AlreadyActive { hostname: String, port: u16 },

    #[error("Tunnel '{id}' not found")]
    NotFound { id: TunnelId },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TetherError for TunnelError {
    fn error_code(&self) -> &'static str {
        match self {
            TunnelError::AlreadyActive { .. } => "TUNNEL_ALREADY_ACTIVE",
            TunnelError::NotFound { .. } => "TUNNEL_NOT_FOUND",
            TunnelError::Backend(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            TunnelError::AlreadyActive { .. } | TunnelError::NotFound { .. } => true,
            TunnelError::Backend(e) => e.is_user_error(),
        }
    }
}

/// Failures collected while stopping every tunnel.
///
/// Tunnels listed here were left in place.
#[derive(Debug, thiserror::Error)]
#[error("Failed to stop {} tunnel(s)", failures.len())]
pub struct StopAllError {
    pub failures: Vec<(TunnelId, TunnelError)>,
}

impl TetherError for StopAllError {
    fn error_code(&self) -> &'static str {
        "TUNNEL_STOP_ALL_FAILED"
    }
}
