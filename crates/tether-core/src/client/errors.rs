use crate::connections::ConnectionError;
use crate::credentials::CredentialError;
use crate::directory::DirectoryError;
use crate::errors::TetherError;
use crate::state::DispatchError;
use crate::tunnels::{StopAllError, TunnelError};

/// Failures from the async action layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Tunnel(#[from] TunnelError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    StopAll(#[from] StopAllError),
}

impl From<DispatchError> for ClientError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Tunnel(e) => ClientError::Tunnel(e),
            DispatchError::Credential(e) => ClientError::Credential(e),
        }
    }
}

impl TetherError for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            ClientError::Directory(e) => e.error_code(),
            ClientError::Connection(e) => e.error_code(),
            ClientError::Tunnel(e) => e.error_code(),
            ClientError::Credential(e) => e.error_code(),
            ClientError::StopAll(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ClientError::Directory(e) => e.is_user_error(),
            ClientError::Connection(e) => e.is_user_error(),
            ClientError::Tunnel(e) => e.is_user_error(),
            ClientError::Credential(e) => e.is_user_error(),
            ClientError::StopAll(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tunnels::TunnelId;

    #[test]
    fn test_dispatch_error_is_flattened() {
        let error = ClientError::from(DispatchError::Tunnel(TunnelError::NotFound {
            id: TunnelId::from("t-9"),
        }));
        assert!(matches!(
            error,
            ClientError::Tunnel(TunnelError::NotFound { .. })
        ));
        assert_eq!(error.error_code(), "TUNNEL_NOT_FOUND");
    }

    #[test]
    fn test_stop_all_is_system_error() {
        let error = ClientError::from(StopAllError {
            failures: Vec::new(),
        });
        assert_eq!(error.error_code(), "TUNNEL_STOP_ALL_FAILED");
        assert!(!error.is_user_error());
    }
}
