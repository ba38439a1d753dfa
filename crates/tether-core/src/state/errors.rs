use crate::credentials::CredentialError;
use crate::errors::TetherError;
use crate::tunnels::TunnelError;

/// Errors from dispatching an action.
///
/// Wraps the component error that rejected the action. Only actions with a
/// precondition can fail: resolving a prompt and tunnel bookkeeping.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Tunnel(#[from] TunnelError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl TetherError for DispatchError {
    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::Tunnel(e) => e.error_code(),
            DispatchError::Credential(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DispatchError::Tunnel(e) => e.is_user_error(),
            DispatchError::Credential(e) => e.is_user_error(),
        }
    }
}
