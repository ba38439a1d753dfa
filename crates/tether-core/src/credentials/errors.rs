use crate::backend::BackendError;
use crate::directory::{Protocol, ServiceId};
use crate::errors::TetherError;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("No credential prompt is pending for service '{service}'")]
    NoPendingPrompt { service: ServiceId },

    #[error("Credential login must not be empty")]
    EmptyLogin,

    #[error("A {actual} credential cannot be used for a {expected} service")]
    ProtocolMismatch { expected: Protocol, actual: Protocol },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TetherError for CredentialError {
    fn error_code(&self) -> &'static str {
        match self {
            CredentialError::NoPendingPrompt { .. } => "CREDENTIAL_NO_PENDING_PROMPT",
            CredentialError::EmptyLogin => "CREDENTIAL_EMPTY_LOGIN",
            CredentialError::ProtocolMismatch { .. } => "CREDENTIAL_PROTOCOL_MISMATCH",
            CredentialError::Backend(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            CredentialError::NoPendingPrompt { .. }
            | CredentialError::EmptyLogin
            | CredentialError::ProtocolMismatch { .. } => true,
            CredentialError::Backend(e) => e.is_user_error(),
        }
    }
}
