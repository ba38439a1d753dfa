use crate::errors::TetherError;

/// A failed request to the tunneling daemon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("Backend rejected '{command}': {message}")]
    Rejected { command: String, message: String },

    #[error("Backend protocol error: {message}")]
    Protocol { message: String },
}

impl BackendError {
    pub fn rejected(command: &str, message: impl Into<String>) -> Self {
        BackendError::Rejected {
            command: command.to_string(),
            message: message.into(),
        }
    }
}

impl TetherError for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            BackendError::Unavailable { .. } => "BACKEND_UNAVAILABLE",
            BackendError::Rejected { .. } => "BACKEND_REJECTED",
            BackendError::Protocol { .. } => "BACKEND_PROTOCOL_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, BackendError::Rejected { .. })
    }
}
