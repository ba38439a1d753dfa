use crate::backend::BackendError;
use crate::directory::types::{ServerId, ServiceId};
use crate::errors::TetherError;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Server '{id}' not found")]
    ServerNotFound { id: ServerId },

    #[error("Service '{id}' not found")]
    ServiceNotFound { id: ServiceId },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TetherError for DirectoryError {
    fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::ServerNotFound { .. } => "DIRECTORY_SERVER_NOT_FOUND",
            DirectoryError::ServiceNotFound { .. } => "DIRECTORY_SERVICE_NOT_FOUND",
            DirectoryError::Backend(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DirectoryError::ServerNotFound { .. } | DirectoryError::ServiceNotFound { .. } => true,
            DirectoryError::Backend(e) => e.is_user_error(),
        }
    }
}
