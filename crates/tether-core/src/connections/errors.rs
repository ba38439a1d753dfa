use crate::backend::BackendError;
use crate::directory::ServiceId;
use crate::errors::TetherError;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Service '{id}' not found")]
    ServiceNotFound { id: ServiceId },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl TetherError for ConnectionError {
    fn error_code(&self) -> &'static str {
        match self {
            ConnectionError::ServiceNotFound { .. } => "CONNECTION_SERVICE_NOT_FOUND",
            ConnectionError::Backend(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ConnectionError::ServiceNotFound { .. } => true,
            ConnectionError::Backend(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_rejection_is_user_error() {
        let error = ConnectionError::from(BackendError::Rejected {
            command: "connect_service".to_string(),
            message: "service not found".to_string(),
        });
        assert_eq!(error.error_code(), "BACKEND_REJECTED");
        assert!(error.is_user_error());
        assert_eq!(
            error.to_string(),
            "Backend rejected 'connect_service': service not found"
        );
    }
}
