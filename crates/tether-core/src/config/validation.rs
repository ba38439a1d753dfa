use crate::config::types::TetherConfig;
use crate::errors::ConfigError;

/// Upper bound on the recent-connection history.
pub const MAX_RECENT_LIMIT: usize = 1000;

/// Validate the configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` if `history.recent_limit` is 0
/// or above [`MAX_RECENT_LIMIT`].
pub fn validate_config(config: &TetherConfig) -> Result<(), ConfigError> {
    if let Some(limit) = config.history.recent_limit
        && (limit == 0 || limit > MAX_RECENT_LIMIT)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "history.recent_limit must be between 1 and {MAX_RECENT_LIMIT}, got {limit}"
            ),
        });
    }

    Ok(())
}
