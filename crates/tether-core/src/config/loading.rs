//! Configuration loading and merging logic.
//!
//! Loads `~/.tether/config.toml` and then `./.tether/config.toml`, merging
//! each present file over the previous result. Missing files are skipped;
//! unreadable or malformed files fail the whole load.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::types::{HistoryConfig, SyncConfig, TetherConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".tether";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a present file cannot be read or parsed, or if the
/// merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<TetherConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_DIR).join(CONFIG_FILE));
    }
    paths.push(std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE));

    load_from_paths(&paths)
}

/// Load and merge the given config files in order.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<TetherConfig, ConfigError> {
    let mut config = TetherConfig::default();

    for path in paths {
        match load_config_file(path) {
            Ok(file_config) => {
                info!(event = "core.config.file_loaded", path = %path.display());
                config = merge_configs(config, file_config);
            }
            Err(ConfigError::ConfigNotFound { .. }) => {
                debug!(event = "core.config.file_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;
    Ok(config)
}

/// Load a single configuration file.
///
/// # Errors
///
/// Returns `ConfigError::ConfigNotFound` if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<TetherConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with `override_config` taking precedence for
/// every field it sets.
pub fn merge_configs(base: TetherConfig, override_config: TetherConfig) -> TetherConfig {
    TetherConfig {
        history: HistoryConfig {
            recent_limit: override_config
                .history
                .recent_limit
                .or(base.history.recent_limit),
        },
        sync: SyncConfig {
            ready_delay_ms: override_config
                .sync
                .ready_delay_ms
                .or(base.sync.ready_delay_ms),
            log_events: override_config.sync.log_events.or(base.sync.log_events),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_from_paths(&[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(config, TetherConfig::default());
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let dir = TempDir::new().unwrap();
        let user = write_config(
            &dir,
            "user.toml",
            "[history]\nrecent_limit = 20\n\n[sync]\nready_delay_ms = 1500\n",
        );
        let project = write_config(&dir, "project.toml", "[history]\nrecent_limit = 5\n");

        let config = load_from_paths(&[user, project]).unwrap();
        assert_eq!(config.recent_limit(), 5);
        assert_eq!(config.ready_delay(), std::time::Duration::from_millis(1500));
        assert!(config.log_events());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let broken = write_config(&dir, "broken.toml", "[history\nrecent_limit = ");
        let err = load_from_paths(&[broken]).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_invalid_merged_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let zero = write_config(&dir, "zero.toml", "[history]\nrecent_limit = 0\n");
        let err = load_from_paths(&[zero]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_merge_keeps_base_when_override_unset() {
        let base = TetherConfig {
            sync: SyncConfig {
                ready_delay_ms: Some(300),
                log_events: Some(false),
            },
            ..Default::default()
        };
        let merged = merge_configs(base, TetherConfig::default());
        assert_eq!(merged.sync.ready_delay_ms, Some(300));
        assert_eq!(merged.sync.log_events, Some(false));
    }
}
