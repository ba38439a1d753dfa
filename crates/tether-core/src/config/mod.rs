//! # Configuration System
//!
//! Hierarchical TOML configuration for Tether.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.tether/config.toml` (global user preferences)
//! 3. **Project config** - `./.tether/config.toml` (directory-specific overrides)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.tether/config.toml
//! [history]
//! recent_limit = 20
//!
//! [sync]
//! ready_delay_ms = 250
//! log_events = false
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use tether_core::config::TetherConfig;
//!
//! fn example() -> Result<(), tether_core::errors::ConfigError> {
//!     let config = TetherConfig::load_hierarchy()?;
//!     let limit = config.recent_limit();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{HistoryConfig, SyncConfig, TetherConfig};
pub use validation::validate_config;

impl TetherConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }

    /// Maximum number of recent connections kept in history.
    pub fn recent_limit(&self) -> usize {
        self.history
            .recent_limit
            .unwrap_or_else(defaults::default_recent_limit)
    }

    /// Delay before the readiness signal is sent to the backend.
    pub fn ready_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.sync
                .ready_delay_ms
                .unwrap_or_else(defaults::default_ready_delay_ms),
        )
    }

    /// Whether the sync pump logs every applied push event.
    pub fn log_events(&self) -> bool {
        self.sync
            .log_events
            .unwrap_or_else(defaults::default_log_events)
    }
}
