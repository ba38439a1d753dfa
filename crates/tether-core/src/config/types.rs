//! Configuration type definitions.
//!
//! Every field is optional so that a partial file only overrides what it
//! names. Accessors on [`TetherConfig`] resolve missing values to defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! [history]
//! recent_limit = 10
//!
//! [sync]
//! ready_delay_ms = 0
//! log_events = true
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TetherConfig {
    /// Recent-connection history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Push-event synchronization settings
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Recent-connection history configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HistoryConfig {
    /// Number of recent connections to keep. Default: 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_limit: Option<usize>,
}

/// Push-event synchronization configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SyncConfig {
    /// Milliseconds to wait after both subscriptions exist before signalling
    /// readiness to the backend. Default: 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_delay_ms: Option<u64>,

    /// Emit a debug event for every applied push event. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_events: Option<bool>,
}
