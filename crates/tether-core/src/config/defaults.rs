//! Default values for configuration fields.

/// Returns the default recent-connection history size (10).
pub fn default_recent_limit() -> usize {
    10
}

/// Returns the default readiness delay in milliseconds (0).
pub fn default_ready_delay_ms() -> u64 {
    0
}

/// Returns whether applied push events are logged by default (true).
pub fn default_log_events() -> bool {
    true
}
