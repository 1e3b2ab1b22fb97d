//! Dispatch layer configuration.

use std::time::Duration;

/// Redelivery behavior of the task worker.
///
/// `from_env` reads overrides from:
/// - `TASK_MAX_REDELIVERIES` — redeliveries per task before it is dropped
/// - `TASK_REDELIVERY_DELAY_SECS` — delay before a redelivery
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// How many times a failed task is redelivered before being dropped.
    pub max_redeliveries: u32,
    /// Delay between a failure and the redelivery.
    pub redelivery_delay: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_redeliveries: 5,
            redelivery_delay: Duration::from_secs(5),
        }
    }
}

impl DispatchConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_redeliveries: std::env::var("TASK_MAX_REDELIVERIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redeliveries),
            redelivery_delay: std::env::var("TASK_REDELIVERY_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.redelivery_delay),
        }
    }
}
