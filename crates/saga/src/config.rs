//! Fulfillment workflow configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Tunable timing parameters of the fulfillment workflow.
///
/// Defaults match the production behavior: a 30-second courier poll interval
/// with a 120-cycle budget (one hour of searching), and a simulated transit
/// time of 20-40 seconds plus 20 seconds per kilometer of customer distance.
///
/// `from_env` reads overrides from:
/// - `COURIER_POLL_INTERVAL_SECS`
/// - `COURIER_MAX_POLL_CYCLES`
/// - `TRANSIT_SECS_PER_KM`
#[derive(Debug, Clone)]
pub struct FulfillmentConfig {
    /// Delay between courier directory polls while no courier is idle.
    pub poll_interval: Duration,
    /// Poll cycles before giving up and cancelling the order.
    pub max_poll_cycles: u32,
    /// Bounds of the random base component of transit time, in seconds.
    pub transit_base_secs: (u64, u64),
    /// Seconds of transit added per kilometer of customer distance.
    pub transit_secs_per_km: f64,
    /// Transport-level retry policy for collaborator calls.
    pub retry: RetryPolicy,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            max_poll_cycles: 120,
            transit_base_secs: (20, 40),
            transit_secs_per_km: 20.0,
            retry: RetryPolicy::default(),
        }
    }
}

impl FulfillmentConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_interval: std::env::var("COURIER_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            max_poll_cycles: std::env::var("COURIER_MAX_POLL_CYCLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_poll_cycles),
            transit_secs_per_km: std::env::var("TRANSIT_SECS_PER_KM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.transit_secs_per_km),
            ..defaults
        }
    }

    /// Total time the workflow will search for a courier before cancelling.
    pub fn search_budget(&self) -> Duration {
        self.poll_interval * self.max_poll_cycles
    }
}
