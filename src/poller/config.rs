use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Deserialize, Debug)]
#[serde(default)]
pub struct PollerConfig {
    /// Minimum pause between two ticks, in milliseconds.
    pub interval_ms: u64,
    pub on_handler_error: FaultPolicy,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1,
            on_handler_error: FaultPolicy::default(),
        }
    }
}

impl PollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// What the poller does when a handler fails.
#[derive(Clone, Copy, PartialEq, Eq, Default, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Abort the run and return the failure to the caller of `run`.
    #[default]
    Propagate,
    /// Log the failure and keep dispatching.
    Isolate,
}
