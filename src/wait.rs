//! The explicit-wait primitive: bounded polling for a condition to become true.
//!
//! Independent of any browser binding so it can be exercised against plain
//! closures. Every precondition in the interaction layer goes through
//! [`await_condition`]; there are no fixed sleeps in front of actions.

use crate::timeouts::ms;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Panics if `timeout_seconds` is zero; the wait bound must be positive.
    pub fn from_secs(timeout_seconds: u64) -> Self {
        assert!(timeout_seconds > 0, "wait timeout must be positive");
        Self {
            timeout: Duration::from_secs(timeout_seconds),
            poll_interval: Duration::from_millis(ms::POLL_INTERVAL),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::from_secs(crate::timeouts::secs::WAIT_TIMEOUT)
    }
}

/// Polls `condition` until it returns true or `timeout` elapses.
///
/// The condition is always evaluated at least once, and the deadline is
/// checked after each evaluation, so the poll loop can only be ended by its
/// own timeout. Returns whether the condition was ever satisfied.
pub async fn await_condition<F, Fut>(mut condition: F, timeout: Duration, poll_interval: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = tokio::time::Instant::now();

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() >= timeout {
            return false;
        }

        tokio::time::sleep(poll_interval).await;
    }
}
