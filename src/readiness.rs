//! Readiness probe: poll the cluster until it answers or a deadline passes
//!
//! Attempts are strictly serial and spaced by a fixed interval. A failed
//! attempt (transport error, non-2xx status, or no answer within the
//! attempt budget) is logged at debug level and polling continues; only the
//! overall timeout ends the wait.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

use crate::engine::SearchBackend;
use crate::utils::{DEFAULT_POLL_INTERVAL, DEFAULT_READY_TIMEOUT};

/// Polling parameters for the readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Give up once this much time has elapsed without a successful check
    pub timeout: Duration,
    /// Pause between attempts
    pub interval: Duration,
}

impl ProbeConfig {
    #[must_use]
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_READY_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Result of a readiness wait. Once `Ready`, a run does not look back:
/// later outages surface as errors on the next operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unreachable,
    Ready,
}

impl ConnectionState {
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, ConnectionState::Ready)
    }
}

pub struct ReadinessProbe<'a, B: ?Sized> {
    backend: &'a B,
    config: ProbeConfig,
}

impl<'a, B: SearchBackend + ?Sized> ReadinessProbe<'a, B> {
    pub fn new(backend: &'a B, config: ProbeConfig) -> Self {
        Self { backend, config }
    }

    /// `true` on the first successful check, `false` once the timeout is
    /// exceeded. At least one check is always made, even with a zero timeout.
    pub async fn wait_until_ready(&self) -> bool {
        self.wait().await.is_ready()
    }

    pub async fn wait(&self) -> ConnectionState {
        let ProbeConfig { timeout, interval } = self.config;
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            // An attempt may run until the deadline, but never less than one
            // interval, so a zero timeout still gets a real check.
            let budget = timeout.saturating_sub(started.elapsed()).max(interval);
            if self.check_once(attempt, budget).await {
                tracing::info!(
                    attempt,
                    waited_ms = started.elapsed().as_millis(),
                    "Cluster is available"
                );
                return ConnectionState::Ready;
            }

            if started.elapsed() >= timeout {
                break;
            }
            tokio::time::sleep(interval).await;
            if started.elapsed() >= timeout {
                break;
            }
        }

        tracing::error!(
            attempts = attempt,
            timeout_secs = timeout.as_secs_f64(),
            "Cluster did not become available within the timeout"
        );
        ConnectionState::Unreachable
    }

    async fn check_once(&self, attempt: u32, budget: Duration) -> bool {
        match tokio::time::timeout(budget, self.backend.ping()).await {
            Ok(Ok(true)) => true,
            Ok(Ok(false)) => {
                tracing::debug!(attempt, "Cluster answered ping with a failure status (will retry)");
                false
            }
            Ok(Err(e)) => {
                tracing::debug!(attempt, error = %e, "Cluster ping failed (will retry)");
                false
            }
            Err(_) => {
                tracing::debug!(
                    attempt,
                    budget_ms = budget.as_millis(),
                    "Cluster ping timed out (will retry)"
                );
                false
            }
        }
    }
}

/// Poll `backend` until it answers or `timeout` elapses
pub async fn wait_until_ready<B: SearchBackend + ?Sized>(
    backend: &B,
    timeout: Duration,
    interval: Duration,
) -> bool {
    ReadinessProbe::new(backend, ProbeConfig::new(timeout, interval))
        .wait_until_ready()
        .await
}
