//! Readiness probe timing, on tokio's paused clock

mod common;

use std::time::Duration;
use tokio::time::Instant;

use common::{InMemoryBackend, PingBehavior};
use kodegen_tools_docsearch::{ConnectionState, ProbeConfig, ReadinessProbe, wait_until_ready};

const TIMEOUT: Duration = Duration::from_secs(10);
const INTERVAL: Duration = Duration::from_secs(2);

#[tokio::test(start_paused = true)]
async fn healthy_cluster_is_ready_on_first_attempt() {
    let backend = InMemoryBackend::new();
    let started = Instant::now();

    assert!(wait_until_ready(&backend, TIMEOUT, INTERVAL).await);
    assert_eq!(backend.ping_count(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_failures() {
    let failures = 3;
    let backend = InMemoryBackend::with_ping(PingBehavior::FailTimes(failures));
    let started = Instant::now();

    assert!(wait_until_ready(&backend, TIMEOUT, INTERVAL).await);
    assert_eq!(backend.ping_count(), failures + 1);
    assert_eq!(started.elapsed(), INTERVAL * failures);
}

#[tokio::test(start_paused = true)]
async fn failing_cluster_gives_up_within_timeout_plus_interval() {
    let backend = InMemoryBackend::with_ping(PingBehavior::AlwaysFails);
    let started = Instant::now();

    assert!(!wait_until_ready(&backend, TIMEOUT, INTERVAL).await);
    let elapsed = started.elapsed();
    assert!(elapsed >= TIMEOUT, "gave up early: {elapsed:?}");
    assert!(elapsed <= TIMEOUT + INTERVAL, "overran: {elapsed:?}");
    // attempts at 0, 2, 4, 6, 8
    assert_eq!(backend.ping_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn unhealthy_status_is_retried_like_an_error() {
    let backend = InMemoryBackend::with_ping(PingBehavior::AlwaysUnhealthy);
    let probe = ReadinessProbe::new(&backend, ProbeConfig::new(TIMEOUT, INTERVAL));

    assert_eq!(probe.wait().await, ConnectionState::Unreachable);
    assert!(backend.ping_count() > 1);
}

#[tokio::test(start_paused = true)]
async fn silent_cluster_is_bounded_by_timeout_plus_interval() {
    let backend = InMemoryBackend::with_ping(PingBehavior::NeverResponds);
    let started = Instant::now();

    assert!(!wait_until_ready(&backend, TIMEOUT, INTERVAL).await);
    let elapsed = started.elapsed();
    assert!(elapsed <= TIMEOUT + INTERVAL, "overran: {elapsed:?}");
    assert_eq!(backend.ping_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_timeout_still_checks_once() {
    let backend = InMemoryBackend::new();
    assert!(wait_until_ready(&backend, Duration::ZERO, INTERVAL).await);
    assert_eq!(backend.ping_count(), 1);

    let backend = InMemoryBackend::with_ping(PingBehavior::AlwaysFails);
    let started = Instant::now();
    assert!(!wait_until_ready(&backend, Duration::ZERO, INTERVAL).await);
    assert_eq!(backend.ping_count(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn interval_longer_than_timeout_still_checks_once() {
    let backend = InMemoryBackend::with_ping(PingBehavior::AlwaysFails);
    let timeout = Duration::from_secs(1);
    let interval = Duration::from_secs(5);
    let started = Instant::now();

    assert!(!wait_until_ready(&backend, timeout, interval).await);
    assert_eq!(backend.ping_count(), 1);
    assert!(started.elapsed() <= timeout + interval);
}
