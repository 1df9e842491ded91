//! 按主体的突发限流测试

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::epoch;
use warden_core::{ErrorCode, FlowDecision, ManualClock, MemoryKvStore, RateLimiter};

fn limiter(clock: &Arc<ManualClock>) -> RateLimiter {
    let store = Arc::new(MemoryKvStore::with_clock(clock.clone()));
    RateLimiter::new(store, 10, Duration::from_secs(3), Duration::from_secs(30))
}

#[tokio::test]
async fn test_eleventh_request_in_window_blocks() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let limiter = limiter(&clock);

    for expected in 1..=10 {
        assert_eq!(
            limiter.check("10.0.0.1").await.unwrap(),
            FlowDecision::Allowed { count: expected }
        );
    }
    assert_eq!(limiter.check("10.0.0.1").await.unwrap(), FlowDecision::Escalated);
    assert_eq!(limiter.check("10.0.0.1").await.unwrap(), FlowDecision::Blocked);

    // 其他主体不受影响
    assert!(limiter.allow("10.0.0.2").await.unwrap());
}

#[tokio::test]
async fn test_block_outlives_counter_window() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let limiter = limiter(&clock);

    for _ in 0..11 {
        limiter.check("10.0.0.1").await.unwrap();
    }

    clock.advance(chrono::Duration::seconds(5));
    assert_eq!(limiter.check("10.0.0.1").await.unwrap(), FlowDecision::Blocked);

    clock.advance(chrono::Duration::seconds(20));
    let err = limiter.enforce("10.0.0.1").await.unwrap_err();
    assert!(err.is(ErrorCode::Blocked));

    clock.advance(chrono::Duration::seconds(6));
    assert_eq!(
        limiter.check("10.0.0.1").await.unwrap(),
        FlowDecision::Allowed { count: 1 }
    );
}

#[tokio::test]
async fn test_window_resets_counter() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let limiter = limiter(&clock);

    for _ in 0..10 {
        assert!(limiter.allow("10.0.0.1").await.unwrap());
    }
    clock.advance(chrono::Duration::seconds(3));

    for expected in 1..=10 {
        assert_eq!(
            limiter.check("10.0.0.1").await.unwrap(),
            FlowDecision::Allowed { count: expected }
        );
    }
}

#[tokio::test]
async fn test_escalation_maps_to_rate_limited() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let limiter = limiter(&clock);

    for _ in 0..10 {
        limiter.enforce("10.0.0.1").await.unwrap();
    }
    let err = limiter.enforce("10.0.0.1").await.unwrap_err();
    assert!(err.is(ErrorCode::RateLimited));
}

#[tokio::test]
async fn test_concurrent_burst_admits_exactly_threshold() {
    let clock = Arc::new(ManualClock::new(epoch()));
    let limiter = Arc::new(limiter(&clock));

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.check("10.0.0.9").await.unwrap() })
        })
        .collect();

    let mut allowed = 0;
    let mut escalated = 0;
    for handle in handles {
        match handle.await.unwrap() {
            FlowDecision::Allowed { .. } => allowed += 1,
            FlowDecision::Escalated => escalated += 1,
            FlowDecision::Blocked => {}
        }
    }
    assert_eq!(allowed, 10);
    assert_eq!(escalated, 1);
}
