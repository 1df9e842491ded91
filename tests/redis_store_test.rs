//! Redis 存储集成测试
//!
//! 需要运行中的 Redis 实例，默认忽略：
//! ```bash
//! docker run -d --name redis-test -p 6379:6379 redis:7
//! REDIS_URL=redis://127.0.0.1:6379 cargo test --test redis_store_test -- --ignored
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use uuid::Uuid;
use warden_core::{FlowDecision, KvStore, RateLimiter, RedisKvStore, RevocationStore, RevokeOutcome};

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn unique(prefix: &str) -> String {
    format!("warden-test:{prefix}:{}", Uuid::new_v4())
}

async fn connect() -> RedisKvStore {
    RedisKvStore::connect(redis_url())
        .await
        .expect("redis must be reachable for ignored tests")
}

#[tokio::test]
#[ignore]
async fn test_set_nx_and_expiry() {
    let store = connect().await;
    let key = unique("nx");

    assert!(store.set_nx_ex(&key, "a", Duration::from_millis(300)).await.unwrap());
    assert!(!store.set_nx_ex(&key, "b", Duration::from_millis(300)).await.unwrap());
    assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("a"));

    sleep(Duration::from_millis(450)).await;
    assert!(!store.exists(&key).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_incr_keeps_ttl() {
    let store = connect().await;
    let key = unique("counter");

    store.set_ex(&key, "1", Duration::from_millis(400)).await.unwrap();
    assert_eq!(store.incr(&key).await.unwrap(), 2);
    assert_eq!(store.incr(&key).await.unwrap(), 3);

    sleep(Duration::from_millis(550)).await;
    assert!(!store.exists(&key).await.unwrap());
    assert!(!store.del(&key).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_revocation_round() {
    let store = Arc::new(connect().await);
    let revocations = RevocationStore::new(store);
    let token_id = Uuid::new_v4();

    assert_eq!(
        revocations
            .mark_revoked(&token_id, chrono::Duration::seconds(5))
            .await
            .unwrap(),
        RevokeOutcome::Revoked
    );
    assert!(revocations.is_revoked(&token_id).await.unwrap());
    assert_eq!(
        revocations
            .mark_revoked(&token_id, chrono::Duration::seconds(5))
            .await
            .unwrap(),
        RevokeOutcome::AlreadyRevoked
    );
}

#[tokio::test]
#[ignore]
async fn test_limiter_blocks_on_redis() {
    let store = Arc::new(connect().await);
    let limiter = RateLimiter::new(store, 3, Duration::from_secs(2), Duration::from_secs(2));
    let subject = unique("ip");

    for _ in 0..3 {
        assert!(limiter.allow(&subject).await.unwrap());
    }
    assert_eq!(limiter.check(&subject).await.unwrap(), FlowDecision::Escalated);
    assert_eq!(limiter.check(&subject).await.unwrap(), FlowDecision::Blocked);
}
