use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::store::{KvStore, keys};

/// 吊销令牌的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// 已写入黑名单
    Revoked,
    /// 已在黑名单中，过期时间不变
    AlreadyRevoked,
    /// 令牌已过期，无需写入
    AlreadyExpired,
}

/// 提前吊销的令牌 ID 黑名单
///
/// 每条记录的存活时间等于令牌剩余有效期，名单中只有尚未过期的已吊销令牌
#[derive(Clone)]
pub struct RevocationStore {
    store: Arc<dyn KvStore>,
}

impl RevocationStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn mark_revoked(
        &self,
        token_id: &Uuid,
        remaining: chrono::Duration,
    ) -> Result<RevokeOutcome> {
        let ttl = match remaining.to_std() {
            Ok(ttl) if ttl.as_millis() > 0 => ttl,
            _ => {
                debug!(jti = %token_id, "token already expired, no blacklist entry needed");
                return Ok(RevokeOutcome::AlreadyExpired);
            }
        };

        let key = keys::blacklist(&token_id.to_string());
        if self.store.set_nx_ex(&key, "", ttl).await? {
            info!(jti = %token_id, ttl_ms = ttl.as_millis() as u64, "token revoked");
            Ok(RevokeOutcome::Revoked)
        } else {
            debug!(jti = %token_id, "token was already revoked");
            Ok(RevokeOutcome::AlreadyRevoked)
        }
    }

    pub async fn is_revoked(&self, token_id: &Uuid) -> Result<bool> {
        self.store
            .exists(&keys::blacklist(&token_id.to_string()))
            .await
    }
}
