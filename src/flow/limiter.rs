use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::KeyedMutex;
use crate::config::FlowConfig;
use crate::error::{GuardError, Result};
use crate::store::{KvStore, keys};

/// 单次流量检查的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDecision {
    /// 未超出阈值；`count` 为当前窗口内的请求数
    Allowed { count: u64 },
    /// 本次请求超出阈值并触发封禁
    Escalated,
    /// 之前的封禁仍然有效
    Blocked,
}

impl FlowDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, FlowDecision::Allowed { .. })
    }
}

/// 按主体的突发限流，超限后升级为封禁
///
/// 每个 `window` 内允许 `threshold` 次请求；超出的那次请求触发 `block` 时长的封禁，
/// 封禁期间无论计数如何一律拒绝
pub struct RateLimiter {
    store: Arc<dyn KvStore>,
    threshold: u64,
    window: Duration,
    block: Duration,
    locks: KeyedMutex,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KvStore>, threshold: u64, window: Duration, block: Duration) -> Self {
        Self {
            store,
            threshold,
            window,
            block,
            locks: KeyedMutex::new(),
        }
    }

    pub fn from_config(store: Arc<dyn KvStore>, config: &FlowConfig) -> Self {
        Self::new(store, config.threshold, config.window(), config.block())
    }

    pub async fn allow(&self, subject: &str) -> Result<bool> {
        Ok(self.check(subject).await?.is_allowed())
    }

    /// 同 [`check`](Self::check)，拒绝时返回 `Blocked` / `RateLimited` 错误
    pub async fn enforce(&self, subject: &str) -> Result<()> {
        match self.check(subject).await? {
            FlowDecision::Allowed { .. } => Ok(()),
            FlowDecision::Escalated => Err(GuardError::rate_limited(subject)),
            FlowDecision::Blocked => Err(GuardError::blocked(subject)),
        }
    }

    pub async fn check(&self, subject: &str) -> Result<FlowDecision> {
        let _guard = self.locks.lock(subject).await;

        let block_key = keys::flow_block(subject);
        if self.store.exists(&block_key).await? {
            debug!(subject = %subject, "request denied, subject is blocked");
            return Ok(FlowDecision::Blocked);
        }

        let counter_key = keys::flow_counter(subject);
        if !self.store.exists(&counter_key).await? {
            self.store.set_ex(&counter_key, "1", self.window).await?;
            return Ok(FlowDecision::Allowed { count: 1 });
        }

        let count = self.store.incr(&counter_key).await?;
        if count == 1 {
            // 检查与自增之间窗口已过期
            self.store.expire(&counter_key, self.window).await?;
        }
        let count = u64::try_from(count).unwrap_or(0);

        if count > self.threshold {
            self.store.set_ex(&block_key, "", self.block).await?;
            warn!(
                subject = %subject,
                count,
                threshold = self.threshold,
                block_secs = self.block.as_secs(),
                "burst threshold exceeded, subject blocked"
            );
            return Ok(FlowDecision::Escalated);
        }

        Ok(FlowDecision::Allowed { count })
    }
}
