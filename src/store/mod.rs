//! TTL 键值存储
//!
//! 吊销名单、流量计数器和验证码共用同一个存储，过期完全交给存储自身处理

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{GuardError, Result};

pub mod keys;
pub mod memory;
pub mod redis;

pub use memory::MemoryKvStore;
pub use self::redis::RedisKvStore;

/// 带过期时间的键值存储接口
///
/// 单个操作由存储保证原子性；跨多个操作的临界区由调用方按主体串行化。
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 键是否存在（已过期视为不存在）
    async fn exists(&self, key: &str) -> Result<bool>;

    /// 读取字符串值
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 写入并设置过期时间，覆盖旧值
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// 仅当键不存在时写入，返回是否写入成功
    async fn set_nx_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<bool>;

    /// 自增并返回新值；保留已有过期时间，新建的键没有过期时间
    async fn incr(&self, key: &str) -> Result<i64>;

    /// 为已存在的键设置过期时间，返回键是否存在
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// 删除键，返回键是否存在
    async fn del(&self, key: &str) -> Result<bool>;
}

/// 过期时间换算为毫秒，零值拒绝
pub(crate) fn ttl_millis(ttl: Duration) -> Result<u64> {
    let millis = u64::try_from(ttl.as_millis())
        .map_err(|_| GuardError::invalid_parameter("ttl out of range"))?;
    if millis == 0 {
        return Err(GuardError::invalid_parameter("ttl must be at least one millisecond"));
    }
    Ok(millis)
}
