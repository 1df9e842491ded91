use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use super::{KvStore, ttl_millis};
use crate::error::{ErrorCode, InfraResultExt, Result};

/// Redis 实现，所有过期时间以毫秒精度写入
#[derive(Clone)]
pub struct RedisKvStore {
    conn: ConnectionManager,
}

impl RedisKvStore {
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();
        let client = redis::Client::open(url)
            .map_err(anyhow::Error::from)
            .into_guard(ErrorCode::StoreUnavailable, "failed to open redis client")?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(anyhow::Error::from)
            .into_guard(ErrorCode::StoreUnavailable, "failed to connect to redis")?;
        debug!(url = %url, "redis connection manager ready");
        Ok(Self { conn })
    }

    pub fn from_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        Ok(conn.exists(key).await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let millis = ttl_millis(ttl)?;
        let mut conn = self.conn.clone();
        conn.pset_ex::<_, _, ()>(key, value, millis).await?;
        Ok(())
    }

    async fn set_nx_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<bool> {
        let millis = ttl_millis(ttl)?;
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(millis)
            .query_async(&mut conn)
            .await?;
        Ok(reply.is_some())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        Ok(conn.incr(key, 1_i64).await?)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let millis = ttl_millis(ttl)?;
        let millis = i64::try_from(millis).unwrap_or(i64::MAX);
        let mut conn = self.conn.clone();
        Ok(conn.pexpire(key, millis).await?)
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}
