use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{CodeGenerator, CodeKind};
use crate::config::VerifyConfig;
use crate::error::{GuardError, Result};
use crate::flow::KeyedMutex;
use crate::mail::{MailMessage, MailPublisher};
use crate::store::{KvStore, keys};

/// 投递消息是否已交给邮件通道
///
/// 无论是否成功验证码都会保存，发布失败不重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeDelivery {
    Published,
    PublishFailed,
}

/// 六位邮箱验证码的签发与校验
pub struct OneTimeCodeIssuer {
    store: Arc<dyn KvStore>,
    publisher: Arc<dyn MailPublisher>,
    generator: Arc<dyn CodeGenerator>,
    code_ttl: Duration,
    cooldown: Duration,
    locks: KeyedMutex,
}

impl OneTimeCodeIssuer {
    pub fn new(
        store: Arc<dyn KvStore>,
        publisher: Arc<dyn MailPublisher>,
        generator: Arc<dyn CodeGenerator>,
        code_ttl: Duration,
        cooldown: Duration,
    ) -> Self {
        Self {
            store,
            publisher,
            generator,
            code_ttl,
            cooldown,
            locks: KeyedMutex::new(),
        }
    }

    pub fn from_config(
        store: Arc<dyn KvStore>,
        publisher: Arc<dyn MailPublisher>,
        generator: Arc<dyn CodeGenerator>,
        config: &VerifyConfig,
    ) -> Self {
        Self::new(store, publisher, generator, config.code_ttl(), config.cooldown())
    }

    pub fn code_ttl(&self) -> Duration {
        self.code_ttl
    }

    /// 按 IP 节流后生成验证码、发布投递消息并保存，覆盖该邮箱之前未使用的验证码
    pub async fn request_code(
        &self,
        kind: CodeKind,
        email: &str,
        requester_ip: &str,
    ) -> Result<CodeDelivery> {
        let _guard = self.locks.lock(&format!("ip:{requester_ip}")).await;

        let limit_key = keys::verify_limit(requester_ip);
        if !self.store.set_nx_ex(&limit_key, "", self.cooldown).await? {
            debug!(ip = %requester_ip, "code request throttled");
            return Err(GuardError::code_request_throttled());
        }

        let code = self.generator.generate();
        let message = MailMessage {
            kind,
            email: email.to_string(),
            code,
        };
        let delivery = match self.publisher.publish(&message).await {
            Ok(()) => CodeDelivery::Published,
            Err(err) => {
                warn!(email = %email, kind = %kind, error = %err, "failed to publish verification mail");
                CodeDelivery::PublishFailed
            }
        };

        self.store
            .set_ex(&keys::verify_code(email), &code.to_string(), self.code_ttl)
            .await?;
        info!(email = %email, kind = %kind, ip = %requester_ip, "verification code issued");
        Ok(delivery)
    }

    /// 校验验证码，成功后验证码保留
    pub async fn confirm_code(&self, email: &str, submitted: &str) -> Result<()> {
        let stored = self
            .store
            .get(&keys::verify_code(email))
            .await?
            .ok_or_else(GuardError::code_not_found)?;
        if stored != submitted {
            debug!(email = %email, "verification code mismatch");
            return Err(GuardError::code_mismatch());
        }
        Ok(())
    }

    /// 校验并删除验证码（一次性）
    pub async fn consume_code(&self, email: &str, submitted: &str) -> Result<()> {
        self.consume_with(email, submitted, || async { Ok(()) }).await
    }

    /// 在同一邮箱的临界区内校验验证码、执行 `write`，成功后删除验证码
    ///
    /// `write` 失败时验证码保留，可用同一验证码重试；
    /// 并发的多次提交只有一次能通过校验
    pub async fn consume_with<F, Fut, T>(&self, email: &str, submitted: &str, write: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let _guard = self.locks.lock(&format!("email:{email}")).await;
        self.confirm_code(email, submitted).await?;
        let value = write().await?;
        self.store.del(&keys::verify_code(email)).await?;
        Ok(value)
    }
}
