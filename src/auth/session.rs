use std::sync::Arc;

use tracing::{debug, warn};

use super::token::bearer_token;
use super::{Principal, RevocationStore, TokenCodec};
use crate::clock::Clock;
use crate::error::{GuardError, Result};

/// 将请求的 Bearer 令牌解析为可选的 [`Principal`]
///
/// 从不拒绝请求：任何失败（包括已吊销）都按匿名处理，匿名请求能做什么由授权层决定
#[derive(Clone)]
pub struct SessionAuthenticator {
    codec: Arc<TokenCodec>,
    revocations: RevocationStore,
    clock: Arc<dyn Clock>,
}

impl SessionAuthenticator {
    pub fn new(codec: Arc<TokenCodec>, revocations: RevocationStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            revocations,
            clock,
        }
    }

    /// 根据 `Authorization` 头解析身份
    pub async fn authenticate(&self, authorization: Option<&str>) -> Option<Principal> {
        let token = bearer_token(authorization)?;
        match self.resolve(token).await {
            Ok(principal) => {
                debug!(subject = principal.subject_id, "request authenticated");
                Some(principal)
            }
            Err(err) if err.code().is_some_and(|code| code.is_token_rejection()) => {
                debug!(reason = %err, "bearer token rejected, continuing anonymously");
                None
            }
            Err(err) => {
                warn!(error = %err, "revocation check failed, continuing anonymously");
                None
            }
        }
    }

    /// 校验令牌并检查黑名单
    pub async fn resolve(&self, token: &str) -> Result<Principal> {
        let claims = self.codec.verify(token, self.clock.now())?;
        if self.revocations.is_revoked(&claims.token_id()?).await? {
            return Err(GuardError::token_revoked());
        }
        Ok(claims.principal())
    }
}
