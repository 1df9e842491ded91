use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::token::bearer_token;
use super::{Principal, RevocationStore, RevokeOutcome, TokenCodec};
use crate::account::{AccountDirectory, PasswordEncoder};
use crate::clock::Clock;
use crate::error::{GuardError, Result};

/// 登录成功：签发的令牌及其持有者
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub expire: DateTime<Utc>,
    pub principal: Principal,
    pub role: String,
}

/// 登录成功的响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeView {
    pub username: String,
    pub role: String,
    pub token: String,
    pub expire: DateTime<Utc>,
}

impl From<LoginOutcome> for AuthorizeView {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            username: outcome.principal.username,
            role: outcome.role,
            token: outcome.token,
            expire: outcome.expire,
        }
    }
}

/// 注销结果，每种结果都意味着令牌不再可用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    Revoked,
    AlreadyRevoked,
    AlreadyExpired,
}

impl From<RevokeOutcome> for LogoutOutcome {
    fn from(outcome: RevokeOutcome) -> Self {
        match outcome {
            RevokeOutcome::Revoked => LogoutOutcome::Revoked,
            RevokeOutcome::AlreadyRevoked => LogoutOutcome::AlreadyRevoked,
            RevokeOutcome::AlreadyExpired => LogoutOutcome::AlreadyExpired,
        }
    }
}

/// 登录与注销
///
/// 注销是幂等的：已吊销或已过期的令牌返回对应的 [`LogoutOutcome`]，
/// 只有无法解码的令牌才会失败
pub struct LoginOutcomeHandler {
    accounts: Arc<dyn AccountDirectory>,
    encoder: Arc<dyn PasswordEncoder>,
    codec: Arc<TokenCodec>,
    revocations: RevocationStore,
    clock: Arc<dyn Clock>,
}

impl LoginOutcomeHandler {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        encoder: Arc<dyn PasswordEncoder>,
        codec: Arc<TokenCodec>,
        revocations: RevocationStore,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            encoder,
            codec,
            revocations,
            clock,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let account = match self.accounts.find_by_username(username).await? {
            Some(account) if self.encoder.verify(password, &account.password_hash) => account,
            _ => {
                warn!(username = %username, "login rejected");
                return Err(GuardError::authentication_failed("invalid username or password"));
            }
        };

        let principal = Principal::new(account.id, account.username.clone(), [account.role.clone()]);
        let issued = self.codec.issue(&principal, self.clock.now())?;
        info!(subject = account.id, jti = %issued.claims.jti, "login succeeded");

        Ok(LoginOutcome {
            expire: issued.expires_at(),
            token: issued.token,
            principal,
            role: account.role,
        })
    }

    /// 吊销 `Authorization` 头中的 Bearer 令牌
    pub async fn logout(&self, authorization: Option<&str>) -> Result<LogoutOutcome> {
        let token = bearer_token(authorization)
            .ok_or_else(|| GuardError::token_invalid("missing bearer token"))?;
        let token_id = self.codec.extract_id(token)?;
        let expiry = self.codec.extract_expiry(token)?;
        let outcome = self
            .revocations
            .mark_revoked(&token_id, expiry - self.clock.now())
            .await?;
        info!(jti = %token_id, outcome = ?outcome, "logout");
        Ok(outcome.into())
    }
}
