use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::Principal;
use crate::config::JwtConfig;
use crate::error::{GuardError, Result};

/// 会话令牌的 JWT 声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub jti: String,
    pub id: i64,
    pub name: String,
    pub authorizes: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// 新签发的令牌及其声明
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// 基于 HMAC (HS256) 的无状态令牌编解码
///
/// 校验不涉及吊销状态，由调用方另行检查
pub struct TokenCodec {
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// 使用 `secret` 签名，令牌有效期为 `lifetime`
    pub fn new(secret: impl AsRef<[u8]>, lifetime: Duration) -> Self {
        let secret = secret.as_ref();
        let mut validation = Validation::new(Algorithm::HS256);
        // 过期由调用方传入的 `now` 判断
        validation.validate_exp = false;
        Self {
            lifetime,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes(), config.lifetime())
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// 为 `principal` 签发令牌，有效期从 `now`（截断到秒）起算
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<IssuedToken> {
        let now = now.trunc_subsecs(0);
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| GuardError::configuration("token lifetime out of range"))?;
        let claims = TokenClaims {
            jti: Uuid::new_v4().to_string(),
            id: principal.subject_id,
            name: principal.username.clone(),
            authorizes: principal.roles.iter().cloned().collect(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| GuardError::system(format!("failed to encode token: {err}")))?;

        debug!(jti = %claims.jti, subject = claims.id, exp = claims.exp, "token issued");
        Ok(IssuedToken { token, claims })
    }

    /// 校验签名、结构以及 `now` 时刻是否过期
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims> {
        let claims = self.decode_claims(token)?;
        if now > claims.expires_at() {
            return Err(GuardError::token_expired());
        }
        Ok(claims)
    }

    /// 读取签名正确的令牌 ID，不论是否过期
    pub fn extract_id(&self, token: &str) -> Result<Uuid> {
        self.decode_claims(token)?.token_id()
    }

    /// 读取签名正确的令牌的过期时间，不论是否过期
    pub fn extract_expiry(&self, token: &str) -> Result<DateTime<Utc>> {
        Ok(self.decode_claims(token)?.expires_at())
    }

    fn decode_claims(&self, token: &str) -> Result<TokenClaims> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => GuardError::token_signature_mismatch(),
                _ => GuardError::token_invalid(format!("malformed token: {err}")),
            })?;
        // 无法解析 ID 的令牌无法吊销
        claims.token_id()?;
        Ok(claims)
    }
}

impl TokenClaims {
    pub fn token_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.jti)
            .map_err(|_| GuardError::token_invalid("token id is not a uuid"))
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.name.clone(), self.authorizes.iter().cloned())
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// `now` 时刻的剩余有效期，过期后为零或负数
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at() - now
    }
}

/// 去掉 `Bearer ` 前缀，其他格式视为没有令牌
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
