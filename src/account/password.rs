use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::RngCore;

use crate::error::{ErrorCode, InfraResultExt, Result};

/// 密码哈希与校验
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, raw: &str) -> Result<String>;

    /// 校验明文与哈希是否匹配；哈希无法解析时视为不匹配
    fn verify(&self, raw: &str, encoded: &str) -> bool;
}

/// Argon2id，输出 PHC 字符串
#[derive(Default)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> Result<String> {
        let mut salt_bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| anyhow::anyhow!(err.to_string()))
            .into_guard(ErrorCode::InternalError, "failed to encode salt")?;
        let hash = self
            .argon2
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|err| anyhow::anyhow!(err.to_string()))
            .into_guard(ErrorCode::InternalError, "failed to hash password")?;
        Ok(hash.to_string())
    }

    fn verify(&self, raw: &str, encoded: &str) -> bool {
        PasswordHash::new(encoded)
            .map(|parsed| self.argon2.verify_password(raw.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }
}
