//! 配置模块
//!
//! 从 TOML 文件加载，除签名密钥外每一项都有默认值

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GuardConfig {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// 令牌签发配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC 签名密钥
    pub secret: String,
    /// 令牌有效期（天）
    #[serde(default = "default_expire_days")]
    pub expire_days: u32,
}

/// 按 IP 的流量限制配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowConfig {
    /// 计数窗口（秒）
    #[serde(default = "default_flow_window")]
    pub window_secs: u64,
    /// 窗口内允许的请求数
    #[serde(default = "default_flow_threshold")]
    pub threshold: u64,
    /// 超限后的封禁时长（秒）
    #[serde(default = "default_flow_block")]
    pub block_secs: u64,
}

/// 邮箱验证码配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// 验证码有效期（分钟）
    #[serde(default = "default_code_ttl")]
    pub code_ttl_minutes: u64,
    /// 同一 IP 两次申请的最小间隔（秒）
    #[serde(default = "default_code_cooldown")]
    pub cooldown_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// 邮件投递通道名
    #[serde(default = "default_mail_topic")]
    pub topic: String,
    /// Kafka bootstrap 地址（启用 kafka feature 时使用）
    #[serde(default)]
    pub kafka_bootstrap: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// 令牌有效期上限（天）
pub const MAX_EXPIRE_DAYS: u32 = 3650;
/// 验证码有效期上限（分钟）
pub const MAX_CODE_TTL_MINUTES: u64 = 24 * 60;
/// 限流窗口、封禁与申请间隔的上限（秒）
pub const MAX_PERIOD_SECS: u64 = 30 * 24 * 3600;

fn default_expire_days() -> u32 {
    7
}

fn default_flow_window() -> u64 {
    3
}

fn default_flow_threshold() -> u64 {
    10
}

fn default_flow_block() -> u64 {
    30
}

fn default_code_ttl() -> u64 {
    3
}

fn default_code_cooldown() -> u64 {
    60
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_mail_topic() -> String {
    "mail".to_string()
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            window_secs: default_flow_window(),
            threshold: default_flow_threshold(),
            block_secs: default_flow_block(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: default_code_ttl(),
            cooldown_secs: default_code_cooldown(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            topic: default_mail_topic(),
            kafka_bootstrap: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expire_days: default_expire_days(),
        }
    }

    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.expire_days))
    }
}

impl FlowConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn block(&self) -> Duration {
        Duration::from_secs(self.block_secs)
    }
}

impl VerifyConfig {
    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(self.code_ttl_minutes.saturating_mul(60))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl GuardConfig {
    /// 使用给定密钥和默认值创建配置
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig::new(secret),
            flow: FlowConfig::default(),
            verify: VerifyConfig::default(),
            redis: RedisConfig::default(),
            mail: MailConfig::default(),
            server: ServerConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GuardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt.secret.trim().is_empty() {
            return Err(GuardError::configuration("jwt.secret must not be empty"));
        }
        if self.jwt.expire_days == 0 || self.jwt.expire_days > MAX_EXPIRE_DAYS {
            return Err(GuardError::configuration(format!(
                "jwt.expire_days must be between 1 and {MAX_EXPIRE_DAYS}"
            )));
        }
        if self.flow.window_secs == 0 || self.flow.block_secs == 0 {
            return Err(GuardError::configuration(
                "flow.window_secs and flow.block_secs must be positive",
            ));
        }
        if self.flow.threshold == 0 {
            return Err(GuardError::configuration("flow.threshold must be positive"));
        }
        if self.verify.code_ttl_minutes == 0 || self.verify.cooldown_secs == 0 {
            return Err(GuardError::configuration(
                "verify.code_ttl_minutes and verify.cooldown_secs must be positive",
            ));
        }
        if self.verify.code_ttl_minutes > MAX_CODE_TTL_MINUTES {
            return Err(GuardError::configuration(format!(
                "verify.code_ttl_minutes must not exceed {MAX_CODE_TTL_MINUTES}"
            )));
        }
        let longest = [self.flow.window_secs, self.flow.block_secs, self.verify.cooldown_secs];
        if longest.iter().any(|secs| *secs > MAX_PERIOD_SECS) {
            return Err(GuardError::configuration(format!(
                "flow and cooldown periods must not exceed {MAX_PERIOD_SECS} seconds"
            )));
        }
        Ok(())
    }
}
