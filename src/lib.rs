//! Warden Core
//!
//! HTTP 服务的会话认证：带吊销名单的 JWT 会话、按 IP 的限流与临时封禁、
//! 一次性邮箱验证码，统一存放在带过期时间的键值存储中

pub mod account;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod flow;
pub mod mail;
pub mod middleware;
pub mod server;
pub mod store;
pub mod telemetry;
pub mod verify;

// Kafka 投递（可选）
#[cfg(feature = "kafka")]
pub mod kafka;

// 重新导出
pub use account::{AccountDirectory, AccountFlows, Argon2PasswordEncoder, PasswordEncoder};
pub use auth::{
    Authenticated, LoginOutcome, LoginOutcomeHandler, LogoutOutcome, Principal, RequestContext,
    RevocationStore, RevokeOutcome, SessionAuthenticator, TokenClaims, TokenCodec,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GuardConfig;
pub use error::{ApiResponse, ErrorCode, GuardError, LocalizedError, Result};
pub use flow::{FlowDecision, RateLimiter};
pub use mail::{ChannelMailPublisher, MailMessage, MailPublisher};
pub use middleware::{FlowLimitLayer, SessionLayer};
pub use server::{AppState, Collaborators, router, serve};
pub use store::{KvStore, MemoryKvStore, RedisKvStore};
pub use verify::{CodeDelivery, CodeKind, OneTimeCodeIssuer};

#[cfg(feature = "kafka")]
pub use kafka::KafkaMailPublisher;
