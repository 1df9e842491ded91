//! 流量控制
//!
//! 按主体（通常是客户端 IP）的短窗口计数，超限后升级为固定时长封禁

pub mod keyed_mutex;
pub mod limiter;

pub use keyed_mutex::{KeyedGuard, KeyedMutex};
pub use limiter::{FlowDecision, RateLimiter};
