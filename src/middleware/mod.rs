//! HTTP 中间件模块
//!
//! 提供按 IP 限流和会话解析两层，限流在外层先执行

pub mod flow_limit;
pub mod session;

pub use flow_limit::{ClientIp, FlowLimitLayer, FlowLimitService, client_ip};
pub use session::{SessionLayer, SessionService};
