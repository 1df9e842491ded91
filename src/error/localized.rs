//! 可对外暴露的错误信息结构

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::code::ErrorCode;

/// [`GuardError`](super::GuardError) 的可序列化形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedError {
    pub code: ErrorCode,
    pub reason: String,
    /// 底层错误信息，调试用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// 出错的主体，如被限流的 IP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl LocalizedError {
    pub fn new(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
            details: None,
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl fmt::Display for LocalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.reason)
    }
}
