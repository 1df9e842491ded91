//! 基础设施错误的构建

use super::{ErrorCode, GuardError};

/// 由错误代码、原因和底层错误详情组装 [`GuardError`]
pub struct ErrorBuilder {
    code: ErrorCode,
    reason: String,
    details: Option<String>,
}

impl ErrorBuilder {
    pub fn new(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
            details: None,
        }
    }

    /// 附带底层错误信息，仅用于日志排查
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn build(self) -> GuardError {
        GuardError::Localized {
            code: self.code,
            reason: self.reason,
            details: self.details,
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }
}
