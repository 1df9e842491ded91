//! 统一错误类型

use super::code::ErrorCode;
use super::localized::LocalizedError;
use std::collections::HashMap;
use thiserror::Error;

/// 统一错误类型
#[derive(Error, Debug, Clone)]
pub enum GuardError {
    /// 业务错误（可暴露给调用方）
    #[error("error [{code}] {reason}", code = .code.as_str())]
    Localized {
        code: ErrorCode,
        reason: String,
        details: Option<String>,
        params: Option<HashMap<String, String>>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// 系统错误（内部使用，不暴露细节）
    #[error("system error: {0}")]
    System(String),
}

impl GuardError {
    pub fn localized(code: ErrorCode, reason: impl Into<String>) -> Self {
        GuardError::Localized {
            code,
            reason: reason.into(),
            details: None,
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn system(msg: impl Into<String>) -> Self {
        GuardError::System(msg.into())
    }

    // ============================================================
    // 认证相关错误
    // ============================================================

    pub fn authentication_failed(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::AuthenticationFailed, reason)
    }

    pub fn authentication_required() -> Self {
        Self::localized(ErrorCode::AuthenticationRequired, "authentication required")
    }

    pub fn token_invalid(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::TokenInvalid, reason)
    }

    pub fn token_signature_mismatch() -> Self {
        Self::localized(ErrorCode::TokenSignatureMismatch, "token signature mismatch")
    }

    pub fn token_expired() -> Self {
        Self::localized(ErrorCode::TokenExpired, "token expired")
    }

    pub fn token_revoked() -> Self {
        Self::localized(ErrorCode::TokenRevoked, "token revoked")
    }

    // ============================================================
    // 流量控制相关错误
    // ============================================================

    pub fn rate_limited(subject: impl Into<String>) -> Self {
        Self::with_param(
            ErrorCode::RateLimited,
            "too many requests, please try again later",
            "subject",
            subject,
        )
    }

    pub fn blocked(subject: impl Into<String>) -> Self {
        Self::with_param(
            ErrorCode::Blocked,
            "too many requests, please try again later",
            "subject",
            subject,
        )
    }

    pub fn code_request_throttled() -> Self {
        Self::localized(
            ErrorCode::CodeRequestThrottled,
            "code requested too frequently, please try again later",
        )
    }

    // ============================================================
    // 验证码相关错误
    // ============================================================

    pub fn code_not_found() -> Self {
        Self::localized(ErrorCode::CodeNotFound, "please request a verification code first")
    }

    pub fn code_mismatch() -> Self {
        Self::localized(ErrorCode::CodeMismatch, "verification code is incorrect")
    }

    pub fn unknown_code_kind(kind: impl Into<String>) -> Self {
        Self::with_param(
            ErrorCode::UnknownCodeKind,
            "unknown verification code type",
            "type",
            kind,
        )
    }

    // ============================================================
    // 账户相关错误
    // ============================================================

    pub fn email_already_exists() -> Self {
        Self::localized(ErrorCode::EmailAlreadyExists, "email is already registered")
    }

    pub fn username_already_exists() -> Self {
        Self::localized(ErrorCode::UsernameAlreadyExists, "username is already taken")
    }

    pub fn account_not_found() -> Self {
        Self::localized(ErrorCode::AccountNotFound, "account not found")
    }

    // ============================================================
    // 系统相关错误
    // ============================================================

    pub fn store_unavailable(details: impl Into<String>) -> Self {
        GuardError::Localized {
            code: ErrorCode::StoreUnavailable,
            reason: "key-value store unavailable".to_string(),
            details: Some(details.into()),
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::ConfigurationError, reason)
    }

    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::localized(ErrorCode::InvalidParameter, reason)
    }

    pub fn publish_failed(details: impl Into<String>) -> Self {
        GuardError::Localized {
            code: ErrorCode::MessagePublishFailed,
            reason: "failed to publish message".to_string(),
            details: Some(details.into()),
            params: None,
            timestamp: chrono::Utc::now(),
        }
    }

    fn with_param(
        code: ErrorCode,
        reason: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Self {
        let mut params = HashMap::new();
        params.insert(key.to_string(), value.into());
        GuardError::Localized {
            code,
            reason: reason.to_string(),
            details: None,
            params: Some(params),
            timestamp: chrono::Utc::now(),
        }
    }

    // ============================================================
    // 信息获取方法
    // ============================================================

    /// 获取错误代码
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            GuardError::Localized { code, .. } => Some(*code),
            GuardError::System(_) => None,
        }
    }

    /// 判断是否为指定错误代码
    pub fn is(&self, expected: ErrorCode) -> bool {
        self.code() == Some(expected)
    }

    /// 获取错误原因
    pub fn reason(&self) -> &str {
        match self {
            GuardError::Localized { reason, .. } => reason,
            GuardError::System(msg) => msg,
        }
    }

    /// 转换为可序列化错误
    pub fn to_localized(self) -> LocalizedError {
        match self {
            GuardError::Localized {
                code,
                reason,
                details,
                params,
                timestamp,
            } => LocalizedError {
                code,
                reason,
                details,
                params,
                timestamp,
            },
            GuardError::System(msg) => LocalizedError::new(ErrorCode::InternalError, msg),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.code().is_some_and(|code| code.is_retryable())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, GuardError>;
