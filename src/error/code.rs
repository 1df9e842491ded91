//! 错误代码定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 错误代码枚举
///
/// 错误代码按类别分组，每个类别占用 1000 个代码：
/// - 1000-1999: 账户相关错误
/// - 2000-2999: 认证相关错误
/// - 3000-3999: 流量控制相关错误
/// - 4000-4999: 验证码相关错误
/// - 6000-6999: 系统相关错误
/// - 8000-8999: 序列化相关错误
/// - 9000-9999: 通用错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ErrorCode {
    // ============================================================
    // 账户相关错误 (1000-1999)
    // ============================================================
    AccountNotFound = 1000,
    EmailAlreadyExists = 1001,
    UsernameAlreadyExists = 1002,

    // ============================================================
    // 认证相关错误 (2000-2999)
    // ============================================================
    AuthenticationFailed = 2000,
    AuthenticationRequired = 2003,
    PermissionDenied = 2004,
    TokenInvalid = 2005,
    TokenExpired = 2006,
    TokenSignatureMismatch = 2007,
    TokenRevoked = 2008,

    // ============================================================
    // 流量控制相关错误 (3000-3999)
    // ============================================================
    RateLimited = 3000,
    Blocked = 3001,
    CodeRequestThrottled = 3002,

    // ============================================================
    // 验证码相关错误 (4000-4999)
    // ============================================================
    CodeNotFound = 4000,
    CodeMismatch = 4001,
    UnknownCodeKind = 4002,

    // ============================================================
    // 系统相关错误 (6000-6999)
    // ============================================================
    InternalError = 6000,
    StoreUnavailable = 6001,
    ConfigurationError = 6003,
    MessagePublishFailed = 6005,

    // ============================================================
    // 序列化相关错误 (8000-8999)
    // ============================================================
    SerializationError = 8000,

    // ============================================================
    // 通用错误 (9000-9999)
    // ============================================================
    InvalidParameter = 9001,
    UnknownError = 9999,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorCode {
    /// 获取错误代码的英文标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            ErrorCode::AuthenticationFailed => "AUTHENTICATION_FAILED",
            ErrorCode::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::TokenInvalid => "TOKEN_INVALID",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::TokenSignatureMismatch => "TOKEN_SIGNATURE_MISMATCH",
            ErrorCode::TokenRevoked => "TOKEN_REVOKED",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::Blocked => "BLOCKED",
            ErrorCode::CodeRequestThrottled => "CODE_REQUEST_THROTTLED",
            ErrorCode::CodeNotFound => "CODE_NOT_FOUND",
            ErrorCode::CodeMismatch => "CODE_MISMATCH",
            ErrorCode::UnknownCodeKind => "UNKNOWN_CODE_KIND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::MessagePublishFailed => "MESSAGE_PUBLISH_FAILED",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
            ErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// 令牌无法使用（格式错误、签名不符、过期或已吊销）
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            ErrorCode::TokenInvalid
                | ErrorCode::TokenSignatureMismatch
                | ErrorCode::TokenExpired
                | ErrorCode::TokenRevoked
        )
    }

    /// 判断是否为可重试的错误（重试策略由调用方决定）
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::StoreUnavailable | ErrorCode::MessagePublishFailed)
    }
}
