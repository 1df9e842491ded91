//! HTTP 错误映射
//!
//! 将错误代码映射为 HTTP 状态码，并以统一的 `{code, data, message}` 结构返回

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::{ErrorCode, GuardError};

/// 统一响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            data: Some(data),
            message: "ok".to_string(),
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            data: None,
            message: message.into(),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            data: None,
            message: "ok".to_string(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// 错误代码到 HTTP 状态码的映射
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::AuthenticationFailed
        | ErrorCode::AuthenticationRequired
        | ErrorCode::TokenInvalid
        | ErrorCode::TokenExpired
        | ErrorCode::TokenSignatureMismatch
        | ErrorCode::TokenRevoked => StatusCode::UNAUTHORIZED,
        ErrorCode::PermissionDenied | ErrorCode::RateLimited | ErrorCode::Blocked => {
            StatusCode::FORBIDDEN
        }
        ErrorCode::CodeRequestThrottled
        | ErrorCode::CodeNotFound
        | ErrorCode::CodeMismatch
        | ErrorCode::UnknownCodeKind
        | ErrorCode::AccountNotFound
        | ErrorCode::EmailAlreadyExists
        | ErrorCode::UsernameAlreadyExists
        | ErrorCode::InvalidParameter
        | ErrorCode::SerializationError => StatusCode::BAD_REQUEST,
        ErrorCode::StoreUnavailable | ErrorCode::MessagePublishFailed => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorCode::InternalError | ErrorCode::ConfigurationError | ErrorCode::UnknownError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        match self {
            GuardError::Localized { code, reason, details, .. } => {
                let status = status_for(code);
                if status.is_server_error() {
                    error!(code = %code, details = ?details, "request failed");
                }
                ApiResponse::<()>::failure(status, reason).into_response()
            }
            GuardError::System(msg) => {
                error!(error = %msg, "internal error");
                ApiResponse::<()>::failure(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
                    .into_response()
            }
        }
    }
}
