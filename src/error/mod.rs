//! 错误处理模块
//!
//! 提供统一的错误处理机制，支持错误代码分类、HTTP 映射和错误转换

pub mod builder;
pub mod code;
pub mod conversions;
pub mod guard_error;
pub mod http;
pub mod localized;

pub use builder::ErrorBuilder;
pub use code::ErrorCode;
pub use guard_error::{GuardError, Result};
pub use self::http::{ApiResponse, status_for};
pub use localized::LocalizedError;

/// 基础设施层默认使用的结果类型
pub type InfraResult<T> = anyhow::Result<T>;

/// 将基础设施错误转换为 `GuardError`
pub fn map_infra_error<E, S>(error: E, code: ErrorCode, message: S) -> GuardError
where
    E: std::fmt::Display,
    S: Into<String>,
{
    ErrorBuilder::new(code, message.into())
        .details(error.to_string())
        .build()
}

/// `InfraResult` 的辅助扩展，用于快速转换为统一的业务错误类型
pub trait InfraResultExt<T> {
    fn into_guard<S>(self, code: ErrorCode, message: S) -> Result<T>
    where
        S: Into<String>;
}

impl<T> InfraResultExt<T> for InfraResult<T> {
    fn into_guard<S>(self, code: ErrorCode, message: S) -> Result<T>
    where
        S: Into<String>,
    {
        self.map_err(|err| map_infra_error(err, code, message))
    }
}
