//! 错误类型转换实现

use super::{ErrorCode, GuardError, LocalizedError};
use std::io;

impl From<io::Error> for GuardError {
    fn from(err: io::Error) -> Self {
        GuardError::system(format!("io error: {err}"))
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::localized(ErrorCode::SerializationError, format!("json error: {err}"))
    }
}

impl From<redis::RedisError> for GuardError {
    fn from(err: redis::RedisError) -> Self {
        GuardError::store_unavailable(err.to_string())
    }
}

impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::configuration(format!("invalid configuration: {err}"))
    }
}

impl From<LocalizedError> for GuardError {
    fn from(err: LocalizedError) -> Self {
        GuardError::Localized {
            code: err.code,
            reason: err.reason,
            details: err.details,
            params: err.params,
            timestamp: err.timestamp,
        }
    }
}
