//! 存储键命名空间

/// 吊销名单前缀
pub const TOKEN_BLACKLIST: &str = "blacklist:";

/// 流量计数器前缀
pub const FLOW_LIMIT_COUNTER: &str = "flow:counter:";

/// 流量封禁标记前缀
pub const FLOW_LIMIT_BLOCK: &str = "flow:block:";

/// 邮箱验证码前缀
pub const VERIFY_EMAIL_DATA: &str = "verify:email:data:";

/// 验证码申请频率限制前缀
pub const VERIFY_EMAIL_LIMIT: &str = "verify:email:limit:";

pub fn blacklist(token_id: &str) -> String {
    format!("{TOKEN_BLACKLIST}{token_id}")
}

pub fn flow_counter(subject: &str) -> String {
    format!("{FLOW_LIMIT_COUNTER}{subject}")
}

pub fn flow_block(subject: &str) -> String {
    format!("{FLOW_LIMIT_BLOCK}{subject}")
}

pub fn verify_code(email: &str) -> String {
    format!("{VERIFY_EMAIL_DATA}{email}")
}

pub fn verify_limit(ip: &str) -> String {
    format!("{VERIFY_EMAIL_LIMIT}{ip}")
}
