//! 账户协作方接口
//!
//! 账户的持久化不在本库范围内，这里只定义认证流程需要的能力

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod flows;
pub mod memory;
pub mod password;

pub use flows::AccountFlows;
pub use memory::MemoryAccountDirectory;
pub use password::{Argon2PasswordEncoder, PasswordEncoder};

/// 默认注册角色
pub const DEFAULT_ROLE: &str = "user";

/// 账户记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    /// 密码哈希（PHC 字符串）
    pub password_hash: String,
    pub email: String,
    pub role: String,
    pub register_time: DateTime<Utc>,
}

/// 待创建的账户
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

/// 对外返回的账户信息，不含密码哈希
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub register_time: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            role: account.role,
            register_time: account.register_time,
        }
    }
}

/// 账户查询与写入能力
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    /// 创建账户并返回分配的记录
    async fn create(&self, account: NewAccount) -> Result<Account>;

    /// 按邮箱更新密码哈希，返回是否命中账户
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool>;
}
