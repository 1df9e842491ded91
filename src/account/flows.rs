use std::sync::Arc;

use tracing::{info, warn};

use super::{Account, AccountDirectory, AccountView, DEFAULT_ROLE, NewAccount, PasswordEncoder};
use crate::error::{GuardError, Result};
use crate::verify::OneTimeCodeIssuer;

/// 注册、重置密码与账户查询
///
/// 注册和重置都以邮箱验证码为前提；账户写入成功后验证码才被删除，
/// 写入失败时可以用同一验证码重试
pub struct AccountFlows {
    accounts: Arc<dyn AccountDirectory>,
    encoder: Arc<dyn PasswordEncoder>,
    codes: Arc<OneTimeCodeIssuer>,
}

impl AccountFlows {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        encoder: Arc<dyn PasswordEncoder>,
        codes: Arc<OneTimeCodeIssuer>,
    ) -> Self {
        Self {
            accounts,
            encoder,
            codes,
        }
    }

    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        code: &str,
    ) -> Result<Account> {
        let account = self
            .codes
            .consume_with(email, code, move || async move {
                if self.accounts.exists_by_email(email).await? {
                    return Err(GuardError::email_already_exists());
                }
                if self.accounts.exists_by_username(username).await? {
                    return Err(GuardError::username_already_exists());
                }
                self.accounts
                    .create(NewAccount {
                        username: username.to_string(),
                        password_hash: self.encoder.encode(password)?,
                        email: email.to_string(),
                        role: DEFAULT_ROLE.to_string(),
                    })
                    .await
            })
            .await?;

        info!(subject = account.id, username = %account.username, "account registered");
        Ok(account)
    }

    pub async fn reset_confirm(&self, email: &str, code: &str) -> Result<()> {
        self.codes.confirm_code(email, code).await
    }

    pub async fn reset_password(&self, email: &str, code: &str, password: &str) -> Result<()> {
        self.codes
            .consume_with(email, code, move || async move {
                let hash = self.encoder.encode(password)?;
                if !self.accounts.update_password(email, &hash).await? {
                    warn!(email = %email, "password reset for unknown email");
                    return Err(GuardError::account_not_found());
                }
                Ok::<_, GuardError>(())
            })
            .await?;

        info!(email = %email, "password reset");
        Ok(())
    }

    /// 按账户 ID 读取对外可见的账户信息
    pub async fn account_info(&self, id: i64) -> Result<AccountView> {
        self.accounts
            .find_by_id(id)
            .await?
            .map(AccountView::from)
            .ok_or_else(GuardError::account_not_found)
    }
}
