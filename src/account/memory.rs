use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Account, AccountDirectory, NewAccount};
use crate::error::{GuardError, Result};

#[derive(Default)]
struct Accounts {
    next_id: i64,
    by_username: HashMap<String, Account>,
}

/// 内存账户表，用于测试和演示
#[derive(Default)]
pub struct MemoryAccountDirectory {
    accounts: RwLock<Accounts>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .by_username
            .values()
            .find(|account| account.email == email)
            .cloned()
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .by_username
            .values()
            .find(|account| account.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.by_username.get(username).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self
            .accounts
            .read()
            .await
            .by_username
            .values()
            .any(|account| account.email == email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        Ok(self.accounts.read().await.by_username.contains_key(username))
    }

    async fn create(&self, account: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.write().await;
        if accounts.by_username.contains_key(&account.username) {
            return Err(GuardError::username_already_exists());
        }
        accounts.next_id += 1;
        let created = Account {
            id: accounts.next_id,
            username: account.username,
            password_hash: account.password_hash,
            email: account.email,
            role: account.role,
            register_time: Utc::now(),
        };
        accounts
            .by_username
            .insert(created.username.clone(), created.clone());
        Ok(created)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let mut accounts = self.accounts.write().await;
        match accounts
            .by_username
            .values_mut()
            .find(|account| account.email == email)
        {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
