#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc::UnboundedReceiver;
use warden_core::account::{
    AccountDirectory, Argon2PasswordEncoder, MemoryAccountDirectory, NewAccount, PasswordEncoder,
};
use warden_core::mail::{ChannelMailPublisher, MailMessage};
use warden_core::server::{AppState, Collaborators};
use warden_core::verify::SequenceCodeGenerator;
use warden_core::{GuardConfig, ManualClock, MemoryKvStore};

pub const SECRET: &str = "integration-test-secret";

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// 内存存储 + 手动时钟的完整测试环境
pub struct Fixture {
    pub config: GuardConfig,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemoryKvStore>,
    pub accounts: Arc<MemoryAccountDirectory>,
    pub encoder: Arc<Argon2PasswordEncoder>,
    pub mail: UnboundedReceiver<MailMessage>,
    pub state: AppState,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_codes([123456])
    }

    pub fn with_codes(codes: impl IntoIterator<Item = u32>) -> Self {
        let config = GuardConfig::with_secret(SECRET);
        let clock = Arc::new(ManualClock::new(epoch()));
        let store = Arc::new(MemoryKvStore::with_clock(clock.clone()));
        let accounts = Arc::new(MemoryAccountDirectory::new());
        let encoder = Arc::new(Argon2PasswordEncoder::new());
        let (publisher, mail) = ChannelMailPublisher::unbounded();

        let state = AppState::new(
            &config,
            Collaborators {
                store: store.clone(),
                accounts: accounts.clone(),
                encoder: encoder.clone(),
                publisher: Arc::new(publisher),
                generator: Arc::new(SequenceCodeGenerator::new(codes)),
                clock: clock.clone(),
            },
        );

        Self {
            config,
            clock,
            store,
            accounts,
            encoder,
            mail,
            state,
        }
    }

    pub async fn add_account(&self, username: &str, password: &str, email: &str) {
        self.accounts
            .create(NewAccount {
                username: username.to_string(),
                password_hash: self.encoder.encode(password).unwrap(),
                email: email.to_string(),
                role: "user".to_string(),
            })
            .await
            .unwrap();
    }
}
