//! 邮件投递
//!
//! 验证码通过消息通道交给外部邮件服务，本模块只负责消息的发布与模板渲染

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::verify::CodeKind;

pub mod channel;
pub mod listener;
pub mod template;

pub use channel::ChannelMailPublisher;
pub use listener::{MailListener, MailTransport, OutgoingMail};
pub use template::MailTemplate;

/// 投递消息：`{type, email, code}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    #[serde(rename = "type")]
    pub kind: CodeKind,
    pub email: String,
    pub code: u32,
}

/// 发布投递消息（发后即忘，不做重试）
#[async_trait]
pub trait MailPublisher: Send + Sync {
    async fn publish(&self, message: &MailMessage) -> Result<()>;
}
