use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};

use super::{MailMessage, MailTemplate};
use crate::error::Result;

/// 渲染完成、待发送的邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 邮件发送通道（SMTP 中继、服务商 API 等）
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

/// 从进程内通道消费投递消息，渲染后交给 [`MailTransport`]
///
/// 发送失败只记录日志，消息丢弃
pub struct MailListener<T> {
    receiver: mpsc::UnboundedReceiver<MailMessage>,
    transport: T,
    validity_minutes: u64,
}

impl<T: MailTransport> MailListener<T> {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<MailMessage>,
        transport: T,
        validity_minutes: u64,
    ) -> Self {
        Self {
            receiver,
            transport,
            validity_minutes,
        }
    }

    /// 运行到通道关闭或收到 `shutdown_rx` 信号
    pub async fn run(mut self, mut shutdown_rx: oneshot::Receiver<()>) -> Result<()> {
        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("mail listener shutting down");
                    return Ok(());
                }
                message = self.receiver.recv() => {
                    match message {
                        Some(message) => self.deliver(message).await,
                        None => {
                            warn!("mail channel closed, listener exiting");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn deliver(&self, message: MailMessage) {
        let template = MailTemplate::render(message.kind, message.code, self.validity_minutes);
        let mail = OutgoingMail {
            to: message.email.clone(),
            subject: template.subject,
            body: template.body,
        };
        match self.transport.send(mail).await {
            Ok(()) => info!(email = %message.email, kind = %message.kind, "verification mail sent"),
            Err(err) => error!(email = %message.email, error = %err, "failed to send verification mail"),
        }
    }
}
