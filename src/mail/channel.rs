use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MailMessage, MailPublisher};
use crate::error::{GuardError, Result};

/// 进程内通道，消费端通常是 [`MailListener`](super::MailListener)
#[derive(Clone)]
pub struct ChannelMailPublisher {
    sender: mpsc::UnboundedSender<MailMessage>,
}

impl ChannelMailPublisher {
    pub fn unbounded() -> (Self, mpsc::UnboundedReceiver<MailMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl MailPublisher for ChannelMailPublisher {
    async fn publish(&self, message: &MailMessage) -> Result<()> {
        self.sender
            .send(message.clone())
            .map_err(|_| GuardError::publish_failed("mail channel closed"))
    }
}
