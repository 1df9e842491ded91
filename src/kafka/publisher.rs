//! 基于 Kafka 的验证码邮件发布

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord};
use tracing::debug;

use super::producer_builder::build_kafka_producer;
use super::producer_config::KafkaProducerConfig;
use crate::error::{GuardError, Result};
use crate::mail::{MailMessage, MailPublisher};

/// 以邮箱为 key 将投递消息写入指定 topic
pub struct KafkaMailPublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaMailPublisher {
    pub fn new(producer: FutureProducer, topic: impl Into<String>) -> Self {
        Self {
            producer,
            topic: topic.into(),
        }
    }

    pub fn from_config(config: &dyn KafkaProducerConfig, topic: impl Into<String>) -> Result<Self> {
        let producer = build_kafka_producer(config).map_err(|err| {
            GuardError::configuration(format!("failed to create kafka producer: {err}"))
        })?;
        Ok(Self::new(producer, topic))
    }
}

#[async_trait]
impl MailPublisher for KafkaMailPublisher {
    async fn publish(&self, message: &MailMessage) -> Result<()> {
        let payload = serde_json::to_vec(message)?;
        let record = FutureRecord::to(&self.topic)
            .key(message.email.as_str())
            .payload(&payload);
        self.producer
            .send(record, Duration::from_secs(0))
            .await
            .map_err(|(err, _)| GuardError::publish_failed(err.to_string()))?;
        debug!(topic = %self.topic, kind = %message.kind, "mail message published");
        Ok(())
    }
}
