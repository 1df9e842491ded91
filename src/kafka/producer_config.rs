//! Kafka 生产者配置 Trait

use crate::config::MailConfig;

/// Kafka 生产者配置
///
/// 默认值面向验证码邮件：消息小、量低，优先保证不重复投递
pub trait KafkaProducerConfig: Send + Sync {
    /// Kafka Bootstrap Servers 地址
    fn kafka_bootstrap(&self) -> &str;

    /// 消息超时时间（毫秒），默认 5000
    fn message_timeout_ms(&self) -> u64 {
        5000
    }

    /// 是否启用幂等性，默认 true
    fn enable_idempotence(&self) -> bool {
        true
    }

    /// 压缩类型，默认 "none"
    fn compression_type(&self) -> &str {
        "none"
    }

    /// 批量发送延迟（毫秒），默认 5ms
    fn linger_ms(&self) -> u64 {
        5
    }
}

/// 从邮件配置构造的生产者配置
#[derive(Debug, Clone)]
pub struct MailProducerConfig {
    pub bootstrap: String,
}

impl MailProducerConfig {
    pub fn from_mail_config(config: &MailConfig) -> Option<Self> {
        config.kafka_bootstrap.as_ref().map(|bootstrap| Self {
            bootstrap: bootstrap.clone(),
        })
    }
}

impl KafkaProducerConfig for MailProducerConfig {
    fn kafka_bootstrap(&self) -> &str {
        &self.bootstrap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_config_requires_bootstrap() {
        let mut mail = MailConfig::default();
        assert!(MailProducerConfig::from_mail_config(&mail).is_none());

        mail.kafka_bootstrap = Some("localhost:9092".to_string());
        let config = MailProducerConfig::from_mail_config(&mail).unwrap();
        assert_eq!(config.kafka_bootstrap(), "localhost:9092");
        assert!(config.enable_idempotence());
    }
}
