//! Kafka 生产者构建器

use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use tracing::info;

use super::producer_config::KafkaProducerConfig;

/// 构建 Kafka 生产者
pub fn build_kafka_producer(
    config: &dyn KafkaProducerConfig,
) -> Result<FutureProducer, rdkafka::error::KafkaError> {
    let mut client = ClientConfig::new();
    client
        .set("bootstrap.servers", config.kafka_bootstrap())
        .set("message.timeout.ms", config.message_timeout_ms().to_string())
        .set("enable.idempotence", config.enable_idempotence().to_string())
        .set("compression.type", config.compression_type())
        .set("linger.ms", config.linger_ms().to_string())
        .set("security.protocol", "plaintext");
    if config.enable_idempotence() {
        // 幂等生产者要求 acks=all
        client.set("acks", "all");
    }
    let producer: FutureProducer = client.create()?;

    info!(
        bootstrap = %config.kafka_bootstrap(),
        timeout_ms = config.message_timeout_ms(),
        idempotence = config.enable_idempotence(),
        "Kafka producer created successfully"
    );

    Ok(producer)
}
