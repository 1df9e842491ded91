//! Kafka 邮件投递
//!
//! 此模块需要启用 `kafka` feature 才能使用

pub mod producer_builder;
pub mod producer_config;
pub mod publisher;

pub use producer_builder::build_kafka_producer;
pub use producer_config::{KafkaProducerConfig, MailProducerConfig};
pub use publisher::KafkaMailPublisher;
