//! 邮件投递测试

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;
use warden_core::mail::{
    ChannelMailPublisher, MailListener, MailMessage, MailPublisher, MailTemplate, MailTransport,
    OutgoingMail,
};
use warden_core::{CodeKind, ErrorCode, Result};

#[derive(Clone, Default)]
struct RecordingTransport {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

#[test]
fn test_message_wire_format() {
    let message = MailMessage {
        kind: CodeKind::Reset,
        email: "a@x.com".to_string(),
        code: 123456,
    };
    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"type": "reset", "email": "a@x.com", "code": 123456})
    );
}

#[test]
fn test_template_mentions_code_and_validity() {
    let template = MailTemplate::render(CodeKind::Register, 482913, 3);
    assert!(template.subject.contains("注册验证码"));
    assert!(template.body.contains("482913"));
    assert!(template.body.contains("有效时间：3 分钟"));

    let reset = MailTemplate::render(CodeKind::Reset, 482913, 3);
    assert_ne!(reset.subject, template.subject);
}

#[tokio::test]
async fn test_listener_delivers_published_messages() {
    let (publisher, receiver) = ChannelMailPublisher::unbounded();
    let transport = RecordingTransport::default();
    let listener = MailListener::new(receiver, transport.clone(), 3);

    publisher
        .publish(&MailMessage {
            kind: CodeKind::Modify,
            email: "a@x.com".to_string(),
            code: 654321,
        })
        .await
        .unwrap();
    // 关闭通道后监听器自行退出
    drop(publisher);

    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    listener.run(shutdown_rx).await.unwrap();

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    assert!(sent[0].body.contains("654321"));
}

#[tokio::test]
async fn test_publish_after_receiver_dropped_fails() {
    let (publisher, receiver) = ChannelMailPublisher::unbounded();
    drop(receiver);

    let err = publisher
        .publish(&MailMessage {
            kind: CodeKind::Register,
            email: "a@x.com".to_string(),
            code: 111111,
        })
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::MessagePublishFailed));
}
