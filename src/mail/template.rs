use crate::verify::CodeKind;

/// 验证码邮件的标题与正文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailTemplate {
    pub subject: String,
    pub body: String,
}

impl MailTemplate {
    pub fn render(kind: CodeKind, code: u32, validity_minutes: u64) -> Self {
        let (subject, intro, warning) = match kind {
            CodeKind::Register => (
                "【系统通知】注册验证码",
                "欢迎注册我们的网站！",
                "如非本人操作，请忽略此邮件",
            ),
            CodeKind::Reset => (
                "【系统通知】密码重置验证码",
                "您正在进行密码重置操作。",
                "如非本人操作，请及时联系客服",
            ),
            CodeKind::Modify => (
                "【系统通知】修改邮件验证码",
                "您正在进行修改邮件操作。",
                "如非本人操作，请及时联系客服",
            ),
        };

        let body = format!(
            "您好！\n\n{intro}\n\n您的邮箱验证码为：{code}\n\n\
             有效时间：{validity_minutes} 分钟\n\n\
             - 请勿将验证码泄露给他人\n- {warning}\n\n\
             此邮件由系统自动发送，请勿回复。\n"
        );

        Self {
            subject: subject.to_string(),
            body,
        }
    }
}
