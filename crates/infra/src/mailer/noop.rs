//! Noop 送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! SMTP リレーを用意しない環境で使用する。

use async_trait::async_trait;
use mailgate_domain::email::{DeliveryError, EmailMessage};

use super::MailSender;

/// Noop 送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopMailSender;

#[async_trait]
impl MailSender for NoopMailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
