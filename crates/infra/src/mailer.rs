//! # メール送信
//!
//! メール配送を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（Mailpit / リレー経由）、Noop（送信無効時）
//! - **環境変数切替**: `MAILER_BACKEND` でランタイム選択
//! - **Result で返す**: 配送失敗は [`DeliveryError`] として返し、
//!   呼び出し側が送信記録のステータスに畳み込む

mod noop;
mod smtp;

use async_trait::async_trait;
use mailgate_domain::email::{DeliveryError, EmailMessage};
pub use noop::NoopMailSender;
pub use smtp::SmtpMailSender;

/// メール送信トレイト
///
/// 送信基盤の中核。メール送信の具体的な方法を抽象化する。
#[async_trait]
pub trait MailSender: Send + Sync {
    /// メールを送信する
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}
