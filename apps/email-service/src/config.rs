//! # Email Service 設定
//!
//! 環境変数から Email Service サーバーの設定を読み込む。

use std::env;

/// Email Service サーバーの設定
#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// メール送信設定
    pub mailer: MailerConfig,
}

/// メール送信の設定
///
/// `MAILER_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `smtp`: Mailpit（開発）/ SMTP リレー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// 送信バックエンド（"smtp" | "noop"）
    pub backend:      String,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
}

impl EmailServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("EMAIL_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("EMAIL_SERVICE_PORT")
                .expect("EMAIL_SERVICE_PORT が設定されていません（.env を確認してください）")
                .parse()
                .expect("EMAIL_SERVICE_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL が設定されていません（.env を確認してください）"),
            mailer: MailerConfig::from_env(),
        })
    }
}

impl MailerConfig {
    /// 環境変数からメール送信設定を読み込む
    fn from_env() -> Self {
        Self {
            backend:      env::var("MAILER_BACKEND").unwrap_or_else(|_| "noop".to_string()),
            smtp_host:    env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port:    env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            from_address: env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "noreply@mailgate.example.com".to_string()),
        }
    }
}
