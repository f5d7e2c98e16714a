//! # メール送信記録
//!
//! 送信試行 1 回につき 1 件残る追記専用の記録と、送信基盤へ渡す
//! メッセージ型を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`Email`] | 送信記録（試行ごとに 1 件、作成後は不変） |
//! | [`EmailStatus`] | 送信結果（SUCCEEDED / FAILED の 2 値） |
//! | [`EmailMessage`] | 送信基盤へ渡すメッセージ |
//!
//! ## 設計方針
//!
//! - **結果も記録する**: 送信成功・失敗のどちらでも記録を残す。
//!   記録が残らないのは受信無効による即時拒否のときだけ
//! - **status は生成時に確定**: 作成後に遷移しない

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::user::UserId;

define_uuid_id! {
    /// 送信記録 ID（一意識別子）
    ///
    /// emails テーブルの主キー。UUID v7 を使用。
    pub struct EmailId;
}

/// 送信エラー
///
/// 送信基盤（SMTP など）で発生した失敗。ユースケース層はこのエラーを
/// 呼び出し元へ伝播させず、送信記録の `Failed` ステータスに畳み込む。
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// 宛先または送信元アドレスが不正
    #[error("メールアドレスが不正: {0}")]
    InvalidAddress(String),
}

/// 送信結果
///
/// emails テーブルの `status` カラムに格納される値。
/// SCREAMING_SNAKE_CASE でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailStatus {
    /// 送信基盤がメッセージを受理した
    Succeeded,
    /// 送信基盤がエラーを返した
    Failed,
}

/// メールメッセージ
///
/// 送信基盤に渡す入力。宛先は通知設定の `contact_email` から組み立てる。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// プレーンテキスト本文
    pub body:    String,
}

/// 送信記録エンティティ
///
/// 送信試行時に作成・確定され、以後変更も削除もされない。
#[derive(Debug, Clone)]
pub struct Email {
    id: EmailId,
    subject: String,
    body: String,
    created_on: DateTime<Utc>,
    status: EmailStatus,
    user_id: UserId,
}

impl Email {
    /// 送信記録を作成する
    ///
    /// `subject` / `body` は送信リクエストの値をそのまま保持する。
    /// `status` はここで確定し、以後変更されない。
    pub fn new(
        user_id: UserId,
        subject: String,
        body: String,
        status: EmailStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EmailId::new(),
            subject,
            body,
            created_on: now,
            status,
            user_id,
        }
    }

    /// 永続化済みレコードからエンティティを復元する
    pub fn from_db(
        id: EmailId,
        user_id: UserId,
        subject: String,
        body: String,
        status: EmailStatus,
        created_on: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subject,
            body,
            created_on,
            status,
            user_id,
        }
    }

    pub fn id(&self) -> &EmailId {
        &self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn status(&self) -> EmailStatus {
        self.status
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn email_statusの文字列変換が正しい() {
        // Display (SCREAMING_SNAKE_CASE)
        assert_eq!(EmailStatus::Succeeded.to_string(), "SUCCEEDED");
        assert_eq!(EmailStatus::Failed.to_string(), "FAILED");

        // FromStr
        assert_eq!(
            EmailStatus::from_str("SUCCEEDED").unwrap(),
            EmailStatus::Succeeded
        );
        assert_eq!(EmailStatus::from_str("FAILED").unwrap(), EmailStatus::Failed);
    }

    #[test]
    fn 送信記録はリクエストの件名と本文をそのまま保持する() {
        let now = chrono::Utc::now();
        let email = Email::new(
            UserId::new(),
            "件名".to_string(),
            "本文".to_string(),
            EmailStatus::Succeeded,
            now,
        );

        assert_eq!(email.subject(), "件名");
        assert_eq!(email.body(), "本文");
        assert_eq!(email.created_on(), now);
        assert_eq!(email.status(), EmailStatus::Succeeded);
    }

    #[test]
    fn from_dbで復元した記録が元の値を保持する() {
        let id = EmailId::new();
        let user_id = UserId::new();
        let now = chrono::Utc::now();

        let email = Email::from_db(
            id.clone(),
            user_id.clone(),
            "Hi".to_string(),
            "Body".to_string(),
            EmailStatus::Failed,
            now,
        );

        assert_eq!(email.id(), &id);
        assert_eq!(email.user_id(), &user_id);
        assert_eq!(email.status(), EmailStatus::Failed);
    }
}
