//! # メール通知設定
//!
//! ユーザーごとの受信可否と送信先アドレスを保持するエンティティを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`EmailPreference`] | 通知設定（ユーザーにつき 1 件） |
//! | [`ContactEmail`] | 送信先メールアドレス（値オブジェクト） |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: ID・アドレスを専用型でラップし、型安全性を確保
//! - **不変性**: フィールドは非公開、変更はメソッド経由
//! - **更新時刻の扱い**: upsert は `updated_on` を更新するが、
//!   `enabled` のみの切り替え（[`EmailPreference::change_enabled`]）は更新しない

use chrono::{DateTime, Utc};

use crate::{DomainError, user::UserId};

define_uuid_id! {
    /// 通知設定 ID（一意識別子）
    ///
    /// email_preferences テーブルの主キー。UUID v7 を使用。
    pub struct EmailPreferenceId;
}

/// 送信先メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式である
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "送信先メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "送信先メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "送信先メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "送信先メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 通知設定エンティティ
///
/// ユーザーにつき 1 件だけ存在する（`user_id` に一意制約）。
/// 初回 upsert で作成され、以後は更新のみ。削除操作は公開しない。
#[derive(Debug, Clone)]
pub struct EmailPreference {
    id: EmailPreferenceId,
    user_id: UserId,
    enabled: bool,
    contact_email: ContactEmail,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

impl EmailPreference {
    /// 新規の通知設定を作成する
    ///
    /// `created_on == updated_on == now` で初期化される。
    pub fn new(
        user_id: UserId,
        contact_email: ContactEmail,
        enabled: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EmailPreferenceId::new(),
            user_id,
            enabled,
            contact_email,
            created_on: now,
            updated_on: now,
        }
    }

    /// 永続化済みレコードからエンティティを復元する
    pub fn from_db(
        id: EmailPreferenceId,
        user_id: UserId,
        enabled: bool,
        contact_email: ContactEmail,
        created_on: DateTime<Utc>,
        updated_on: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            enabled,
            contact_email,
            created_on,
            updated_on,
        }
    }

    pub fn id(&self) -> &EmailPreferenceId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn contact_email(&self) -> &ContactEmail {
        &self.contact_email
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn updated_on(&self) -> DateTime<Utc> {
        self.updated_on
    }

    /// upsert による上書き
    ///
    /// 送信先アドレスと受信可否を書き換え、`updated_on` を更新する。
    pub fn apply_upsert(&mut self, contact_email: ContactEmail, enabled: bool, now: DateTime<Utc>) {
        self.contact_email = contact_email;
        self.enabled = enabled;
        self.updated_on = now;
    }

    /// 受信可否のみを切り替える
    ///
    /// `contact_email` と `created_on` はそのまま。upsert と異なり
    /// `updated_on` も更新しない。
    pub fn change_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
