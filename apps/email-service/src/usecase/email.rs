//! # メールユースケース
//!
//! 通知設定の upsert / 取得 / 切り替えと、設定に従ったメール送信を担う。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・送信基盤・時刻は trait で抽象化
//! - **配送失敗は吸収する**: 送信基盤のエラーは呼び出し元へ伝播させず、
//!   送信記録の `Failed` ステータスとして残す
//! - **受信無効は即時拒否**: 送信試行の前に弾き、記録は残さない

use std::sync::Arc;

use mailgate_domain::{
    DomainError,
    clock::Clock,
    email::{Email, EmailMessage, EmailStatus},
    preference::{ContactEmail, EmailPreference},
    user::UserId,
};
use mailgate_infra::{
    mailer::MailSender,
    repository::{EmailRepository, PreferenceRepository},
};

use crate::error::ServiceError;

/// 通知設定 upsert の入力
#[derive(Debug)]
pub struct UpsertPreferenceInput {
    pub user_id:       UserId,
    pub contact_email: ContactEmail,
    pub enabled:       bool,
}

/// メール送信の入力
#[derive(Debug)]
pub struct SendEmailInput {
    pub user_id: UserId,
    pub subject: String,
    pub body:    String,
}

/// メールユースケース
///
/// 通知設定と送信記録に対するすべての公開操作を提供する。
/// 各操作はリクエストごとに同期的に完結し、バックグラウンド処理を持たない。
pub struct EmailUseCase {
    preference_repo: Arc<dyn PreferenceRepository>,
    email_repo: Arc<dyn EmailRepository>,
    mailer: Arc<dyn MailSender>,
    clock: Arc<dyn Clock>,
}

impl EmailUseCase {
    pub fn new(
        preference_repo: Arc<dyn PreferenceRepository>,
        email_repo: Arc<dyn EmailRepository>,
        mailer: Arc<dyn MailSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            preference_repo,
            email_repo,
            mailer,
            clock,
        }
    }

    /// 通知設定を upsert する
    ///
    /// 既存の設定があれば送信先アドレスと受信可否を上書きして
    /// `updated_on` を更新し、なければ新規作成する。
    /// どちらの場合もストアへの書き込みはちょうど 1 回。
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn upsert_preference(
        &self,
        input: UpsertPreferenceInput,
    ) -> Result<EmailPreference, ServiceError> {
        let now = self.clock.now();

        if let Some(mut preference) = self.preference_repo.find_by_user_id(&input.user_id).await? {
            preference.apply_upsert(input.contact_email, input.enabled, now);
            self.preference_repo.update(&preference).await?;

            tracing::info!(preference_id = %preference.id(), "通知設定を更新");
            return Ok(preference);
        }

        let preference = EmailPreference::new(input.user_id, input.contact_email, input.enabled, now);
        self.preference_repo.insert(&preference).await?;

        tracing::info!(preference_id = %preference.id(), "通知設定を新規作成");
        Ok(preference)
    }

    /// ユーザー ID で通知設定を取得する
    ///
    /// 設定が存在しない場合は `NotFound` を返す。
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn get_preference_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<EmailPreference, ServiceError> {
        let preference = self
            .preference_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "EmailPreference",
                id:          user_id.to_string(),
            })?;

        Ok(preference)
    }

    /// 通知設定に従ってメールを送信し、結果を記録する
    ///
    /// # 挙動
    ///
    /// - 通知設定が存在しない場合は `NotFound`（記録なし、送信なし）
    /// - `enabled` が false の場合は `PreferenceDisabled`（記録なし、送信なし）
    /// - それ以外は送信基盤を 1 回呼び出し、成否を `SUCCEEDED` / `FAILED`
    ///   として記録する。配送失敗はエラーとして返さない
    #[tracing::instrument(skip_all, fields(user_id = %input.user_id))]
    pub async fn send_email(&self, input: SendEmailInput) -> Result<Email, ServiceError> {
        let preference = self.get_preference_by_user_id(&input.user_id).await?;

        if !preference.is_enabled() {
            return Err(DomainError::PreferenceDisabled {
                user_id: preference.user_id().to_string(),
            }
            .into());
        }

        let message = EmailMessage {
            to:      preference.contact_email().as_str().to_string(),
            subject: input.subject.clone(),
            body:    input.body.clone(),
        };

        let status = match self.mailer.send(&message).await {
            Ok(()) => {
                tracing::info!(to = %message.to, subject = %message.subject, "メール送信成功");
                EmailStatus::Succeeded
            }
            Err(e) => {
                tracing::warn!(
                    to = %message.to,
                    subject = %message.subject,
                    error = %e,
                    "メール送信失敗（FAILED として記録する）"
                );
                EmailStatus::Failed
            }
        };

        let email = Email::new(input.user_id, input.subject, input.body, status, self.clock.now());
        self.email_repo.insert(&email).await?;

        Ok(email)
    }

    /// 受信可否のみを切り替える
    ///
    /// 設定が存在しない場合は `NotFound`。`contact_email` と `created_on`
    /// は変わらず、`updated_on` もこの経路では更新されない。
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn change_preference(
        &self,
        user_id: &UserId,
        enabled: bool,
    ) -> Result<EmailPreference, ServiceError> {
        let mut preference = self.get_preference_by_user_id(user_id).await?;

        preference.change_enabled(enabled);
        self.preference_repo.update(&preference).await?;

        tracing::info!(preference_id = %preference.id(), enabled, "受信可否を切り替え");
        Ok(preference)
    }
}
