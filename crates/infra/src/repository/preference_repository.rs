//! # PreferenceRepository
//!
//! 通知設定の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **user_id による一意検索**: ユーザーにつき 1 件の前提を
//!   `email_preferences.user_id` の一意制約で担保する
//! - **insert / update の分離**: 新規か既存かはユースケース層が
//!   直前の検索結果から判断する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mailgate_domain::{
    preference::{ContactEmail, EmailPreference, EmailPreferenceId},
    user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 通知設定リポジトリトレイト
///
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// ユーザー ID で通知設定を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(preference))`: 設定が見つかった場合
    /// - `Ok(None)`: 設定が見つからない場合（エラーではない）
    /// - `Err(_)`: データベースエラー
    async fn find_by_user_id(&self, user_id: &UserId)
    -> Result<Option<EmailPreference>, InfraError>;

    /// 通知設定を新規挿入する
    async fn insert(&self, preference: &EmailPreference) -> Result<(), InfraError>;

    /// 既存の通知設定を更新する
    async fn update(&self, preference: &EmailPreference) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の PreferenceRepository
#[derive(Debug, Clone)]
pub struct PostgresPreferenceRepository {
    pool: PgPool,
}

impl PostgresPreferenceRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// email_preferences テーブルの行
#[derive(sqlx::FromRow)]
struct PreferenceRow {
    id: Uuid,
    user_id: Uuid,
    enabled: bool,
    contact_email: String,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

impl PreferenceRow {
    fn into_entity(self) -> Result<EmailPreference, InfraError> {
        let contact_email = ContactEmail::new(self.contact_email)
            .map_err(|e| InfraError::unexpected(e.to_string()))?;

        Ok(EmailPreference::from_db(
            EmailPreferenceId::from_uuid(self.id),
            UserId::from_uuid(self.user_id),
            self.enabled,
            contact_email,
            self.created_on,
            self.updated_on,
        ))
    }
}

#[async_trait]
impl PreferenceRepository for PostgresPreferenceRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EmailPreference>, InfraError> {
        let row = sqlx::query_as::<_, PreferenceRow>(
            r#"
            SELECT id, user_id, enabled, contact_email, created_on, updated_on
            FROM email_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(*user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PreferenceRow::into_entity).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, preference: &EmailPreference) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO email_preferences (
                id, user_id, enabled, contact_email, created_on, updated_on
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*preference.id().as_uuid())
        .bind(*preference.user_id().as_uuid())
        .bind(preference.is_enabled())
        .bind(preference.contact_email().as_str())
        .bind(preference.created_on())
        .bind(preference.updated_on())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn update(&self, preference: &EmailPreference) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE email_preferences
            SET enabled = $2, contact_email = $3, updated_on = $4
            WHERE id = $1
            "#,
        )
        .bind(*preference.id().as_uuid())
        .bind(preference.is_enabled())
        .bind(preference.contact_email().as_str())
        .bind(preference.updated_on())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
