//! # EmailRepository
//!
//! メール送信記録の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **追記専用**: INSERT のみ。更新・削除の操作は提供しない
//! - **送信結果も記録する**: 成功・失敗どちらの試行も 1 件ずつ残す

use async_trait::async_trait;
use mailgate_domain::email::Email;
use sqlx::PgPool;

use crate::error::InfraError;

/// 送信記録リポジトリトレイト
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// 送信記録を挿入する
    async fn insert(&self, email: &Email) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の EmailRepository
#[derive(Debug, Clone)]
pub struct PostgresEmailRepository {
    pool: PgPool,
}

impl PostgresEmailRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailRepository for PostgresEmailRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, email: &Email) -> Result<(), InfraError> {
        let status: &str = email.status().into();

        sqlx::query(
            r#"
            INSERT INTO emails (id, subject, body, created_on, status, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*email.id().as_uuid())
        .bind(email.subject())
        .bind(email.body())
        .bind(email.created_on())
        .bind(status)
        .bind(*email.user_id().as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresEmailRepository>();
    }
}
