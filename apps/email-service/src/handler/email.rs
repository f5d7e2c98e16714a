//! # メール送信ハンドラ
//!
//! 通知設定に従ったメール送信を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/v1/emails` - メールを送信し、結果を記録（201）
//!
//! 配送の成否はレスポンスの `status`（`SUCCEEDED` / `FAILED`）で表現され、
//! HTTP ステータスには影響しない。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use mailgate_domain::{
    email::{Email, EmailStatus},
    user::UserId,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmailState;
use crate::{error::ServiceError, usecase::SendEmailInput};

// --- リクエスト/レスポンス型 ---

/// メール送信リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub user_id: Uuid,
    pub subject: String,
    pub body:    String,
}

/// メール送信レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailResponse {
    pub subject:    String,
    pub created_on: DateTime<Utc>,
    pub status:     EmailStatus,
}

impl From<&Email> for EmailResponse {
    fn from(email: &Email) -> Self {
        Self {
            subject:    email.subject().to_string(),
            created_on: email.created_on(),
            status:     email.status(),
        }
    }
}

// --- ハンドラ ---

/// POST /api/v1/emails
///
/// 通知設定に従ってメールを送信し、送信記録を返す。
///
/// ## レスポンス
///
/// - `201 Created`: 送信記録（配送失敗時も `status: "FAILED"` で 201）
/// - `404 Not Found`: 通知設定が存在しない
/// - `409 Conflict`: ユーザーがメール受信を無効化している
pub async fn send_email(
    State(state): State<Arc<EmailState>>,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let input = SendEmailInput {
        user_id: UserId::from_uuid(request.user_id),
        subject: request.subject,
        body:    request.body,
    };

    let email = state.usecase.send_email(input).await?;

    Ok((StatusCode::CREATED, Json(EmailResponse::from(&email))))
}
