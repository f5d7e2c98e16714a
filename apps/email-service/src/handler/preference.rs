//! # 通知設定ハンドラ
//!
//! 通知設定の upsert / 取得 / 受信可否切り替えを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/v1/emails/preferences` - 通知設定を upsert（201）
//! - `GET /api/v1/emails/preferences?userId=` - 通知設定を取得（200）
//! - `PUT /api/v1/emails/preferences?userId=&enabled=` - 受信可否を切り替え（200）

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use mailgate_domain::{
    preference::{ContactEmail, EmailPreference},
    user::UserId,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmailState;
use crate::{error::ServiceError, usecase::UpsertPreferenceInput};

// --- リクエスト/レスポンス型 ---

/// 通知設定 upsert リクエスト
///
/// `enabled` を省略した場合は false として扱う。`userId` と
/// `contactEmail` の存在チェックはハンドラで行い、欠落は 400 で返す。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPreferenceRequest {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub contact_email: String,
}

/// 通知設定取得クエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPreferenceQuery {
    pub user_id: Uuid,
}

/// 受信可否切り替えクエリパラメータ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePreferenceQuery {
    pub user_id: Uuid,
    pub enabled: bool,
}

/// 通知設定レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub enabled: bool,
    pub contact_email: String,
}

impl From<&EmailPreference> for PreferenceResponse {
    fn from(preference: &EmailPreference) -> Self {
        Self {
            id: *preference.id().as_uuid(),
            user_id: *preference.user_id().as_uuid(),
            enabled: preference.is_enabled(),
            contact_email: preference.contact_email().as_str().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /api/v1/emails/preferences
///
/// 通知設定を upsert する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成・更新後の通知設定
/// - `400 Bad Request`: userId の欠落、contactEmail が空または形式不正
pub async fn upsert_preference(
    State(state): State<Arc<EmailState>>,
    Json(request): Json<UpsertPreferenceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let user_id = request
        .user_id
        .ok_or_else(|| ServiceError::BadRequest("userId は必須です".to_string()))?;
    let contact_email = ContactEmail::new(request.contact_email).map_err(ServiceError::from)?;

    let input = UpsertPreferenceInput {
        user_id: UserId::from_uuid(user_id),
        contact_email,
        enabled: request.enabled,
    };

    let preference = state.usecase.upsert_preference(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(PreferenceResponse::from(&preference)),
    ))
}

/// GET /api/v1/emails/preferences?userId=
///
/// ユーザーの通知設定を取得する。
///
/// ## レスポンス
///
/// - `200 OK`: 通知設定
/// - `404 Not Found`: 通知設定が存在しない
pub async fn get_preference(
    State(state): State<Arc<EmailState>>,
    Query(query): Query<GetPreferenceQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let user_id = UserId::from_uuid(query.user_id);
    let preference = state.usecase.get_preference_by_user_id(&user_id).await?;

    Ok(Json(PreferenceResponse::from(&preference)))
}

/// PUT /api/v1/emails/preferences?userId=&enabled=
///
/// 受信可否のみを切り替える。
///
/// ## レスポンス
///
/// - `200 OK`: 切り替え後の通知設定
/// - `404 Not Found`: 通知設定が存在しない
pub async fn change_preference(
    State(state): State<Arc<EmailState>>,
    Query(query): Query<ChangePreferenceQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let user_id = UserId::from_uuid(query.user_id);
    let preference = state
        .usecase
        .change_preference(&user_id, query.enabled)
        .await?;

    Ok(Json(PreferenceResponse::from(&preference)))
}
