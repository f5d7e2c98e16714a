//! # Email Service エラー定義
//!
//! サービス固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 配送失敗（[`mailgate_domain::email::DeliveryError`]）はここに現れない。
//! 送信記録の `FAILED` ステータスに畳み込まれ、HTTP 上はエラーにならない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mailgate_domain::DomainError;
use mailgate_infra::InfraError;
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// Email Service で発生するエラー
#[derive(Debug, Error)]
pub enum ServiceError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// メール受信が無効化されている
    #[error("メール受信が無効化されています: {0}")]
    PreferenceDisabled(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            other @ DomainError::NotFound { .. } => Self::NotFound(other.to_string()),
            other @ DomainError::PreferenceDisabled { .. } => {
                Self::PreferenceDisabled(other.to_string())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_type, title, detail) = match &self {
            ServiceError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "https://mailgate.example.com/errors/not-found",
                "Not Found",
                msg.clone(),
            ),
            ServiceError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "https://mailgate.example.com/errors/bad-request",
                "Bad Request",
                msg.clone(),
            ),
            ServiceError::PreferenceDisabled(msg) => (
                StatusCode::CONFLICT,
                "https://mailgate.example.com/errors/preference-disabled",
                "Preference Disabled",
                msg.clone(),
            ),
            ServiceError::Database(e) => {
                tracing::error!("データベースエラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "https://mailgate.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title: title.to_string(),
                status: status.as_u16(),
                detail,
            }),
        )
            .into_response()
    }
}
