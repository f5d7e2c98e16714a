//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲
//! - 入力の存在・形式チェックはこの層で行い、ユースケースには検証済みの
//!   値だけを渡す

pub mod email;
pub mod health;
pub mod preference;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
pub use email::send_email;
pub use health::health_check;
pub use preference::{change_preference, get_preference, upsert_preference};

use crate::usecase::EmailUseCase;

/// メール API の共有状態
pub struct EmailState {
    pub usecase: EmailUseCase,
}

/// ルーターを構築する
///
/// `main` とテストの双方から同じルーティングを使うための関数。
pub fn router(state: Arc<EmailState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/emails", post(send_email))
        .route(
            "/api/v1/emails/preferences",
            post(upsert_preference)
                .get(get_preference)
                .put(change_preference),
        )
        .with_state(state)
}
