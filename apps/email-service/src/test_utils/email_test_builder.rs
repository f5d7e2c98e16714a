//! メールテストビルダー
//!
//! テストコードの重複を削減するためのビルダーパターン実装。
//! 固定時刻とモック（リポジトリ・送信基盤）のセットアップを提供する。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mailgate_domain::{clock::FixedClock, user::UserId};
use mailgate_infra::mock::{MockEmailRepository, MockMailSender, MockPreferenceRepository};

use crate::usecase::EmailUseCase;

/// メールテストビルダー
///
/// テストで繰り返し出現するセットアップコードを削減するためのビルダー。
///
/// # 使用例
///
/// ```ignore
/// let builder = EmailTestBuilder::new();
/// let setup = builder.build_usecase();
///
/// let preference = setup.sut.upsert_preference(input).await.unwrap();
/// ```
pub struct EmailTestBuilder {
    user_id: UserId,
    now:     DateTime<Utc>,
}

/// 組み立て済みのユースケースとモック一式
///
/// モックは内部状態を `Arc` で共有しているため、ユースケースに渡した後も
/// このフィールド経由で保存内容を検証できる。
pub struct EmailUseCaseSetup {
    pub sut: EmailUseCase,
    pub preference_repo: MockPreferenceRepository,
    pub email_repo: MockEmailRepository,
    pub mailer: MockMailSender,
}

impl EmailTestBuilder {
    /// デフォルト値で新しいビルダーを作成
    pub fn new() -> Self {
        Self {
            user_id: UserId::new(),
            now:     Utc::now(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// 常に成功する送信モックでユースケースを組み立てる
    pub fn build_usecase(&self) -> EmailUseCaseSetup {
        self.build_usecase_with_mailer(MockMailSender::new())
    }

    /// 指定した送信モックでユースケースを組み立てる
    pub fn build_usecase_with_mailer(&self, mailer: MockMailSender) -> EmailUseCaseSetup {
        let preference_repo = MockPreferenceRepository::new();
        let email_repo = MockEmailRepository::new();

        let sut = EmailUseCase::new(
            Arc::new(preference_repo.clone()),
            Arc::new(email_repo.clone()),
            Arc::new(mailer.clone()),
            Arc::new(FixedClock::new(self.now)),
        );

        EmailUseCaseSetup {
            sut,
            preference_repo,
            email_repo,
            mailer,
        }
    }
}

impl Default for EmailTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailUseCaseSetup {
    /// 同じモック一式を共有しつつ、別の時刻で動くユースケースを作る
    ///
    /// `updated_on` の推移など、時刻の異なる複数操作を検証するときに使う。
    pub fn usecase_at(&self, now: DateTime<Utc>) -> EmailUseCase {
        EmailUseCase::new(
            Arc::new(self.preference_repo.clone()),
            Arc::new(self.email_repo.clone()),
            Arc::new(self.mailer.clone()),
            Arc::new(FixedClock::new(now)),
        )
    }
}
