//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailgate-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mailgate_domain::{
    email::{DeliveryError, Email, EmailMessage},
    preference::EmailPreference,
    user::UserId,
};

use crate::{
    error::InfraError,
    mailer::MailSender,
    repository::{EmailRepository, PreferenceRepository},
};

// ===== MockPreferenceRepository =====

/// インメモリ実装の PreferenceRepository
#[derive(Clone, Default)]
pub struct MockPreferenceRepository {
    preferences: Arc<Mutex<Vec<EmailPreference>>>,
}

impl MockPreferenceRepository {
    pub fn new() -> Self {
        Self {
            preferences: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 保存済みの通知設定一覧を返す
    pub fn preferences(&self) -> Vec<EmailPreference> {
        self.preferences.lock().unwrap().clone()
    }
}

#[async_trait]
impl PreferenceRepository for MockPreferenceRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<EmailPreference>, InfraError> {
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id() == user_id)
            .cloned())
    }

    async fn insert(&self, preference: &EmailPreference) -> Result<(), InfraError> {
        let mut preferences = self.preferences.lock().unwrap();
        preferences.push(preference.clone());
        Ok(())
    }

    async fn update(&self, preference: &EmailPreference) -> Result<(), InfraError> {
        let mut preferences = self.preferences.lock().unwrap();
        if let Some(pos) = preferences.iter().position(|p| p.id() == preference.id()) {
            preferences[pos] = preference.clone();
        }
        Ok(())
    }
}

// ===== MockEmailRepository =====

/// インメモリ実装の EmailRepository
#[derive(Clone, Default)]
pub struct MockEmailRepository {
    emails: Arc<Mutex<Vec<Email>>>,
}

impl MockEmailRepository {
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 保存済みの送信記録一覧を返す
    pub fn emails(&self) -> Vec<Email> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailRepository for MockEmailRepository {
    async fn insert(&self, email: &Email) -> Result<(), InfraError> {
        let mut emails = self.emails.lock().unwrap();
        emails.push(email.clone());
        Ok(())
    }
}

// ===== MockMailSender =====

/// テスト用のモック MailSender
///
/// 送信したメッセージを記録する。[`MockMailSender::failing`] で作成すると
/// すべての送信が失敗し、配送失敗の吸収経路をテストできる。
#[derive(Clone, Default)]
pub struct MockMailSender {
    sent:    Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<String>,
}

impl MockMailSender {
    /// 常に成功する送信モックを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に失敗する送信モックを作成
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent:    Arc::new(Mutex::new(Vec::new())),
            failure: Some(reason.into()),
        }
    }

    /// 送信に成功したメッセージ一覧を返す
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        if let Some(reason) = &self.failure {
            return Err(DeliveryError::SendFailed(reason.clone()));
        }

        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
