//! # Mailgate ドメイン層
//!
//! メール通知設定と送信記録のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`preference::EmailPreference`],
//!   [`email::Email`]）
//! - **値オブジェクト**: 生成時にバリデーションを実行する不変オブジェクト
//!   （[`preference::ContactEmail`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! email-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、SMTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - テスト可能な時刻プロバイダ
//! - [`email`] - メール送信記録と送信メッセージ
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`preference`] - ユーザーごとのメール通知設定
//! - [`user`] - 外部システムが発番するユーザー識別子

#[macro_use]
mod macros;

pub mod clock;
pub mod email;
pub mod error;
pub mod preference;
pub mod user;

pub use error::DomainError;
