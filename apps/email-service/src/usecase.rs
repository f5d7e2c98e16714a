//! # ユースケース
//!
//! ビジネスロジックの入口。ハンドラから呼び出され、リポジトリと
//! 送信基盤を組み合わせて操作を実行する。

pub mod email;

pub use email::{EmailUseCase, SendEmailInput, UpsertPreferenceInput};
