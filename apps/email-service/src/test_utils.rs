//! # テストユーティリティ
//!
//! ユースケーステスト・API テストで共有するセットアップコード。

pub mod email_test_builder;

pub use email_test_builder::{EmailTestBuilder, EmailUseCaseSetup};
