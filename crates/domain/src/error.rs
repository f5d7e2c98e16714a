//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | 通知設定が存在しない |
//! | `PreferenceDisabled` | 409 Conflict | ユーザーがメール受信を無効化している |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// ビジネスロジックの実行中に発生する例外状態を表現する。
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    ///
    /// `entity_type` にはエンティティの種類（"EmailPreference" など）を
    /// 指定し、エラーメッセージを具体的にする。
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// メール受信が無効化されている
    ///
    /// 通知設定の `enabled` が false のユーザーへ送信しようとした場合に
    /// 使用する。送信試行の前に検出され、送信記録は残らない。
    #[error("ユーザー [{user_id}] はメール受信を許可していません")]
    PreferenceDisabled {
        /// 受信を無効化しているユーザーの ID
        user_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_foundのメッセージがエンティティ種別とidを含む() {
        let err = DomainError::NotFound {
            entity_type: "EmailPreference",
            id:          "01890a5d-ac96-774b-b9aa-111111111111".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "EmailPreference が見つかりません: 01890a5d-ac96-774b-b9aa-111111111111"
        );
    }

    #[test]
    fn preference_disabledのメッセージがユーザーidを含む() {
        let err = DomainError::PreferenceDisabled {
            user_id: "u-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ユーザー [u-1] はメール受信を許可していません"
        );
    }
}
