//! # ユーザー識別子
//!
//! 本サービスはユーザーアカウントを管理しない。ユーザーは外部システムが
//! 発番した UUID としてのみ現れ、参照整合性も強制しない。

define_uuid_id! {
    /// ユーザー ID（外部システムが発番する識別子）
    pub struct UserId;
}
