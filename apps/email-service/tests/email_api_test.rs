//! Email Service API 統合テスト
//!
//! モックのリポジトリ・送信基盤を差し込んだルーターに対して
//! HTTP リクエストを発行し、ステータスコードとレスポンスボディの
//! マッピングを検証する。
//!
//! ## テストケース
//!
//! - upsert → 201 と camelCase のレスポンス
//! - contactEmail が空の upsert → 400
//! - 未登録ユーザーの取得 → 404
//! - 送信成功 → 201 / SUCCEEDED
//! - 配送失敗 → 201 / FAILED（HTTP エラーにはならない）
//! - 受信無効ユーザーへの送信 → 409、送信記録なし
//! - 受信可否の切り替え → 200、アドレスは不変

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use mailgate_email_service::{
    handler::{EmailState, router},
    test_utils::{EmailTestBuilder, EmailUseCaseSetup},
};
use mailgate_infra::mock::{MockEmailRepository, MockMailSender, MockPreferenceRepository};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

/// 検証用に手元へ残すモック一式
///
/// モックは内部状態を `Arc` で共有するため、ルーターへ渡した後も
/// ここから保存内容を確認できる。
struct Mocks {
    preference_repo: MockPreferenceRepository,
    email_repo: MockEmailRepository,
    mailer: MockMailSender,
}

fn build_app(setup: EmailUseCaseSetup) -> (Router, Mocks) {
    let mocks = Mocks {
        preference_repo: setup.preference_repo.clone(),
        email_repo: setup.email_repo.clone(),
        mailer: setup.mailer.clone(),
    };
    let app = router(Arc::new(EmailState {
        usecase: setup.sut,
    }));
    (app, mocks)
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn upsertは201でcamel_caseのレスポンスを返す() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());
    let user_id = Uuid::now_v7();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": user_id,
            "enabled": true,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["enabled"], true);
    assert_eq!(body["contactEmail"], "a@x.com");
    assert!(body.get("id").is_some());
}

#[tokio::test]
async fn contact_emailが空のupsertは400になる() {
    let builder = EmailTestBuilder::new();
    let (app, mocks) = build_app(builder.build_usecase());

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": Uuid::now_v7(),
            "enabled": true,
            "contactEmail": "",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad Request");
    assert!(mocks.preference_repo.preferences().is_empty());
}

#[tokio::test]
async fn user_idを欠いたupsertは400になる() {
    let builder = EmailTestBuilder::new();
    let (app, mocks) = build_app(builder.build_usecase());

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "enabled": true,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad Request");
    assert!(mocks.preference_repo.preferences().is_empty());
}

#[tokio::test]
async fn 未登録ユーザーの取得は404になる() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());

    let uri = format!("/api/v1/emails/preferences?userId={}", Uuid::now_v7());
    let (status, body) = send_json(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Not Found");
}

#[tokio::test]
async fn upsert済みユーザーの取得は200で設定を返す() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());
    let user_id = Uuid::now_v7();

    send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": user_id,
            "enabled": true,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    let uri = format!("/api/v1/emails/preferences?userId={user_id}");
    let (status, body) = send_json(&app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["contactEmail"], "a@x.com");
}

#[tokio::test]
async fn 送信成功は201でsucceededを返す() {
    let builder = EmailTestBuilder::new();
    let (app, mocks) = build_app(builder.build_usecase());
    let user_id = Uuid::now_v7();

    send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": user_id,
            "enabled": true,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails",
        Some(json!({
            "userId": user_id,
            "subject": "Hi",
            "body": "Body",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subject"], "Hi");
    assert_eq!(body["status"], "SUCCEEDED");
    assert!(body.get("createdOn").is_some());

    let sent = mocks.mailer.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
}

#[tokio::test]
async fn 配送失敗でも201でfailedを返す() {
    let builder = EmailTestBuilder::new();
    let (app, mocks) =
        build_app(builder.build_usecase_with_mailer(MockMailSender::failing("接続拒否")));
    let user_id = Uuid::now_v7();

    send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": user_id,
            "enabled": true,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails",
        Some(json!({
            "userId": user_id,
            "subject": "Hi",
            "body": "Body",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subject"], "Hi");
    assert_eq!(body["status"], "FAILED");

    // 失敗した試行も 1 件だけ記録される
    assert_eq!(mocks.email_repo.emails().len(), 1);
}

#[tokio::test]
async fn 受信無効ユーザーへの送信は409で記録も残らない() {
    let builder = EmailTestBuilder::new();
    let (app, mocks) = build_app(builder.build_usecase());
    let user_id = Uuid::now_v7();

    send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": user_id,
            "enabled": false,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails",
        Some(json!({
            "userId": user_id,
            "subject": "Hi",
            "body": "Body",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["title"], "Preference Disabled");
    assert!(mocks.email_repo.emails().is_empty());
    assert!(mocks.mailer.sent_messages().is_empty());
}

#[tokio::test]
async fn 未登録ユーザーへの送信は404になる() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());

    let (status, _body) = send_json(
        &app,
        Method::POST,
        "/api/v1/emails",
        Some(json!({
            "userId": Uuid::now_v7(),
            "subject": "Hi",
            "body": "Body",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn 受信可否の切り替えは200でアドレスを変えない() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());
    let user_id = Uuid::now_v7();

    send_json(
        &app,
        Method::POST,
        "/api/v1/emails/preferences",
        Some(json!({
            "userId": user_id,
            "enabled": true,
            "contactEmail": "a@x.com",
        })),
    )
    .await;

    let uri = format!("/api/v1/emails/preferences?userId={user_id}&enabled=false");
    let (status, body) = send_json(&app, Method::PUT, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["contactEmail"], "a@x.com");
}

#[tokio::test]
async fn 未登録ユーザーの切り替えは404になる() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());

    let uri = format!(
        "/api/v1/emails/preferences?userId={}&enabled=true",
        Uuid::now_v7()
    );
    let (status, _body) = send_json(&app, Method::PUT, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ヘルスチェックは200を返す() {
    let builder = EmailTestBuilder::new();
    let (app, _mocks) = build_app(builder.build_usecase());

    let (status, body) = send_json(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
