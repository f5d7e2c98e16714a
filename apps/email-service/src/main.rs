//! # Email Service サーバー
//!
//! 通知設定の管理とメール送信を提供する HTTP サービス。
//!
//! ## 役割
//!
//! - **通知設定**: ユーザーごとの受信可否と送信先アドレスの upsert / 取得 / 切り替え
//! - **メール送信**: 通知設定に従った送信と、結果（成功・失敗）の記録
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `EMAIL_SERVICE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `EMAIL_SERVICE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `MAILER_BACKEND` | No | `smtp` \| `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `MAIL_FROM_ADDRESS` | No | 送信元アドレス |
//!
//! ## 起動方法
//!
//! ```bash
//! EMAIL_SERVICE_PORT=3000 DATABASE_URL=postgres://... cargo run -p mailgate-email-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use mailgate_domain::clock::SystemClock;
use mailgate_email_service::{
    config::EmailServiceConfig,
    handler::{EmailState, router},
    usecase::EmailUseCase,
};
use mailgate_infra::{
    db,
    mailer::{MailSender, NoopMailSender, SmtpMailSender},
    repository::{PostgresEmailRepository, PostgresPreferenceRepository},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Email Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mailgate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 設定読み込み
    let config = EmailServiceConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Email Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成し、マイグレーションを適用
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの適用に失敗しました");
    tracing::info!("データベースに接続しました");

    // メール送信バックエンドを選択
    let mailer: Arc<dyn MailSender> = match config.mailer.backend.as_str() {
        "smtp" => {
            tracing::info!(
                host = %config.mailer.smtp_host,
                port = config.mailer.smtp_port,
                "SMTP バックエンドでメールを送信します"
            );
            Arc::new(SmtpMailSender::new(
                &config.mailer.smtp_host,
                config.mailer.smtp_port,
                config.mailer.from_address.clone(),
            ))
        }
        _ => {
            tracing::info!("Noop バックエンドを使用します（メールは送信されません）");
            Arc::new(NoopMailSender)
        }
    };

    // 依存コンポーネントを初期化
    let preference_repo = PostgresPreferenceRepository::new(pool.clone());
    let email_repo = PostgresEmailRepository::new(pool.clone());
    let usecase = EmailUseCase::new(
        Arc::new(preference_repo),
        Arc::new(email_repo),
        mailer,
        Arc::new(SystemClock),
    );
    let state = Arc::new(EmailState { usecase });

    // ルーター構築
    let app = router(state).layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Email Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
