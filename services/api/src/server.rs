use crate::cli::ServeArgs;
use crate::infra::{cors_layer, shutdown_signal, AppState};
use crate::routes::api_router;
use axum::extract::DefaultBodyLimit;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hiring_desk::applications::{JobApplicationService, MySqlApplicationRepository, ResumeStore};
use hiring_desk::auth::{AuthService, MySqlAccountRepository};
use hiring_desk::config::AppConfig;
use hiring_desk::error::AppError;
use hiring_desk::token::TokenIssuer;
use hiring_desk::{storage, telemetry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;
    let issuer = TokenIssuer::new(&config.auth.jwt_secret)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let pool = storage::connect(&config.database).await?;
    storage::migrate(&pool).await?;

    let application_service = Arc::new(JobApplicationService::new(
        Arc::new(MySqlApplicationRepository::new(pool.clone())),
        ResumeStore::new(config.uploads.directory.clone()),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(MySqlAccountRepository::new(pool.clone())),
        issuer,
    ));

    let app = api_router(application_service, auth_service)
        .layer(Extension(app_state))
        .layer(DefaultBodyLimit::max(config.uploads.max_upload_bytes))
        .layer(cors_layer(&config.server.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        uploads = %config.uploads.directory.display(),
        "hiring desk ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    readiness_flag.store(false, Ordering::Release);
    pool.close().await;
    info!("hiring desk stopped");
    Ok(())
}

pub(crate) async fn migrate_only() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let pool = storage::connect(&config.database).await?;
    storage::migrate(&pool).await?;
    pool.close().await;
    Ok(())
}
