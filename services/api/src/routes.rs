use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use hiring_desk::applications::{application_router, ApplicationRepository, JobApplicationService};
use hiring_desk::auth::{auth_router, AccountRepository, AuthService};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Full public surface: application review, admin login, and operational probes.
pub(crate) fn api_router<A, R>(
    applications: Arc<JobApplicationService<A>>,
    auth: Arc<AuthService<R>>,
) -> Router
where
    A: ApplicationRepository + 'static,
    R: AccountRepository + 'static,
{
    application_router(applications)
        .merge(auth_router(auth))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
