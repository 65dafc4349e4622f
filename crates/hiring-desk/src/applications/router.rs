use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tokio_util::io::ReaderStream;

use super::domain::{ApplicationId, ApprovalStatus};
use super::repository::ApplicationRepository;
use super::resume::ResumeFile;
use super::service::JobApplicationService;
use super::submission::ApplicationSubmission;
use crate::error::ApiError;

type SharedService<R> = State<Arc<JobApplicationService<R>>>;

/// Router builder exposing the job application endpoints.
pub fn application_router<R>(service: Arc<JobApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/job-applications",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route("/job-applications/accepted", get(list_accepted_handler::<R>))
        .route("/job-applications/rejected", get(list_rejected_handler::<R>))
        .route("/job-applications/:id", delete(delete_accepted_handler::<R>))
        .route(
            "/job-applications/:id/rejected",
            delete(delete_rejected_handler::<R>),
        )
        .route("/job-applications/:id/download", get(download_handler::<R>))
        .route("/job-applications/:id/accept", put(accept_handler::<R>))
        .route("/job-applications/:id/reject", put(reject_handler::<R>))
        .route("/job-applications/:id/restore", put(restore_handler::<R>))
        .with_state(service)
}

fn message(text: &'static str) -> Json<serde_json::Value> {
    Json(json!({ "message": text }))
}

pub(crate) async fn create_handler<R>(
    State(service): SharedService<R>,
    submission: ApplicationSubmission,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    let record = service.create(submission).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn list_handler<R>(
    State(service): SharedService<R>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    Ok(Json(service.list().await?))
}

pub(crate) async fn list_accepted_handler<R>(
    State(service): SharedService<R>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    Ok(Json(service.list_by_status(ApprovalStatus::Accepted).await?))
}

pub(crate) async fn list_rejected_handler<R>(
    State(service): SharedService<R>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    Ok(Json(service.list_by_status(ApprovalStatus::Rejected).await?))
}

pub(crate) async fn accept_handler<R>(
    State(service): SharedService<R>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    service.accept(ApplicationId(id)).await?;
    Ok(message("Application accepted"))
}

pub(crate) async fn reject_handler<R>(
    State(service): SharedService<R>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    service.reject(ApplicationId(id)).await?;
    Ok(message("Application rejected"))
}

pub(crate) async fn restore_handler<R>(
    State(service): SharedService<R>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    service.restore(ApplicationId(id)).await?;
    Ok(message("Rejected application restored successfully"))
}

pub(crate) async fn delete_accepted_handler<R>(
    State(service): SharedService<R>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    service.delete_accepted(ApplicationId(id)).await?;
    Ok(message("Accepted application deleted successfully"))
}

pub(crate) async fn delete_rejected_handler<R>(
    State(service): SharedService<R>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    service.delete_rejected(ApplicationId(id)).await?;
    Ok(message("Rejected application deleted successfully"))
}

pub(crate) async fn download_handler<R>(
    State(service): SharedService<R>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ApplicationRepository + 'static,
{
    let ResumeFile {
        file_name,
        content_type,
        file,
    } = service.download_resume(ApplicationId(id)).await?;

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={file_name}"),
        ),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(file))))
}
