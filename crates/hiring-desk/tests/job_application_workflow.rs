//! End-to-end review lifecycle through the public router: a multipart
//! submission, review transitions, resume download, and removal.

mod common {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use hiring_desk::applications::{
        ApplicationId, ApplicationRepository, ApprovalStatus, JobApplication, NewJobApplication,
    };
    use hiring_desk::storage::StoreError;

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<BTreeMap<i64, JobApplication>>,
    }

    #[async_trait]
    impl ApplicationRepository for MemoryRepository {
        async fn insert(
            &self,
            application: NewJobApplication,
        ) -> Result<JobApplication, StoreError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            let id = guard.len() as i64 + 1;
            let details = application.details;
            let record = JobApplication {
                id: ApplicationId(id),
                full_name: details.full_name,
                age: details.age,
                degree: details.degree,
                experience: details.experience,
                email: details.email,
                resume: application.resume,
                approve_status: ApprovalStatus::Pending,
                created_at: Utc::now(),
            };
            guard.insert(id, record.clone());
            Ok(record)
        }

        async fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.values().cloned().collect())
        }

        async fn list_by_status(
            &self,
            status: ApprovalStatus,
        ) -> Result<Vec<JobApplication>, StoreError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard
                .values()
                .filter(|record| record.approve_status == status)
                .cloned()
                .collect())
        }

        async fn set_status(
            &self,
            id: ApplicationId,
            status: ApprovalStatus,
        ) -> Result<u64, StoreError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get_mut(&id.0).map_or(0, |record| {
                record.approve_status = status;
                1
            }))
        }

        async fn count_with_status(
            &self,
            id: ApplicationId,
            status: ApprovalStatus,
        ) -> Result<i64, StoreError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard
                .get(&id.0)
                .filter(|record| record.approve_status == status)
                .map_or(0, |_| 1))
        }

        async fn delete(&self, id: ApplicationId) -> Result<u64, StoreError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.remove(&id.0).map_or(0, |_| 1))
        }

        async fn resume_reference(
            &self,
            id: ApplicationId,
        ) -> Result<Option<String>, StoreError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(&id.0).map(|record| record.resume.clone()))
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hiring_desk::applications::{application_router, JobApplicationService, ResumeStore};

const BOUNDARY: &str = "hiring-desk-integration";

fn multipart_body(file_name: &str, contents: &str) -> String {
    let mut body = String::new();
    for (name, value) in [
        ("full_name", "Katherine Johnson"),
        ("age", "33"),
        ("degree", "Mathematics"),
        ("experience", "Orbital mechanics"),
        ("email", "katherine@example.com"),
    ] {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n{contents}\r\n--{BOUNDARY}--\r\n"
    ));
    body
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router responds")
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn application_moves_through_review_and_is_removed() {
    let uploads = tempfile::tempdir().expect("tempdir");
    let service = JobApplicationService::new(
        Arc::new(common::MemoryRepository::default()),
        ResumeStore::new(uploads.path().to_path_buf()),
    );
    let router = application_router(Arc::new(service));

    let created = send(
        &router,
        Request::post("/job-applications")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body("katherine.pdf", "%PDF-1.5 orbit")))
            .expect("request builds"),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = json(created).await;
    assert_eq!(created["full_name"], "Katherine Johnson");
    assert_eq!(created["age"], 33);
    assert_eq!(created["approve_status"], "Pending");
    let id = created["id"].as_i64().expect("numeric id");
    assert!(uploads.path().join("katherine.pdf").exists());

    let download = send(&router, empty("GET", &format!("/job-applications/{id}/download"))).await;
    assert_eq!(download.status(), StatusCode::OK);
    assert_eq!(
        download.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=katherine.pdf"
    );
    let bytes = axum::body::to_bytes(download.into_body(), 1024)
        .await
        .expect("read resume");
    assert_eq!(&bytes[..], b"%PDF-1.5 orbit");

    let rejected = send(&router, empty("PUT", &format!("/job-applications/{id}/reject"))).await;
    assert_eq!(rejected.status(), StatusCode::OK);
    let listing = json(send(&router, empty("GET", "/job-applications/rejected")).await).await;
    assert_eq!(listing.as_array().map(Vec::len), Some(1));

    let restored = send(&router, empty("PUT", &format!("/job-applications/{id}/restore"))).await;
    assert_eq!(restored.status(), StatusCode::OK);
    let again = send(&router, empty("PUT", &format!("/job-applications/{id}/restore"))).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let accepted = send(&router, empty("PUT", &format!("/job-applications/{id}/accept"))).await;
    assert_eq!(accepted.status(), StatusCode::OK);
    let wrong_delete =
        send(&router, empty("DELETE", &format!("/job-applications/{id}/rejected"))).await;
    assert_eq!(wrong_delete.status(), StatusCode::NOT_FOUND);

    let deleted = send(&router, empty("DELETE", &format!("/job-applications/{id}"))).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let remaining = json(send(&router, empty("GET", "/job-applications")).await).await;
    assert_eq!(remaining, Value::Array(Vec::new()));

    // Removing the record leaves the uploaded file in place.
    assert!(uploads.path().join("katherine.pdf").exists());
}

#[tokio::test]
async fn multipart_without_resume_is_rejected_before_storage() {
    let uploads = tempfile::tempdir().expect("tempdir");
    let service = JobApplicationService::new(
        Arc::new(common::MemoryRepository::default()),
        ResumeStore::new(uploads.path().to_path_buf()),
    );
    let router = application_router(Arc::new(service));

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"full_name\"\r\n\r\nNobody\r\n--{BOUNDARY}--\r\n"
    );
    let response = send(
        &router,
        Request::post("/job-applications")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request builds"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json(response).await["error"],
        "Invalid JSON or missing resume file"
    );
    let listing = json(send(&router, empty("GET", "/job-applications")).await).await;
    assert_eq!(listing, Value::Array(Vec::new()));
}
