use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::applications::domain::{
    ApplicantDetails, ApplicationId, ApprovalStatus, JobApplication, NewJobApplication,
};
use crate::applications::repository::ApplicationRepository;
use crate::applications::resume::ResumeStore;
use crate::applications::service::JobApplicationService;
use crate::applications::submission::{ApplicationSubmission, JsonSubmission, ResumeUpload};
use crate::applications::FormFields;
use crate::storage::StoreError;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<BTreeMap<i64, JobApplication>>>,
}

impl MemoryRepository {
    pub(super) fn status_of(&self, id: ApplicationId) -> Option<ApprovalStatus> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        guard.get(&id.0).map(|record| record.approve_status)
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

#[async_trait]
impl ApplicationRepository for MemoryRepository {
    async fn insert(&self, application: NewJobApplication) -> Result<JobApplication, StoreError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = guard.keys().next_back().map_or(1, |last| last + 1);
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
        Ok(match guard.get_mut(&id.0) {
            Some(record) => {
                record.approve_status = status;
                1
            }
            None => 0,
        })
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

    async fn resume_reference(&self, id: ApplicationId) -> Result<Option<String>, StoreError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id.0).map(|record| record.resume.clone()))
    }
}

pub(super) struct UnavailableRepository;

fn offline() -> StoreError {
    StoreError::Unavailable("database offline".to_string())
}

#[async_trait]
impl ApplicationRepository for UnavailableRepository {
    async fn insert(&self, _application: NewJobApplication) -> Result<JobApplication, StoreError> {
        Err(offline())
    }

    async fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        Err(offline())
    }

    async fn list_by_status(
        &self,
        _status: ApprovalStatus,
    ) -> Result<Vec<JobApplication>, StoreError> {
        Err(offline())
    }

    async fn set_status(
        &self,
        _id: ApplicationId,
        _status: ApprovalStatus,
    ) -> Result<u64, StoreError> {
        Err(offline())
    }

    async fn count_with_status(
        &self,
        _id: ApplicationId,
        _status: ApprovalStatus,
    ) -> Result<i64, StoreError> {
        Err(offline())
    }

    async fn delete(&self, _id: ApplicationId) -> Result<u64, StoreError> {
        Err(offline())
    }

    async fn resume_reference(&self, _id: ApplicationId) -> Result<Option<String>, StoreError> {
        Err(offline())
    }
}

pub(super) fn build_service(
    resume_root: &Path,
) -> (JobApplicationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service =
        JobApplicationService::new(repository.clone(), ResumeStore::new(resume_root.to_path_buf()));
    (service, repository)
}

pub(super) fn json_submission(full_name: &str, resume: &str) -> ApplicationSubmission {
    ApplicationSubmission::Json(JsonSubmission {
        full_name: full_name.to_string(),
        age: 31,
        degree: "BSc Computer Science".to_string(),
        experience: "Six years of backend work".to_string(),
        email: "ada@example.com".to_string(),
        resume: resume.to_string(),
    })
}

pub(super) fn multipart_submission(age: &str, file_name: &str) -> ApplicationSubmission {
    ApplicationSubmission::Multipart {
        form: FormFields {
            full_name: "Ada Lovelace".to_string(),
            age: age.to_string(),
            degree: "Mathematics".to_string(),
            experience: "Analytical engines".to_string(),
            email: "ada@example.com".to_string(),
        },
        resume: ResumeUpload {
            file_name: file_name.to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 resume"),
        },
    }
}

pub(super) fn applicant() -> ApplicantDetails {
    ApplicantDetails {
        full_name: "Grace Hopper".to_string(),
        age: 40,
        degree: "PhD Mathematics".to_string(),
        experience: "Compilers".to_string(),
        email: "grace@example.com".to_string(),
    }
}

pub(super) async fn seed(
    repository: &MemoryRepository,
    resume: &str,
    status: ApprovalStatus,
) -> ApplicationId {
    let record = repository
        .insert(NewJobApplication {
            details: applicant(),
            resume: resume.to_string(),
        })
        .await
        .expect("seed insert");
    repository
        .set_status(record.id, status)
        .await
        .expect("seed status");
    record.id
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
