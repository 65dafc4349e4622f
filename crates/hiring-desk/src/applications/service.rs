use std::fmt;
use std::sync::Arc;

use super::domain::{ApplicationId, ApprovalStatus, JobApplication, NewJobApplication};
use super::repository::ApplicationRepository;
use super::resume::{ResumeError, ResumeFile, ResumeStore};
use super::submission::{ApplicationSubmission, ResumeSource};
use crate::storage::StoreError;

/// Service composing the application store and the resume directory.
pub struct JobApplicationService<R> {
    repository: Arc<R>,
    resumes: ResumeStore,
}

impl<R> JobApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, resumes: ResumeStore) -> Self {
        Self {
            repository,
            resumes,
        }
    }

    /// Store the resume (when uploaded) and insert a new `Pending` application.
    pub async fn create(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<JobApplication, ApplicationServiceError> {
        let (details, source) = submission.into_parts();
        let resume = match source {
            ResumeSource::Upload(upload) => self
                .resumes
                .save(&upload)
                .await
                .map_err(ApplicationServiceError::ResumeUpload)?,
            ResumeSource::Reference(reference) => reference,
        };

        let record = self
            .repository
            .insert(NewJobApplication { details, resume })
            .await
            .map_err(|err| log_store_error("create", None, err))?;

        tracing::info!(application_id = %record.id, "job application submitted");
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<JobApplication>, ApplicationServiceError> {
        let records = self
            .repository
            .list()
            .await
            .map_err(|err| log_store_error("list", None, err))?;
        Ok(records)
    }

    pub async fn list_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<Vec<JobApplication>, ApplicationServiceError> {
        let records = self
            .repository
            .list_by_status(status)
            .await
            .map_err(|err| log_store_error("list_by_status", None, err))?;
        Ok(records)
    }

    /// Mark an application accepted whatever its current status. Unknown ids
    /// are not an error.
    pub async fn accept(&self, id: ApplicationId) -> Result<(), ApplicationServiceError> {
        self.transition(id, ApprovalStatus::Accepted, "accept").await
    }

    /// Mark an application rejected whatever its current status. Unknown ids
    /// are not an error.
    pub async fn reject(&self, id: ApplicationId) -> Result<(), ApplicationServiceError> {
        self.transition(id, ApprovalStatus::Rejected, "reject").await
    }

    /// Move a rejected application back to `Pending`.
    pub async fn restore(&self, id: ApplicationId) -> Result<(), ApplicationServiceError> {
        self.require_status(id, ApprovalStatus::Rejected).await?;
        // Not atomic with the check above; a concurrent transition can slip in between.
        self.repository
            .set_status(id, ApprovalStatus::Pending)
            .await
            .map_err(|err| log_store_error("restore", Some(id), err))?;
        tracing::info!(application_id = %id, "rejected application restored");
        Ok(())
    }

    pub async fn delete_accepted(&self, id: ApplicationId) -> Result<(), ApplicationServiceError> {
        self.delete_with_status(id, ApprovalStatus::Accepted).await
    }

    pub async fn delete_rejected(&self, id: ApplicationId) -> Result<(), ApplicationServiceError> {
        self.delete_with_status(id, ApprovalStatus::Rejected).await
    }

    /// Open the resume recorded for an application.
    pub async fn download_resume(
        &self,
        id: ApplicationId,
    ) -> Result<ResumeFile, ApplicationServiceError> {
        let reference = match self.repository.resume_reference(id).await {
            Ok(Some(reference)) => reference,
            Ok(None) => return Err(Missing::Application.into()),
            Err(err) => {
                tracing::warn!(application_id = %id, error = %err, "resume lookup failed");
                return Err(Missing::Application.into());
            }
        };

        if reference.is_empty() {
            return Err(Missing::Resume.into());
        }

        self.resumes.open(&reference).await.map_err(|err| {
            tracing::warn!(application_id = %id, resume = %reference, error = %err, "resume file unavailable");
            ApplicationServiceError::from(Missing::Resume)
        })
    }

    async fn transition(
        &self,
        id: ApplicationId,
        status: ApprovalStatus,
        operation: &'static str,
    ) -> Result<(), ApplicationServiceError> {
        let touched = self
            .repository
            .set_status(id, status)
            .await
            .map_err(|err| log_store_error(operation, Some(id), err))?;
        tracing::info!(application_id = %id, %status, touched, "application status updated");
        Ok(())
    }

    async fn require_status(
        &self,
        id: ApplicationId,
        status: ApprovalStatus,
    ) -> Result<(), ApplicationServiceError> {
        let missing = Missing::WithStatus(status);
        match self.repository.count_with_status(id, status).await {
            Ok(count) if count > 0 => Ok(()),
            Ok(_) => Err(missing.into()),
            Err(err) => {
                tracing::warn!(application_id = %id, %status, error = %err, "status check failed");
                Err(missing.into())
            }
        }
    }

    async fn delete_with_status(
        &self,
        id: ApplicationId,
        status: ApprovalStatus,
    ) -> Result<(), ApplicationServiceError> {
        self.require_status(id, status).await?;
        self.repository
            .delete(id)
            .await
            .map_err(|err| log_store_error("delete", Some(id), err))?;
        tracing::info!(application_id = %id, %status, "application deleted");
        Ok(())
    }
}

fn log_store_error(
    operation: &'static str,
    id: Option<ApplicationId>,
    err: StoreError,
) -> ApplicationServiceError {
    match id {
        Some(id) => tracing::error!(operation, application_id = %id, error = %err, "application store failure"),
        None => tracing::error!(operation, error = %err, "application store failure"),
    }
    ApplicationServiceError::Store(err)
}

/// What a not-found outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Application,
    Resume,
    WithStatus(ApprovalStatus),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Application => f.write_str("Job application not found"),
            Missing::Resume => f.write_str("Resume file not found"),
            Missing::WithStatus(status) => write!(f, "{status} application not found"),
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{0}")]
    NotFound(Missing),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to save resume: {0}")]
    ResumeUpload(ResumeError),
}

impl From<Missing> for ApplicationServiceError {
    fn from(value: Missing) -> Self {
        Self::NotFound(value)
    }
}
