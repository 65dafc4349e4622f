use async_trait::async_trait;
use sqlx::mysql::MySqlPool;

use super::domain::{ApplicationId, ApprovalStatus, JobApplication, NewJobApplication};
use crate::storage::StoreError;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Every method maps to a single statement; callers that check and then act
/// get no atomicity across calls.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new `Pending` application and return it as stored.
    async fn insert(&self, application: NewJobApplication) -> Result<JobApplication, StoreError>;
    async fn list(&self) -> Result<Vec<JobApplication>, StoreError>;
    async fn list_by_status(&self, status: ApprovalStatus)
        -> Result<Vec<JobApplication>, StoreError>;
    /// Returns the number of rows touched; a missing id touches none.
    async fn set_status(&self, id: ApplicationId, status: ApprovalStatus)
        -> Result<u64, StoreError>;
    async fn count_with_status(
        &self,
        id: ApplicationId,
        status: ApprovalStatus,
    ) -> Result<i64, StoreError>;
    async fn delete(&self, id: ApplicationId) -> Result<u64, StoreError>;
    /// `None` when no application has this id.
    async fn resume_reference(&self, id: ApplicationId) -> Result<Option<String>, StoreError>;
}

const SELECT_COLUMNS: &str = "SELECT id, full_name, age, degree, experience, email, resume, \
                              approve_status, created_at FROM job_applications";

/// MySQL-backed application store.
#[derive(Debug, Clone)]
pub struct MySqlApplicationRepository {
    pool: MySqlPool,
}

impl MySqlApplicationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: ApplicationId) -> Result<JobApplication, StoreError> {
        let record = sqlx::query_as::<_, JobApplication>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.0)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }
}

#[async_trait]
impl ApplicationRepository for MySqlApplicationRepository {
    async fn insert(&self, application: NewJobApplication) -> Result<JobApplication, StoreError> {
        let details = application.details;
        let result = sqlx::query(
            r#"INSERT INTO job_applications
               (full_name, age, degree, experience, email, resume, approve_status)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&details.full_name)
        .bind(details.age)
        .bind(&details.degree)
        .bind(&details.experience)
        .bind(&details.email)
        .bind(&application.resume)
        .bind(ApprovalStatus::Pending.label())
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| StoreError::Unavailable("inserted id out of range".to_string()))?;
        self.fetch(ApplicationId(id)).await
    }

    async fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        let records = sqlx::query_as::<_, JobApplication>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn list_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let records =
            sqlx::query_as::<_, JobApplication>(&format!("{SELECT_COLUMNS} WHERE approve_status = ?"))
                .bind(status.label())
                .fetch_all(&self.pool)
                .await?;
        Ok(records)
    }

    async fn set_status(
        &self,
        id: ApplicationId,
        status: ApprovalStatus,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE job_applications SET approve_status = ? WHERE id = ?")
            .bind(status.label())
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count_with_status(
        &self,
        id: ApplicationId,
        status: ApprovalStatus,
    ) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM job_applications WHERE id = ? AND approve_status = ?",
        )
        .bind(id.0)
        .bind(status.label())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn delete(&self, id: ApplicationId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn resume_reference(&self, id: ApplicationId) -> Result<Option<String>, StoreError> {
        let resume: Option<String> =
            sqlx::query_scalar("SELECT resume FROM job_applications WHERE id = ?")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(resume)
    }
}
