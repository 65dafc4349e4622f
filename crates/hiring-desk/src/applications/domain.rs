use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl From<i64> for ApplicationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review state of an application.
///
/// ```text
/// Pending --accept--> Accepted --delete--> (gone)
/// Pending --reject--> Rejected --delete--> (gone)
/// Rejected --restore--> Pending
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApprovalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Accepted => "Accepted",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown approval status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApprovalStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Accepted" => Ok(Self::Accepted),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for ApprovalStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A stored job application as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobApplication {
    #[sqlx(try_from = "i64")]
    pub id: ApplicationId,
    pub full_name: String,
    pub age: i32,
    pub degree: String,
    pub experience: String,
    pub email: String,
    pub resume: String,
    #[sqlx(try_from = "String")]
    pub approve_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

/// Applicant-supplied fields shared by both submission formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantDetails {
    pub full_name: String,
    pub age: i32,
    pub degree: String,
    pub experience: String,
    pub email: String,
}

/// Insert payload; the store always assigns `Pending`, the id, and the timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobApplication {
    pub details: ApplicantDetails,
    pub resume: String,
}
