//! Job application intake, review transitions, and resume handling.

pub mod domain;
pub mod repository;
pub mod resume;
pub mod router;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantDetails, ApplicationId, ApprovalStatus, JobApplication, NewJobApplication,
    UnknownStatus,
};
pub use repository::{ApplicationRepository, MySqlApplicationRepository};
pub use resume::{ResumeError, ResumeFile, ResumeStore};
pub use router::application_router;
pub use service::{ApplicationServiceError, JobApplicationService, Missing};
pub use submission::{
    ApplicationSubmission, FormFields, JsonSubmission, ResumeSource, ResumeUpload,
};
