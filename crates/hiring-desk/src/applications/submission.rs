//! Boundary parsing for new applications.
//!
//! A submission arrives either as `multipart/form-data` carrying the resume
//! file, or as a JSON document that references an existing resume. The two
//! shapes are resolved here, once, into [`ApplicantDetails`] plus a
//! [`ResumeSource`].

use std::collections::HashMap;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Deserializer};

use super::domain::ApplicantDetails;
use crate::error::ApiError;

const RESUME_FIELD: &str = "resume";
const INVALID_SUBMISSION: &str = "Invalid JSON or missing resume file";

/// A submission as received, before normalization.
#[derive(Debug, Clone)]
pub enum ApplicationSubmission {
    Multipart {
        form: FormFields,
        resume: ResumeUpload,
    },
    Json(JsonSubmission),
}

/// Raw text fields of a multipart submission. Absent fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub full_name: String,
    pub age: String,
    pub degree: String,
    pub experience: String,
    pub email: String,
}

/// JSON submission body; every field is optional on the wire and an explicit
/// `null` reads as the empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JsonSubmission {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub age: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resume: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// File part received under the `resume` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Where the stored resume reference comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    Upload(ResumeUpload),
    Reference(String),
}

/// Ages that do not parse as an integer are stored as zero.
pub fn parse_age(raw: &str) -> i32 {
    raw.parse().unwrap_or(0)
}

impl FormFields {
    /// Form fields are taken as a unit: without a full name none of them are
    /// used and the applicant details stay empty.
    pub fn into_details(self) -> ApplicantDetails {
        if self.full_name.is_empty() {
            return ApplicantDetails::default();
        }

        ApplicantDetails {
            age: parse_age(&self.age),
            full_name: self.full_name,
            degree: self.degree,
            experience: self.experience,
            email: self.email,
        }
    }

    fn from_map(mut values: HashMap<String, String>) -> Self {
        let mut take = |name: &str| values.remove(name).unwrap_or_default();
        Self {
            full_name: take("full_name"),
            age: take("age"),
            degree: take("degree"),
            experience: take("experience"),
            email: take("email"),
        }
    }
}

impl ApplicationSubmission {
    pub fn into_parts(self) -> (ApplicantDetails, ResumeSource) {
        match self {
            ApplicationSubmission::Multipart { form, resume } => {
                (form.into_details(), ResumeSource::Upload(resume))
            }
            ApplicationSubmission::Json(body) => (
                ApplicantDetails {
                    full_name: body.full_name,
                    age: body.age,
                    degree: body.degree,
                    experience: body.experience,
                    email: body.email,
                },
                ResumeSource::Reference(body.resume),
            ),
        }
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .map(|content_type| {
            content_type.type_() == mime::MULTIPART && content_type.subtype() == mime::FORM_DATA
        })
        .unwrap_or(false)
}

async fn read_multipart(mut multipart: Multipart) -> Result<ApplicationSubmission, ApiError> {
    let mut values = HashMap::new();
    let mut resume = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::debug!(error = %err, "unreadable multipart body");
        ApiError::bad_request(INVALID_SUBMISSION)
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RESUME_FIELD {
            // Only the first file part counts; a plain text `resume` value is not a file.
            if resume.is_some() {
                continue;
            }
            if let Some(file_name) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await.map_err(|err| {
                    tracing::debug!(error = %err, "resume part could not be read");
                    ApiError::bad_request(INVALID_SUBMISSION)
                })?;
                resume = Some(ResumeUpload { file_name, bytes });
            }
            continue;
        }

        let text = field.text().await.map_err(|err| {
            tracing::debug!(error = %err, field = %name, "form field could not be read");
            ApiError::bad_request(INVALID_SUBMISSION)
        })?;
        values.entry(name).or_insert(text);
    }

    let resume = resume.ok_or_else(|| ApiError::bad_request(INVALID_SUBMISSION))?;
    Ok(ApplicationSubmission::Multipart {
        form: FormFields::from_map(values),
        resume,
    })
}

#[async_trait]
impl<S> FromRequest<S> for ApplicationSubmission
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state).await.map_err(|err| {
                tracing::debug!(error = %err, "multipart submission rejected");
                ApiError::bad_request(INVALID_SUBMISSION)
            })?;
            return read_multipart(multipart).await;
        }

        // Any other body is decoded as JSON whatever its declared content type.
        let bytes = Bytes::from_request(req, state).await.map_err(|err| {
            tracing::debug!(error = %err, "submission body unreadable");
            ApiError::bad_request(INVALID_SUBMISSION)
        })?;
        let body = serde_json::from_slice::<JsonSubmission>(&bytes).map_err(|err| {
            tracing::debug!(error = %err, "json submission rejected");
            ApiError::bad_request(INVALID_SUBMISSION)
        })?;
        Ok(ApplicationSubmission::Json(body))
    }
}
