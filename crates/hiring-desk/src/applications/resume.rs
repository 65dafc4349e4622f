use std::path::{Path, PathBuf};

use tokio::fs::File;

use super::submission::ResumeUpload;

/// Local directory holding uploaded resumes, keyed by original file name.
#[derive(Debug, Clone)]
pub struct ResumeStore {
    root: PathBuf,
}

/// An opened resume ready to be streamed back to a client.
#[derive(Debug)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub file: File,
}

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("resume file name '{0}' has no usable final segment")]
    InvalidFileName(String),
    #[error("resume file i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ResumeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the upload under the store root, replacing any file of the same
    /// name, and return the stored reference.
    pub async fn save(&self, upload: &ResumeUpload) -> Result<String, ResumeError> {
        let file_name = Path::new(&upload.file_name)
            .file_name()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ResumeError::InvalidFileName(upload.file_name.clone()))?;

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &upload.bytes).await?;

        tracing::debug!(path = %path.display(), bytes = upload.bytes.len(), "stored resume upload");
        Ok(path.to_string_lossy().into_owned())
    }

    /// Open a stored reference. References are paths relative to the working
    /// directory, exactly as recorded at submission time.
    pub async fn open(&self, reference: &str) -> Result<ResumeFile, ResumeError> {
        let file = File::open(reference).await?;
        Ok(ResumeFile {
            file_name: download_name(reference),
            content_type: mime_guess::from_path(reference).first_or_octet_stream(),
            file,
        })
    }
}

/// Final path segment of a stored reference, used as the download file name.
pub fn download_name(reference: &str) -> String {
    Path::new(reference)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| reference.to_string())
}
