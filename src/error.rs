use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InstallerError>;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Download failed: {url} ({message})")]
    Download { url: String, message: String },

    #[error("Archive {path} is missing after download")]
    MissingArchive { path: PathBuf },

    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Step '{step}' failed: {message}")]
    StepFailure { step: String, message: String },

    #[error("Invalid version format: '{version}'")]
    InvalidVersion { version: String },

    #[error("Required tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },
}

impl InstallerError {
    pub fn step<S: Into<String>, M: Into<String>>(step: S, message: M) -> Self {
        InstallerError::StepFailure {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn usage<S: Into<String>>(message: S) -> Self {
        InstallerError::Usage {
            message: message.into(),
        }
    }
}

/// Wraps any error raised inside an install step so the failing step is named.
pub trait StepContext<T> {
    fn step(self, step: &str) -> Result<T>;
}

impl<T> StepContext<T> for Result<T> {
    fn step(self, step: &str) -> Result<T> {
        self.map_err(|e| match e {
            InstallerError::StepFailure { .. }
            | InstallerError::Download { .. }
            | InstallerError::MissingArchive { .. } => e,
            other => InstallerError::step(step, other.to_string()),
        })
    }
}
