// ABOUTME: Error types for deployment state transitions with SNAFU pattern.
// ABOUTME: Wraps remote and storage failures, classified by kind for programmatic handling.

use snafu::Snafu;

use crate::remote::ApiError;
use crate::store::StoreError;

/// Unified error for deployment state transitions.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DeployError {
    #[snafu(display("token verification failed: {source}"))]
    AuthInvalid { source: ApiError },

    #[snafu(display("repository creation failed: {source}"))]
    RepoCreateFailed { source: ApiError },

    #[snafu(display("upload of {path} failed: {source}"))]
    UploadFailed { path: String, source: ApiError },

    #[snafu(display("recording usage failed: {source}"))]
    UsageUnavailable { source: StoreError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// The identity endpoint rejected the token.
    AuthInvalid,
    /// The remote API rate limited the run past the retry budget.
    RateLimited,
    /// A request never produced a response.
    Transport,
    /// Repository creation was refused.
    RepoUnavailable,
    /// Some files may have landed before an upload failed.
    PartialUpload,
    /// Local usage state could not be updated.
    Storage,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::AuthInvalid { source } => match source {
                ApiError::RateLimited { .. } => DeployErrorKind::RateLimited,
                ApiError::Transport(_) => DeployErrorKind::Transport,
                ApiError::Http { .. } => DeployErrorKind::AuthInvalid,
            },
            DeployError::RepoCreateFailed { source } => match source {
                ApiError::RateLimited { .. } => DeployErrorKind::RateLimited,
                ApiError::Transport(_) => DeployErrorKind::Transport,
                ApiError::Http { .. } => DeployErrorKind::RepoUnavailable,
            },
            DeployError::UploadFailed { source, .. } => match source {
                ApiError::RateLimited { .. } => DeployErrorKind::RateLimited,
                _ => DeployErrorKind::PartialUpload,
            },
            DeployError::UsageUnavailable { .. } => DeployErrorKind::Storage,
        }
    }

    /// Path of the file whose upload failed, when that is what went wrong.
    pub fn failed_path(&self) -> Option<&str> {
        match self {
            DeployError::UploadFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}
