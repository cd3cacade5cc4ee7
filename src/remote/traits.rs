// ABOUTME: Capability traits for the remote hosting API, split by concern.
// ABOUTME: Implemented by GithubClient in production and by recording fakes in tests.

use async_trait::async_trait;
use serde::Deserialize;

use crate::types::RepoName;

use super::error::Result;

/// The account behind the configured credential, as reported by the
/// identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Outcome of a repository-creation request.
///
/// An existing repository is a first-class outcome rather than an error:
/// re-running a deployment against a repository created earlier is the
/// idempotent path, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateRepoOutcome {
    Created,
    AlreadyExists,
}

/// Metadata for a file that already exists in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileMeta {
    /// Content hash required as a precondition when overwriting.
    pub sha: String,
}

/// Credential verification.
#[async_trait]
pub trait IdentityOps: Send + Sync {
    /// Resolve the account that owns the configured token.
    async fn get_identity(&self) -> Result<Account>;
}

/// Repository lifecycle.
#[async_trait]
pub trait RepoOps: Send + Sync {
    /// Create a public repository under the authenticated account.
    async fn create_repo(&self, name: &RepoName) -> Result<CreateRepoOutcome>;

    /// Turn on static hosting from the root of the default branch.
    async fn enable_hosting(&self, owner: &str, repo: &RepoName) -> Result<()>;
}

/// File content reads and writes.
#[async_trait]
pub trait ContentOps: Send + Sync {
    /// Look up the content hash at `path`, or `None` when the file is absent.
    async fn get_file_meta(
        &self,
        owner: &str,
        repo: &RepoName,
        path: &str,
    ) -> Result<Option<FileMeta>>;

    /// Create or overwrite a file. `prior_sha` is the overwrite
    /// precondition returned by [`ContentOps::get_file_meta`]; pass `None`
    /// to create a new file.
    async fn put_file(
        &self,
        owner: &str,
        repo: &RepoName,
        path: &str,
        content: &[u8],
        prior_sha: Option<&str>,
    ) -> Result<()>;
}
