// ABOUTME: In-memory remote API double that records every call in order.
// ABOUTME: Failure switches let tests exercise each abort path deterministically.

use async_trait::async_trait;
use parking_lot::Mutex;

use pagelift::remote::{
    Account, ApiError, ContentOps, CreateRepoOutcome, FileMeta, IdentityOps, RepoOps, Result,
};
use pagelift::types::RepoName;

/// One recorded call against the fake remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetIdentity,
    CreateRepo { name: String },
    EnableHosting { owner: String, repo: String },
    GetFileMeta { path: String },
    PutFile { path: String, had_sha: bool },
}

#[derive(Default)]
pub struct RecordingApi {
    pub calls: Mutex<Vec<ApiCall>>,
    /// Identity lookups fail with 401.
    pub fail_identity: bool,
    /// Repository creation reports the name as taken.
    pub repo_exists: bool,
    /// Hosting enablement fails with 409.
    pub fail_hosting: bool,
    /// Paths that already exist remotely, with their content hash.
    pub existing: Vec<(String, String)>,
    /// Uploads of this path fail with 500.
    pub fail_put_at: Option<String>,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Paths written so far, in call order.
    pub fn puts(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ApiCall::PutFile { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl IdentityOps for RecordingApi {
    async fn get_identity(&self) -> Result<Account> {
        self.record(ApiCall::GetIdentity);
        if self.fail_identity {
            return Err(ApiError::Http {
                status: 401,
                message: "Bad credentials".to_string(),
            });
        }
        Ok(Account {
            login: "octocat".to_string(),
        })
    }
}

#[async_trait]
impl RepoOps for RecordingApi {
    async fn create_repo(&self, name: &RepoName) -> Result<CreateRepoOutcome> {
        self.record(ApiCall::CreateRepo {
            name: name.to_string(),
        });
        if self.repo_exists {
            Ok(CreateRepoOutcome::AlreadyExists)
        } else {
            Ok(CreateRepoOutcome::Created)
        }
    }

    async fn enable_hosting(&self, owner: &str, repo: &RepoName) -> Result<()> {
        self.record(ApiCall::EnableHosting {
            owner: owner.to_string(),
            repo: repo.to_string(),
        });
        if self.fail_hosting {
            return Err(ApiError::Http {
                status: 409,
                message: "hosting already configured".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentOps for RecordingApi {
    async fn get_file_meta(
        &self,
        _owner: &str,
        _repo: &RepoName,
        path: &str,
    ) -> Result<Option<FileMeta>> {
        self.record(ApiCall::GetFileMeta {
            path: path.to_string(),
        });
        Ok(self
            .existing
            .iter()
            .find(|(existing_path, _)| existing_path == path)
            .map(|(_, sha)| FileMeta { sha: sha.clone() }))
    }

    async fn put_file(
        &self,
        _owner: &str,
        _repo: &RepoName,
        path: &str,
        _content: &[u8],
        prior_sha: Option<&str>,
    ) -> Result<()> {
        self.record(ApiCall::PutFile {
            path: path.to_string(),
            had_sha: prior_sha.is_some(),
        });
        if self.fail_put_at.as_deref() == Some(path) {
            return Err(ApiError::Http {
                status: 500,
                message: "upload rejected".to_string(),
            });
        }
        Ok(())
    }
}
