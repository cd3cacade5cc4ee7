// ABOUTME: Application-wide error types for pagelift.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::quota::QuotaDenial;
use crate::remote::ApiError;
use crate::store::StoreError;

/// Where a personal access token with the right scopes can be created.
pub const TOKEN_HELP_URL: &str = "https://github.com/settings/tokens/new?scopes=repo,workflow,user";

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no repository name given; pass --repo or set `repo` in pagelift.yml")]
    MissingRepo,

    #[error(
        "no access token given; pass --token, set GITHUB_TOKEN, or store one with `pagelift verify --save` (create a token at {})",
        TOKEN_HELP_URL
    )]
    MissingToken,

    #[error("no uploadable files found in {0}")]
    EmptyProject(PathBuf),

    #[error("no index.html found in {0}")]
    NoEntryPoint(PathBuf),

    #[error("deployment not allowed: {0}")]
    Quota(#[from] QuotaDenial),

    #[error("{0}")]
    Deploy(#[from] DeployError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
