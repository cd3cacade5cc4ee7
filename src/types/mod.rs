// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Keeps invalid repository names from ever reaching the remote API.

mod repo_name;

pub use repo_name::{RepoName, RepoNameError};
