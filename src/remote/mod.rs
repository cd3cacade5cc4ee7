// ABOUTME: Client layer for the remote source-hosting API.
// ABOUTME: Capability traits, shared wire types, retry policy, and the reqwest implementation.

mod error;
mod github;
mod retry;
mod traits;

pub use error::{ApiError, Result};
pub use github::{DEFAULT_API_BASE, GithubClient};
pub use retry::{RetryPolicy, with_retry};
pub use traits::{Account, ContentOps, CreateRepoOutcome, FileMeta, IdentityOps, RepoOps};
