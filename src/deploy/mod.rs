// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Deployment struct, and the progress stream.

mod deployment;
mod domain;
mod error;
mod progress;
mod state;
mod transitions;

pub use deployment::{DeployPlan, DeployReport, DeploySettings, Deployment};
pub use domain::{HOSTING_HOST_SUFFIX, live_url, repo_url};
pub use error::{DeployError, DeployErrorKind};
pub use progress::{LogEntry, ProgressLog, Severity};
pub use state::{HostingEnabled, Initialized, RepoReady, TokenVerified, Uploaded};
