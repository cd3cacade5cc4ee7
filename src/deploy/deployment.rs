// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: Carries the upload plan, pacing settings, and progress log through transitions.

use std::marker::PhantomData;
use std::time::Duration;

use nonempty::NonEmpty;
use serde::Serialize;

use crate::infra::InfraPlan;
use crate::project::ProjectFile;
use crate::remote::Account;
use crate::types::RepoName;

use super::progress::ProgressLog;
use super::state::Initialized;

/// Everything a deployment run needs to know up front.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub repo: RepoName,
    pub files: NonEmpty<ProjectFile>,
    pub custom_domain: Option<String>,
    pub infra: InfraPlan,
}

/// Pacing knobs for a deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploySettings {
    /// Most project files uploaded in one run; the rest are skipped.
    pub max_files: usize,
    /// Wait after repository creation before touching its contents.
    pub settle_delay: Duration,
    /// Pause inserted after every few uploads.
    pub upload_pause: Duration,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            max_files: 20,
            settle_delay: Duration::from_secs(2),
            upload_pause: Duration::from_millis(500),
        }
    }
}

/// A deployment in progress, parameterized by its current state.
///
/// The state type parameter `S` restricts which transition methods exist,
/// so a run cannot upload files before the repository exists or record
/// usage before the upload finished.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) plan: DeployPlan,
    pub(crate) settings: DeploySettings,
    pub(crate) log: ProgressLog,
    pub(crate) account: Option<Account>,
    pub(crate) uploaded: usize,
    pub(crate) skipped: usize,
    pub(crate) _state: PhantomData<S>,
}

impl Deployment<Initialized> {
    pub fn new(plan: DeployPlan, settings: DeploySettings, log: ProgressLog) -> Self {
        Deployment {
            plan,
            settings,
            log,
            account: None,
            uploaded: 0,
            skipped: 0,
            _state: PhantomData,
        }
    }
}

impl<S> Deployment<S> {
    /// Name of the repository this run targets.
    pub fn repo(&self) -> &RepoName {
        &self.plan.repo
    }

    /// The full upload plan.
    pub fn plan(&self) -> &DeployPlan {
        &self.plan
    }
}

/// Summary of a finished deployment.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    /// Login of the account the site was deployed under.
    pub account: String,
    pub repo: String,
    pub repo_url: String,
    pub live_url: String,
    /// Files written to the repository, infrastructure included.
    pub uploaded: usize,
    /// Project files left behind by the per-run upload limit.
    pub skipped: usize,
}
