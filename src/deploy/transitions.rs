// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use snafu::ResultExt;

use crate::project::{ProjectFile, is_excluded};
use crate::remote::{Account, ContentOps, CreateRepoOutcome, IdentityOps, RepoOps};
use crate::store::UsageStore;

use super::Deployment;
use super::deployment::DeployReport;
use super::domain;
use super::error::{
    AuthInvalidSnafu, DeployError, RepoCreateFailedSnafu, UploadFailedSnafu, UsageUnavailableSnafu,
};
use super::state::{HostingEnabled, Initialized, RepoReady, TokenVerified, Uploaded};

/// Progress is reported and a pause inserted after this many project files.
const UPLOAD_PROGRESS_BATCH: usize = 3;

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Deployment<S> {
    /// Internal helper to transition to a new state.
    fn transition<T>(self) -> Deployment<T> {
        Deployment {
            plan: self.plan,
            settings: self.settings,
            log: self.log,
            account: self.account,
            uploaded: self.uploaded,
            skipped: self.skipped,
            _state: PhantomData,
        }
    }

    /// Internal helper to transition once the account is known.
    fn transition_with_account<T>(self, account: Account) -> Deployment<T> {
        Deployment {
            account: Some(account),
            ..self.transition()
        }
    }

    /// Internal helper to transition with final upload counts.
    fn transition_with_upload_counts<T>(self, uploaded: usize, skipped: usize) -> Deployment<T> {
        Deployment {
            uploaded,
            skipped,
            ..self.transition()
        }
    }

    /// Login of the verified account.
    fn owner_login(&self) -> &str {
        &self
            .account
            .as_ref()
            .expect("account must be verified before remote operations")
            .login
    }

    /// Create or update a single file, fetching the overwrite precondition
    /// first.
    async fn put<R: ContentOps>(
        &self,
        remote: &R,
        path: &str,
        content: &[u8],
    ) -> Result<(), DeployError> {
        let owner = self.owner_login();
        let prior = remote
            .get_file_meta(owner, &self.plan.repo, path)
            .await
            .context(UploadFailedSnafu { path })?;
        remote
            .put_file(
                owner,
                &self.plan.repo,
                path,
                content,
                prior.as_ref().map(|meta| meta.sha.as_str()),
            )
            .await
            .context(UploadFailedSnafu { path })?;
        Ok(())
    }
}

// =============================================================================
// Initialized -> TokenVerified
// =============================================================================

impl Deployment<Initialized> {
    /// Verify the token against the identity endpoint.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::AuthInvalid` if the identity lookup fails.
    #[must_use = "deployment state must be used"]
    pub async fn verify_token<R: IdentityOps>(
        self,
        remote: &R,
    ) -> Result<Deployment<TokenVerified>, DeployError> {
        self.log.info("Verifying access token...");
        let account = remote.get_identity().await.context(AuthInvalidSnafu)?;
        self.log.success(format!("Authenticated as {}", account.login));
        Ok(self.transition_with_account(account))
    }
}

// =============================================================================
// TokenVerified -> RepoReady
// =============================================================================

impl Deployment<TokenVerified> {
    /// Create the repository, reusing it when the name is already taken.
    ///
    /// Waits for the configured settle delay afterwards so content
    /// requests that follow see the new repository.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::RepoCreateFailed` if creation is refused for
    /// any reason other than the repository already existing.
    #[must_use = "deployment state must be used"]
    pub async fn create_repo<R: RepoOps>(
        self,
        remote: &R,
    ) -> Result<Deployment<RepoReady>, DeployError> {
        self.log
            .info(format!("Creating repository '{}'...", self.plan.repo));
        let outcome = remote
            .create_repo(&self.plan.repo)
            .await
            .context(RepoCreateFailedSnafu)?;
        match outcome {
            CreateRepoOutcome::Created => self.log.success("Repository created"),
            CreateRepoOutcome::AlreadyExists => {
                self.log.info("Repository already exists, reusing it");
            }
        }

        if !self.settings.settle_delay.is_zero() {
            tokio::time::sleep(self.settings.settle_delay).await;
        }

        Ok(self.transition())
    }
}

// =============================================================================
// RepoReady -> HostingEnabled
// =============================================================================

impl Deployment<RepoReady> {
    /// Ask the hosting service to serve the default branch root.
    ///
    /// Failures are reported as warnings and never abort the run; the
    /// workflow uploaded later finishes hosting setup on its own.
    #[must_use = "deployment state must be used"]
    pub async fn enable_hosting<R: RepoOps>(self, remote: &R) -> Deployment<HostingEnabled> {
        self.log.info("Enabling GitHub Pages...");
        if let Err(error) = remote
            .enable_hosting(self.owner_login(), &self.plan.repo)
            .await
        {
            self.log.warning(format!(
                "Could not enable GitHub Pages automatically: {error}"
            ));
        }
        self.transition()
    }
}

// =============================================================================
// HostingEnabled -> Uploaded
// =============================================================================

impl Deployment<HostingEnabled> {
    /// Upload hosting markers, project files, and the workflow, in that
    /// order.
    ///
    /// Markers go first so the very first render honors them. The workflow
    /// goes last so it only ever runs against complete content. Files under
    /// excluded directories never upload, even when the caller's list still
    /// contains them. At most `max_files` project files are uploaded; the
    /// rest are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::UploadFailed` naming the file that failed.
    /// Files uploaded before the failure stay in the repository.
    #[must_use = "deployment state must be used"]
    pub async fn upload_files<R: ContentOps>(
        self,
        remote: &R,
    ) -> Result<Deployment<Uploaded>, DeployError> {
        self.log.info("Uploading project files...");
        let mut uploaded = 0usize;

        for marker in &self.plan.infra.markers {
            self.put(remote, &marker.path, marker.content.as_bytes())
                .await?;
            uploaded += 1;
        }

        let eligible: Vec<&ProjectFile> = self
            .plan
            .files
            .iter()
            .filter(|file| !is_excluded(&file.path, &[]))
            .collect();

        let total = eligible.len();
        let cap = self.settings.max_files;
        let skipped = total.saturating_sub(cap);
        if skipped > 0 {
            self.log
                .warning(format!("Uploading only the first {cap} of {total} files"));
        }

        let mut project_count = 0usize;
        for file in eligible.into_iter().take(cap) {
            self.put(remote, &file.path, &file.content).await?;
            uploaded += 1;
            project_count += 1;
            if project_count % UPLOAD_PROGRESS_BATCH == 0 {
                self.log.info(format!("Uploaded {project_count} files..."));
                if !self.settings.upload_pause.is_zero() {
                    tokio::time::sleep(self.settings.upload_pause).await;
                }
            }
        }

        if let Some(pipeline) = &self.plan.infra.pipeline {
            self.put(remote, &pipeline.path, pipeline.content.as_bytes())
                .await?;
            uploaded += 1;
        }

        Ok(self.transition_with_upload_counts(uploaded, skipped))
    }
}

// =============================================================================
// Uploaded - Terminal State
// =============================================================================

impl Deployment<Uploaded> {
    /// Record the spent deployment and produce the final report.
    ///
    /// Usage is recorded here and nowhere else, so failed runs never
    /// consume quota.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::UsageUnavailable` if the usage store cannot
    /// be written.
    pub fn complete<U: UsageStore>(
        self,
        usage: &U,
        now: DateTime<Utc>,
    ) -> Result<DeployReport, DeployError> {
        usage.record(now).context(UsageUnavailableSnafu)?;

        let owner = self.owner_login().to_string();
        let live_url = domain::live_url(&owner, &self.plan.repo, self.plan.custom_domain.as_deref());
        self.log
            .success(format!("Deployment complete. Your site is live at {live_url}"));

        Ok(DeployReport {
            repo_url: domain::repo_url(&owner, &self.plan.repo),
            live_url,
            account: owner,
            repo: self.plan.repo.to_string(),
            uploaded: self.uploaded,
            skipped: self.skipped,
        })
    }
}
