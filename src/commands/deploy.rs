// ABOUTME: Deploy command implementation.
// ABOUTME: Gates on quota, plans the upload, and drives the deployment state machine.

use std::env;
use std::path::PathBuf;

use chrono::Utc;
use nonempty::NonEmpty;

use pagelift::config::Config;
use pagelift::deploy::{
    DeployPlan, DeployReport, DeploySettings, Deployment, Initialized, ProgressLog,
};
use pagelift::error::{Error, Result};
use pagelift::output::{Output, OutputMode};
use pagelift::project::{self, Classification};
use pagelift::quota::{self, Plan};
use pagelift::remote::{ContentOps, GithubClient, IdentityOps, RepoOps};
use pagelift::store::{CredentialStore, FileCredentialStore, FileUsageStore, UsageStore};
use pagelift::infra;
use pagelift::types::RepoName;

use super::token::resolve_token;

/// Flag-level inputs to the deploy command. Unset fields fall back to the
/// discovered config, then to defaults.
#[derive(Debug, Default)]
pub struct DeployArgs {
    pub dir: Option<PathBuf>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub save_token: bool,
    pub custom_domain: Option<String>,
    pub plan: Option<String>,
}

/// Deploy the project to a fresh or existing repository.
pub async fn deploy(args: DeployArgs, mode: OutputMode) -> Result<()> {
    let mut output = Output::new(mode);
    output.start_timer();

    let cwd = env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    let repo = match args.repo {
        Some(name) => RepoName::new(&name).map_err(|e| Error::InvalidConfig(e.to_string()))?,
        None => config.repo.clone().ok_or(Error::MissingRepo)?,
    };
    let dir = args.dir.or_else(|| config.dir.clone()).unwrap_or(cwd);
    let plan = match args.plan.as_deref() {
        Some(value) => Plan::parse(value),
        None => config.plan,
    };
    let custom_domain = args
        .custom_domain
        .or_else(|| config.custom_domain.clone());

    let credentials = FileCredentialStore::at_default_location();
    let token = resolve_token(args.token, &credentials)?;
    if args.save_token {
        credentials.save(&token)?;
    }

    // The quota gate runs before anything touches the network.
    let usage = FileUsageStore::at_default_location();
    let history = usage.load()?;
    quota::check(plan, &history, Utc::now())?;

    output.progress(&format!(
        "Deploying {} to repository '{}'",
        dir.display(),
        repo
    ));

    output.progress("  → Analyzing project structure...");
    let files = project::scan_dir(&dir, &config.exclude).await?;
    if files.is_empty() {
        return Err(Error::EmptyProject(dir));
    }

    let classification = project::classify(&files);
    if !project::has_entry_point(&files) {
        output.warning("No index.html found; the deployed site may not render");
    }
    output.progress(&format!(
        "  → Detected language: {}",
        describe(&classification)
    ));

    output.progress("  → Generating deployment workflow...");
    let infra = infra::synthesize(&classification, &repo, custom_domain.as_deref());

    let api_base = config
        .api_base
        .clone()
        .unwrap_or_else(|| pagelift::remote::DEFAULT_API_BASE.to_string());
    let client = GithubClient::with_base_url(&api_base, &token, config.retry.clone())?;

    let files = NonEmpty::from_vec(files).expect("project must contain at least one file");
    let settings = DeploySettings {
        max_files: config.limits.max_files,
        settle_delay: config.limits.settle_delay,
        upload_pause: config.limits.upload_pause,
    };
    let deploy_plan = DeployPlan {
        repo,
        files,
        custom_domain,
        infra,
    };

    // Progress entries flow over a channel to a printer task, so the
    // machine never blocks on terminal output.
    let (log, mut rx) = ProgressLog::channel();
    let printer = tokio::spawn(async move {
        let output = Output::new(mode);
        while let Some(entry) = rx.recv().await {
            output.log_entry(&entry);
        }
    });

    let deployment = Deployment::new(deploy_plan, settings, log.clone());
    let result = run_machine(deployment, &client, &usage).await;

    if let Err(error) = &result {
        log.error(error.to_string());
    }
    drop(log);
    let _ = printer.await;

    let report = result?;

    if mode == OutputMode::Json {
        if let Ok(json) = serde_json::to_string(&report) {
            println!("{json}");
        }
    } else {
        output.progress(&format!("Repository: {}", report.repo_url));
    }
    output.success(&format!("Site live at {}", report.live_url));

    Ok(())
}

/// Run the deployment state machine to completion.
async fn run_machine<R, U>(
    deployment: Deployment<Initialized>,
    remote: &R,
    usage: &U,
) -> Result<DeployReport>
where
    R: IdentityOps + RepoOps + ContentOps,
    U: UsageStore,
{
    let report = deployment
        .verify_token(remote)
        .await?
        .create_repo(remote)
        .await?
        .enable_hosting(remote)
        .await
        .upload_files(remote)
        .await?
        .complete(usage, Utc::now())?;

    Ok(report)
}

fn describe(classification: &Classification) -> String {
    if classification.is_bundler_framework {
        format!("{} (vite)", classification.language)
    } else {
        classification.language.to_string()
    }
}
