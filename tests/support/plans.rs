// ABOUTME: Deployment plan builders for integration tests.
// ABOUTME: Produces static-site plans with synthesized infrastructure and instant pacing.

use std::time::Duration;

use nonempty::NonEmpty;

use pagelift::deploy::{DeployPlan, DeploySettings};
use pagelift::infra;
use pagelift::project::{Classification, ProjectFile};
use pagelift::types::RepoName;

/// Plan for a plain static project with the given files, in the given order.
pub fn static_plan(paths: &[&str]) -> DeployPlan {
    plan_with_domain(paths, None)
}

/// Same as [`static_plan`] but served from a custom domain.
pub fn plan_with_domain(paths: &[&str], custom_domain: Option<&str>) -> DeployPlan {
    let repo = RepoName::new("my-site").unwrap();
    let files: Vec<ProjectFile> = paths
        .iter()
        .map(|path| ProjectFile::new(*path, format!("content of {path}").into_bytes()))
        .collect();
    let infra = infra::synthesize(&Classification::default(), &repo, custom_domain);

    DeployPlan {
        repo,
        files: NonEmpty::from_vec(files).unwrap(),
        custom_domain: custom_domain.map(str::to_string),
        infra,
    }
}

/// Settings with no pacing delays so tests run instantly.
pub fn instant_settings() -> DeploySettings {
    DeploySettings {
        max_files: 20,
        settle_delay: Duration::ZERO,
        upload_pause: Duration::ZERO,
    }
}
