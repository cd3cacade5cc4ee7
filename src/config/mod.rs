// ABOUTME: Configuration types and parsing for pagelift.yml.
// ABOUTME: Handles YAML parsing, config discovery, and the init template.

use crate::error::{Error, Result};
use crate::quota::Plan;
use crate::remote::RetryPolicy;
use crate::types::RepoName;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "pagelift.yml";
pub const CONFIG_FILENAME_ALT: &str = "pagelift.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".pagelift/config.yml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Repository the site deploys to.
    #[serde(default, deserialize_with = "deserialize_repo_name")]
    pub repo: Option<RepoName>,

    /// Project directory to deploy. Defaults to the current directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default, deserialize_with = "deserialize_plan")]
    pub plan: Plan,

    /// Serve the site from this domain instead of the default subdomain.
    #[serde(default)]
    pub custom_domain: Option<String>,

    /// Alternate API root, for self-hosted forges.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Path segments excluded from uploads on top of the built-in set.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub retry: RetryPolicy,
}

/// Upload pacing limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Most project files uploaded in one run.
    pub max_files: usize,

    /// Wait after repository creation before uploading.
    #[serde(with = "humantime_serde")]
    pub settle_delay: Duration,

    /// Pause inserted after every few uploads.
    #[serde(with = "humantime_serde")]
    pub upload_pause: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files: 20,
            settle_delay: Duration::from_secs(2),
            upload_pause: Duration::from_millis(500),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Discover a config, or fall back to defaults so a bare directory
    /// deploys without one.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Ok(config) => Ok(config),
            Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn template() -> Self {
        Config {
            repo: Some(RepoName::new("my-site").unwrap()),
            dir: None,
            plan: Plan::Free,
            custom_domain: None,
            api_base: None,
            exclude: Vec::new(),
            limits: Limits::default(),
            retry: RetryPolicy::default(),
        }
    }
}

pub fn init_config(dir: &Path, repo: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(r) = repo {
        config.repo = Some(RepoName::new(r).map_err(|e| Error::InvalidConfig(e.to_string()))?);
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let repo = config
        .repo
        .as_ref()
        .map(RepoName::as_str)
        .unwrap_or("my-site");
    format!(
        r#"repo: {}
plan: {}

# custom_domain: www.example.com
# exclude:
#   - coverage
"#,
        repo, config.plan
    )
}

// Custom deserializers

fn deserialize_repo_name<'de, D>(deserializer: D) -> std::result::Result<Option<RepoName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(s) => RepoName::new(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

fn deserialize_plan<'de, D>(deserializer: D) -> std::result::Result<Plan, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Plan::parse(&s))
}
