// ABOUTME: Integration tests for configuration parsing and discovery.
// ABOUTME: Tests YAML parsing, defaults, file discovery, and the init template.

use pagelift::config::*;
use pagelift::quota::Plan;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = "repo: my-site\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "my-site");
        assert_eq!(config.plan, Plan::Free);
        assert!(config.custom_domain.is_none());
        assert_eq!(config.limits, Limits::default());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
repo: my-site
dir: site
plan: pro
custom_domain: www.example.com
api_base: https://github.internal.example.com/api/v3
exclude:
  - coverage
  - tmp
limits:
  max_files: 10
  settle_delay: 0s
  upload_pause: 250ms
retry:
  max_attempts: 5
  base_delay: 100ms
  rate_limit_delay: 1s
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "my-site");
        assert_eq!(config.dir.unwrap().to_str(), Some("site"));
        assert_eq!(config.plan, Plan::Pro);
        assert_eq!(config.custom_domain.as_deref(), Some("www.example.com"));
        assert_eq!(
            config.api_base.as_deref(),
            Some("https://github.internal.example.com/api/v3")
        );
        assert_eq!(config.exclude, vec!["coverage", "tmp"]);
        assert_eq!(config.limits.max_files, 10);
        assert_eq!(config.limits.settle_delay, Duration::ZERO);
        assert_eq!(config.limits.upload_pause, Duration::from_millis(250));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay, Duration::from_millis(100));
        assert_eq!(config.retry.rate_limit_delay, Duration::from_secs(1));
    }

    #[test]
    fn empty_mapping_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert!(config.repo.is_none());
        assert_eq!(config.plan, Plan::Free);
        assert_eq!(config.limits, Limits::default());
    }

    #[test]
    fn invalid_repo_name_returns_error() {
        let err = Config::from_yaml("repo: \"my site!\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn unknown_plan_parses_but_fails_closed() {
        let config = Config::from_yaml("plan: enterprise\n").unwrap();
        assert_eq!(config.plan, Plan::Unrecognized);
    }

    #[test]
    fn unknown_retry_field_returns_error() {
        let yaml = "retry:\n  max_attempts: 2\n  bogus: 1\n";
        assert!(Config::from_yaml(yaml).is_err());
    }
}

mod discovery {
    use super::*;

    #[test]
    fn discover_prefers_the_primary_filename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "repo: primary\n").unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME_ALT), "repo: alternate\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "primary");
    }

    #[test]
    fn discover_falls_back_to_the_dotdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".pagelift")).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME_DIR), "repo: hidden\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "hidden");
    }

    #[test]
    fn load_or_default_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert!(config.repo.is_none());
        assert_eq!(config.plan, Plan::Free);
    }

    #[test]
    fn load_or_default_surfaces_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "repo: [not, a, string]\n").unwrap();
        assert!(Config::load_or_default(dir.path()).is_err());
    }
}

mod init {
    use super::*;

    #[test]
    fn init_writes_a_parseable_template() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), None, false).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "my-site");
        assert_eq!(config.plan, Plan::Free);
    }

    #[test]
    fn init_honors_the_repo_argument() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), Some("portfolio"), false).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "portfolio");
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), None, false).unwrap();

        assert!(init_config(dir.path(), Some("other"), false).is_err());
        assert!(init_config(dir.path(), Some("other"), true).is_ok());

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.repo.unwrap().as_str(), "other");
    }

    #[test]
    fn init_rejects_invalid_repo_names() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init_config(dir.path(), Some("bad name"), false).is_err());
    }
}
