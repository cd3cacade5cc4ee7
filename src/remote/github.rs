// ABOUTME: GitHub REST implementation of the remote capability traits.
// ABOUTME: Wraps every endpoint in the shared retry policy and maps status codes to outcomes.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;

use crate::types::RepoName;

use super::error::{ApiError, Result};
use super::retry::{RetryPolicy, with_retry};
use super::traits::{Account, ContentOps, CreateRepoOutcome, FileMeta, IdentityOps, RepoOps};

/// API root for github.com. Overridable for GitHub Enterprise and tests.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
/// Preview media type still required by the hosting-enable endpoint.
const ACCEPT_HOSTING_PREVIEW: &str = "application/vnd.github.switcheroo-preview+json";
const COMMIT_MESSAGE: &str = "Deploy via pagelift";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    retry: RetryPolicy,
}

impl GithubClient {
    pub fn new(token: &str, retry: RetryPolicy) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE, token, retry)
    }

    pub fn with_base_url(base_url: &str, token: &str, retry: RetryPolicy) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pagelift/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
            retry,
        })
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token)
    }

    /// Contents URL with each path segment encoded individually, so the
    /// separating slashes keep their meaning.
    fn contents_url(&self, owner: &str, repo: &RepoName, path: &str) -> String {
        let encoded = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/repos/{owner}/{repo}/contents/{encoded}", self.base_url)
    }

    /// Map a non-success response to an error. 403 and 429 become the
    /// retryable rate-limit class; everything else is terminal.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited {
                status: status.as_u16(),
            });
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct CreateRepoBody {
    name: String,
    private: bool,
    auto_init: bool,
}

#[derive(Debug, Clone, Serialize)]
struct HostingBody {
    source: HostingSource,
}

#[derive(Debug, Clone, Serialize)]
struct HostingSource {
    branch: String,
    path: String,
}

#[derive(Debug, Clone, Serialize)]
struct PutFileBody {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[async_trait]
impl IdentityOps for GithubClient {
    async fn get_identity(&self) -> Result<Account> {
        let url = format!("{}/user", self.base_url);
        with_retry(&self.retry, || {
            let url = url.clone();
            async move {
                let response = self
                    .http
                    .get(&url)
                    .header(AUTHORIZATION, self.auth_header())
                    .header(ACCEPT, ACCEPT_JSON)
                    .send()
                    .await?;
                let response = Self::check(response).await?;
                Ok(response.json::<Account>().await?)
            }
        })
        .await
    }
}

#[async_trait]
impl RepoOps for GithubClient {
    async fn create_repo(&self, name: &RepoName) -> Result<CreateRepoOutcome> {
        let url = format!("{}/user/repos", self.base_url);
        let body = CreateRepoBody {
            name: name.as_str().to_string(),
            private: false,
            auto_init: true,
        };
        with_retry(&self.retry, || {
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = self
                    .http
                    .post(&url)
                    .header(AUTHORIZATION, self.auth_header())
                    .header(ACCEPT, ACCEPT_JSON)
                    .json(&body)
                    .send()
                    .await?;
                // 422 means the repository already exists under this account.
                if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
                    return Ok(CreateRepoOutcome::AlreadyExists);
                }
                Self::check(response).await?;
                Ok(CreateRepoOutcome::Created)
            }
        })
        .await
    }

    async fn enable_hosting(&self, owner: &str, repo: &RepoName) -> Result<()> {
        let url = format!("{}/repos/{owner}/{repo}/pages", self.base_url);
        let body = HostingBody {
            source: HostingSource {
                branch: "main".to_string(),
                path: "/".to_string(),
            },
        };
        with_retry(&self.retry, || {
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = self
                    .http
                    .post(&url)
                    .header(AUTHORIZATION, self.auth_header())
                    .header(ACCEPT, ACCEPT_HOSTING_PREVIEW)
                    .json(&body)
                    .send()
                    .await?;
                Self::check(response).await?;
                Ok(())
            }
        })
        .await
    }
}

#[async_trait]
impl ContentOps for GithubClient {
    async fn get_file_meta(
        &self,
        owner: &str,
        repo: &RepoName,
        path: &str,
    ) -> Result<Option<FileMeta>> {
        let url = self.contents_url(owner, repo, path);
        with_retry(&self.retry, || {
            let url = url.clone();
            async move {
                let response = self
                    .http
                    .get(&url)
                    .header(AUTHORIZATION, self.auth_header())
                    .header(ACCEPT, ACCEPT_JSON)
                    .send()
                    .await?;
                if response.status() == StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                let response = Self::check(response).await?;
                Ok(Some(response.json::<FileMeta>().await?))
            }
        })
        .await
    }

    async fn put_file(
        &self,
        owner: &str,
        repo: &RepoName,
        path: &str,
        content: &[u8],
        prior_sha: Option<&str>,
    ) -> Result<()> {
        let url = self.contents_url(owner, repo, path);
        let body = PutFileBody {
            message: COMMIT_MESSAGE.to_string(),
            content: STANDARD.encode(content),
            sha: prior_sha.map(str::to_string),
        };
        with_retry(&self.retry, || {
            let url = url.clone();
            let body = body.clone();
            async move {
                let response = self
                    .http
                    .put(&url)
                    .header(AUTHORIZATION, self.auth_header())
                    .header(ACCEPT, ACCEPT_JSON)
                    .json(&body)
                    .send()
                    .await?;
                Self::check(response).await?;
                Ok(())
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn client(server: &mockito::Server) -> GithubClient {
        let retry = RetryPolicy {
            max_attempts: 1,
            base_delay: Duration::from_millis(1),
            rate_limit_delay: Duration::from_millis(1),
        };
        GithubClient::with_base_url(&server.url(), "test-token", retry).unwrap()
    }

    fn repo(name: &str) -> RepoName {
        RepoName::new(name).unwrap()
    }

    #[tokio::test]
    async fn get_identity_sends_token_and_parses_login() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "token test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"login": "octocat", "id": 583231}"#)
            .expect(1)
            .create_async()
            .await;

        let account = client(&server).get_identity().await.unwrap();

        assert_eq!(account.login, "octocat");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_identity_surfaces_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;

        let error = client(&server).get_identity().await.unwrap_err();

        assert_eq!(error.status(), Some(401));
        assert!(!error.is_rate_limited());
    }

    #[tokio::test]
    async fn create_repo_reports_fresh_creation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/user/repos")
            .match_body(Matcher::PartialJson(json!({
                "name": "my-site",
                "private": false,
                "auto_init": true,
            })))
            .with_status(201)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let outcome = client(&server).create_repo(&repo("my-site")).await.unwrap();

        assert_eq!(outcome, CreateRepoOutcome::Created);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_repo_treats_422_as_already_exists() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/user/repos")
            .with_status(422)
            .with_body(r#"{"message": "name already exists on this account"}"#)
            .create_async()
            .await;

        let outcome = client(&server).create_repo(&repo("my-site")).await.unwrap();

        assert_eq!(outcome, CreateRepoOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn missing_file_meta_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/octocat/my-site/contents/index.html")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let meta = client(&server)
            .get_file_meta("octocat", &repo("my-site"), "index.html")
            .await
            .unwrap();

        assert!(meta.is_none());
    }

    #[tokio::test]
    async fn put_file_sends_encoded_content_and_sha() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/octocat/my-site/contents/css/style.css")
            .match_body(Matcher::PartialJson(json!({
                "message": COMMIT_MESSAGE,
                "content": STANDARD.encode("body {}"),
                "sha": "abc123",
            })))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        client(&server)
            .put_file(
                "octocat",
                &repo("my-site"),
                "css/style.css",
                b"body {}",
                Some("abc123"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn put_file_omits_sha_for_new_files() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/octocat/my-site/contents/index.html")
            .match_body(Matcher::Json(json!({
                "message": COMMIT_MESSAGE,
                "content": STANDARD.encode("<html>"),
            })))
            .with_status(201)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        client(&server)
            .put_file("octocat", &repo("my-site"), "index.html", b"<html>", None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn path_segments_are_encoded_individually() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/repos/octocat/my-site/contents/my%20dir/file%20name.html",
            )
            .with_status(200)
            .with_body(r#"{"sha": "deadbeef"}"#)
            .expect(1)
            .create_async()
            .await;

        let meta = client(&server)
            .get_file_meta("octocat", &repo("my-site"), "my dir/file name.html")
            .await
            .unwrap();

        assert_eq!(meta.unwrap().sha, "deadbeef");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limits_are_retried_before_surfacing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .with_status(429)
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .expect(2)
            .create_async()
            .await;

        let retry = RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            rate_limit_delay: Duration::from_millis(1),
        };
        let client = GithubClient::with_base_url(&server.url(), "test-token", retry).unwrap();

        let error = client.get_identity().await.unwrap_err();

        assert!(error.is_rate_limited());
        mock.assert_async().await;
    }
}
