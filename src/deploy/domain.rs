// ABOUTME: Final URL derivation for deployed sites.
// ABOUTME: A custom domain wins; otherwise the owner's hosting subdomain with a repo path.

use crate::types::RepoName;

/// Host serving project sites that have no custom domain.
pub const HOSTING_HOST_SUFFIX: &str = "github.io";

/// Browsable URL of the repository itself.
pub fn repo_url(owner: &str, repo: &RepoName) -> String {
    format!("https://github.com/{owner}/{repo}")
}

/// Public URL of the deployed site.
///
/// A configured custom domain wins outright. Without one, the site lives
/// under the owner's hosting subdomain; the trailing slash is part of the
/// canonical URL.
pub fn live_url(owner: &str, repo: &RepoName, custom_domain: Option<&str>) -> String {
    match custom_domain.map(str::trim).filter(|domain| !domain.is_empty()) {
        Some(domain) => format!("https://{domain}"),
        None => format!("https://{owner}.{HOSTING_HOST_SUFFIX}/{repo}/"),
    }
}
