// ABOUTME: Verify command implementation.
// ABOUTME: Checks that a token is valid and optionally stores it for later runs.

use std::env;

use pagelift::config::Config;
use pagelift::error::Result;
use pagelift::output::Output;
use pagelift::remote::{GithubClient, IdentityOps};
use pagelift::store::{CredentialStore, FileCredentialStore};

use super::token::resolve_token;

/// Verify a token against the API and report the account it belongs to.
pub async fn verify(token: Option<String>, save: bool, output: Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    let credentials = FileCredentialStore::at_default_location();
    let token = resolve_token(token, &credentials)?;

    let api_base = config
        .api_base
        .clone()
        .unwrap_or_else(|| pagelift::remote::DEFAULT_API_BASE.to_string());
    let client = GithubClient::with_base_url(&api_base, &token, config.retry.clone())?;

    let account = client.get_identity().await?;

    if save {
        credentials.save(&token)?;
        output.progress("Token stored");
    }
    output.success(&format!("Token verified, connected as {}", account.login));

    Ok(())
}
