// ABOUTME: Access token resolution shared by the deploy and verify commands.
// ABOUTME: A flag wins, then the environment, then the stored credential.

use std::env;

use pagelift::error::{Error, Result};
use pagelift::store::CredentialStore;

pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Resolve the token to use, trying the flag, then `GITHUB_TOKEN`, then
/// the credential store. Blank values are treated as absent.
pub fn resolve_token<C: CredentialStore>(flag: Option<String>, store: &C) -> Result<String> {
    if let Some(token) = flag {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    if let Ok(token) = env::var(TOKEN_ENV_VAR) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    if let Some(token) = store.load()? {
        return Ok(token);
    }

    Err(Error::MissingToken)
}

#[cfg(test)]
mod tests {
    use pagelift::store::MemoryCredentialStore;

    use super::*;

    #[test]
    fn flag_wins_over_store() {
        let store = MemoryCredentialStore::with_token("stored");
        temp_env::with_var(TOKEN_ENV_VAR, None::<&str>, || {
            let token = resolve_token(Some("flagged".to_string()), &store).unwrap();
            assert_eq!(token, "flagged");
        });
    }

    #[test]
    fn environment_wins_over_store() {
        let store = MemoryCredentialStore::with_token("stored");
        temp_env::with_var(TOKEN_ENV_VAR, Some("from-env"), || {
            let token = resolve_token(None, &store).unwrap();
            assert_eq!(token, "from-env");
        });
    }

    #[test]
    fn store_is_the_last_resort() {
        let store = MemoryCredentialStore::with_token("stored");
        temp_env::with_var(TOKEN_ENV_VAR, None::<&str>, || {
            let token = resolve_token(None, &store).unwrap();
            assert_eq!(token, "stored");
        });
    }

    #[test]
    fn blank_flag_and_env_are_ignored() {
        let store = MemoryCredentialStore::new();
        temp_env::with_var(TOKEN_ENV_VAR, Some("   "), || {
            let result = resolve_token(Some("  ".to_string()), &store);
            assert!(matches!(result, Err(Error::MissingToken)));
        });
    }
}
