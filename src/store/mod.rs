// ABOUTME: Persistent state stores for usage history and the saved credential.
// ABOUTME: Files live under ~/.local/state/pagelift/ (XDG Base Directory compliant).

mod credentials;
mod usage;

pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use usage::{FileUsageStore, MemoryUsageStore, UsageStore};

use std::path::PathBuf;
use thiserror::Error;

/// Base directory for pagelift state files, relative to $HOME.
const STATE_DIR: &str = ".local/state/pagelift";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt usage history: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Resolve the state directory for the current user.
pub fn default_state_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(STATE_DIR)
}
