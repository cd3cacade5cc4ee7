// ABOUTME: Repository name validation following GitHub naming rules.
// ABOUTME: Allows ASCII alphanumerics plus '.', '-' and '_', up to 100 chars.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoNameError {
    #[error("repository name cannot be empty")]
    Empty,

    #[error("repository name exceeds maximum length of 100 characters")]
    TooLong,

    #[error("repository name cannot be '.' or '..'")]
    Reserved,

    #[error("invalid character in repository name: '{0}'")]
    InvalidChar(char),
}

/// A validated remote repository name.
///
/// Surrounding whitespace is trimmed before validation, so names pasted
/// from a form or config file behave the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName(String);

impl RepoName {
    pub fn new(value: &str) -> Result<Self, RepoNameError> {
        let value = value.trim();

        if value.is_empty() {
            return Err(RepoNameError::Empty);
        }

        if value.len() > 100 {
            return Err(RepoNameError::TooLong);
        }

        if value == "." || value == ".." {
            return Err(RepoNameError::Reserved);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
                return Err(RepoNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
