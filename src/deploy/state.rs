// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce valid state transitions at compile time.

/// Initial state: inputs validated, nothing remote touched yet.
/// Available actions: `verify_token()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Token verified: the account behind the credential is known.
/// Available actions: `create_repo()`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenVerified;

/// Repository ready: created fresh, or reused after a name collision.
/// Available actions: `enable_hosting()`
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoReady;

/// Hosting requested: serving from the default branch root was asked for.
/// Available actions: `upload_files()`
#[derive(Debug, Clone, Copy, Default)]
pub struct HostingEnabled;

/// Files uploaded: infrastructure and project files are on the default branch.
/// Available actions: `complete()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Uploaded;
