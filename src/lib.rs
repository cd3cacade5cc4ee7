// ABOUTME: Library root for pagelift - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod infra;
pub mod output;
pub mod preview;
pub mod project;
pub mod quota;
pub mod remote;
pub mod store;
pub mod types;
