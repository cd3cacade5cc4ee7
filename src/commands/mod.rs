// ABOUTME: Command module aggregator for the pagelift CLI.
// ABOUTME: Re-exports deploy, verify, and preview command handlers.

mod deploy;
mod preview;
mod token;
mod verify;

pub use deploy::{DeployArgs, deploy};
pub use preview::preview;
pub use verify::verify;
