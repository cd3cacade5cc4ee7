// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pagelift")]
#[command(about = "Zero-config static site deployment to GitHub Pages")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new pagelift.yml configuration file
    Init {
        /// Repository name to write into the config
        #[arg(short, long)]
        repo: Option<String>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Deploy the project to GitHub Pages
    Deploy {
        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Repository name, e.g. my-site
        #[arg(short, long)]
        repo: Option<String>,

        /// Access token (overrides GITHUB_TOKEN and the stored token)
        #[arg(short, long)]
        token: Option<String>,

        /// Store the token for later runs
        #[arg(long)]
        save_token: bool,

        /// Serve the site from a custom domain
        #[arg(long)]
        custom_domain: Option<String>,

        /// Billing plan to enforce (free or pro)
        #[arg(long)]
        plan: Option<String>,

        /// Suppress progress output (for CI)
        #[arg(short, long)]
        quiet: bool,

        /// Emit JSON lines instead of human-readable output
        #[arg(long, conflicts_with = "quiet")]
        json: bool,
    },

    /// Verify an access token and show the account it belongs to
    Verify {
        /// Access token (overrides GITHUB_TOKEN and the stored token)
        #[arg(short, long)]
        token: Option<String>,

        /// Store the token after verifying it
        #[arg(long)]
        save: bool,
    },

    /// Show plan usage and remaining deployments
    Status,

    /// Render the project entry page with stylesheets inlined
    Preview {
        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Write the preview to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
