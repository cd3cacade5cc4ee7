// ABOUTME: Entry point for the pagelift CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use commands::DeployArgs;
use pagelift::config::{self, Config};
use pagelift::error::Result;
use pagelift::output::{Output, OutputMode};
use pagelift::quota;
use pagelift::store::{CredentialStore, FileCredentialStore, FileUsageStore, UsageStore};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { repo, force } => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            config::init_config(&cwd, repo.as_deref(), force)
        }
        Commands::Deploy {
            dir,
            repo,
            token,
            save_token,
            custom_domain,
            plan,
            quiet,
            json,
        } => {
            let mode = if json {
                OutputMode::Json
            } else if quiet {
                OutputMode::Quiet
            } else {
                OutputMode::Normal
            };
            let args = DeployArgs {
                dir,
                repo,
                token,
                save_token,
                custom_domain,
                plan,
            };
            commands::deploy(args, mode).await
        }
        Commands::Verify { token, save } => {
            commands::verify(token, save, Output::new(OutputMode::Normal)).await
        }
        Commands::Status => {
            let cwd = env::current_dir().expect("Failed to get current directory");
            let config = Config::load_or_default(&cwd)?;
            let usage = FileUsageStore::at_default_location();
            let history = usage.load()?;
            let now = Utc::now();

            println!("Plan: {}", config.plan);
            println!("Deployments recorded: {}", history.len());
            if let Some(last) = history.last() {
                println!("Last deployment: {}", last.format("%Y-%m-%d %H:%M UTC"));
            }
            if let Some(remaining) = quota::remaining(config.plan, &history, now) {
                println!("Remaining: {remaining}");
            }
            if let Err(denial) = quota::check(config.plan, &history, now) {
                println!("Blocked: {denial}");
            }

            let credentials = FileCredentialStore::at_default_location();
            let token_state = if credentials.load()?.is_some() {
                "stored"
            } else {
                "not stored"
            };
            println!("Token: {token_state}");
            Ok(())
        }
        Commands::Preview { dir, output } => {
            commands::preview(dir, output, Output::new(OutputMode::Normal)).await
        }
    }
}
