// ABOUTME: Preview command implementation.
// ABOUTME: Assembles a single-page preview of the project without deploying.

use std::env;
use std::fs;
use std::path::PathBuf;

use pagelift::config::Config;
use pagelift::error::{Error, Result};
use pagelift::output::Output;
use pagelift::{preview, project};

/// Render the project's entry page with its stylesheets inlined.
pub async fn preview(dir: Option<PathBuf>, out: Option<PathBuf>, output: Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;
    let dir = dir.or_else(|| config.dir.clone()).unwrap_or(cwd);

    let files = project::scan_dir(&dir, &config.exclude).await?;
    let html = preview::assemble(&files).ok_or_else(|| Error::NoEntryPoint(dir.clone()))?;

    match out {
        Some(path) => {
            fs::write(&path, html)?;
            output.success(&format!("Preview written to {}", path.display()));
        }
        None => println!("{html}"),
    }

    Ok(())
}
