//! Lumen Docs - AI-assisted API documentation generator
//!
//! This is the main entry point for the `lumen-docs` command.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use lumen_docs::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let project = cli.project.display().to_string();
    cli::run(cli)
        .await
        .inspect_err(|e| error!(error = %e, "Command failed"))
        .with_context(|| format!("lumen-docs failed for project {}", project))?;

    Ok(())
}

/// Initialize tracing; `RUST_LOG` overrides the verbosity flag
fn init_tracing(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_filter().into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose)
        .with_writer(std::io::stderr);

    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
