// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Build Trigger
//!
//! `kick <BRANCH_NAME> <COMMIT_HASH>` asks the deployment API to roll out the
//! image built for that commit. Run from the CI job once the image is pushed.
//!
//! Exits non-zero when the API answers with anything other than 2xx, or when
//! the request cannot be made.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use ecs_deployer::{BuildTrigger, DEFAULT_API_URL};

/// Trigger a branch deployment through the deployment API
#[derive(Parser)]
#[command(name = "kick")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Branch that was built
    #[arg(value_name = "BRANCH_NAME")]
    branch_name: String,

    /// Commit the image was built from
    #[arg(value_name = "COMMIT_HASH")]
    commit_hash: String,

    /// Deployment API endpoint
    #[arg(long, env = "KICK_API_URL", default_value = DEFAULT_API_URL, hide_default_value = true)]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DEPLOY_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let trigger = BuildTrigger::new(&cli.api_url)?;
    let url = trigger.url(&cli.branch_name, &cli.commit_hash);
    println!("{} {}", "Kick API:".bold(), url);

    let response = trigger.kick(&url).await.context("Failed to call deployment API")?;
    let code = if response.status.is_success() {
        response.status.as_u16().to_string().green()
    } else {
        response.status.as_u16().to_string().red()
    };
    println!("{} {} {}", "Response:".bold(), code, response.body);

    response.error_for_status()?;
    info!(branch = %cli.branch_name, "Deployment triggered");

    Ok(())
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
