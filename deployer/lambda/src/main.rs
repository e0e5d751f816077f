// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Deployment Function
//!
//! Lambda entry point behind the `/create` API gateway route. Each invocation
//! registers a task definition for `{branch}_{commit}` and creates or updates
//! the branch service on the `hello_world` cluster.
//!
//! ## Environment
//!
//! - `EXECUTION_ROLE_ARN`, `IMAGE_ARN`, `SUBNET_1_ID`, `SUBNET_2_ID`,
//!   `SERVICE_SECURITY_GROUP_ID` (required)
//! - `DEPLOY_LOG_LEVEL` or `RUST_LOG` (optional, default `info`)

use std::sync::Arc;

use deployer_core::application::DeploymentHandler;
use deployer_core::domain::config::DeployConfig;
use deployer_core::infrastructure::EcsOrchestrator;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;

    let config = Arc::new(DeployConfig::from_env()?);
    let orchestrator = Arc::new(EcsOrchestrator::from_env().await);
    let handler = DeploymentHandler::new(orchestrator, config);
    info!("Deployment function initialized");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler.handle(&event.payload).await.map_err(|e| {
            error!(request_id = %event.context.request_id, "Deployment failed: {}", e);
            Error::from(e)
        })
    }))
    .await
}

/// JSON lines without colours or timestamps; CloudWatch adds its own.
fn init_logging() -> Result<(), Error> {
    let level = std::env::var("DEPLOY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_current_span(false)
        .without_time()
        .try_init()
}
