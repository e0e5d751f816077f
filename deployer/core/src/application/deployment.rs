// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::application::reconciler::ServiceReconciler;
use crate::application::registrar::TaskDefinitionRegistrar;
use crate::domain::config::DeployConfig;
use crate::domain::event::{DeploymentRequest, ProxyResponse};
use crate::domain::orchestrator::{ContainerOrchestrator, OrchestratorError};

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("Missing query string parameter: {0}")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("Failed to serialize: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Function entry point: register, then reconcile, then echo the event.
pub struct DeploymentHandler {
    registrar: TaskDefinitionRegistrar,
    reconciler: ServiceReconciler,
}

impl DeploymentHandler {
    pub fn new(orchestrator: Arc<dyn ContainerOrchestrator>, config: Arc<DeployConfig>) -> Self {
        Self {
            registrar: TaskDefinitionRegistrar::new(orchestrator.clone(), config.clone()),
            reconciler: ServiceReconciler::new(orchestrator, config),
        }
    }

    pub async fn handle(&self, event: &Value) -> Result<ProxyResponse, DeploymentError> {
        let request =
            DeploymentRequest::from_event(event).map_err(DeploymentError::MissingParameter)?;
        let image_tag = request.image_tag();
        info!(branch = %request.branch_name, image_tag = %image_tag, "Deploying branch");

        let registered = self.registrar.register(&request.branch_name, &image_tag).await?;
        info!("{}", serde_json::to_string_pretty(&registered)?);

        let outcome = self
            .reconciler
            .reconcile(&request.branch_name, &registered.arn)
            .await?;
        info!(service = %outcome.service().service_name, "Service reconciled");
        info!("{}", serde_json::to_string_pretty(&outcome)?);

        Ok(ProxyResponse::echo(event)?)
    }
}
