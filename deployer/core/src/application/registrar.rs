// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;
use tracing::info;

use crate::domain::config::DeployConfig;
use crate::domain::orchestrator::{ContainerOrchestrator, OrchestratorError};
use crate::domain::task_definition::{RegisteredTaskDefinition, TaskDefinitionSpec};

/// Registers the branch task definition. Inputs are submitted as-is.
pub struct TaskDefinitionRegistrar {
    orchestrator: Arc<dyn ContainerOrchestrator>,
    config: Arc<DeployConfig>,
}

impl TaskDefinitionRegistrar {
    pub fn new(orchestrator: Arc<dyn ContainerOrchestrator>, config: Arc<DeployConfig>) -> Self {
        Self { orchestrator, config }
    }

    pub async fn register(
        &self,
        branch: &str,
        image_tag: &str,
    ) -> Result<RegisteredTaskDefinition, OrchestratorError> {
        let spec = TaskDefinitionSpec::for_branch(&self.config, branch, image_tag);
        info!(family = %spec.family, image_tag, "Registering task definition");

        let registered = self.orchestrator.register_task_definition(&spec).await?;
        info!(
            family = %registered.family,
            revision = registered.revision,
            arn = %registered.arn,
            "Task definition registered"
        );

        Ok(registered)
    }
}
