// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Service reconciliation
//!
//! Brings the branch service in line with a freshly registered task
//! definition. The decision is made from one lookup:
//!
//! - no service, or the first match is `INACTIVE`: create it
//! - otherwise: update it to the new revision and stop its running task so
//!   the scheduler starts a replacement from the updated definition
//!
//! Only the first running task is stopped. Services are expected to run a
//! single task.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::config::{DeployConfig, DESIRED_COUNT};
use crate::domain::orchestrator::{ContainerOrchestrator, OrchestratorError};
use crate::domain::service::{ReconcileOutcome, ServiceDescription, ServiceSpec, ServiceUpdate};
use crate::domain::task_definition::TaskDefinitionArn;

pub struct ServiceReconciler {
    orchestrator: Arc<dyn ContainerOrchestrator>,
    config: Arc<DeployConfig>,
}

impl ServiceReconciler {
    pub fn new(orchestrator: Arc<dyn ContainerOrchestrator>, config: Arc<DeployConfig>) -> Self {
        Self { orchestrator, config }
    }

    pub async fn reconcile(
        &self,
        branch: &str,
        task_definition: &TaskDefinitionArn,
    ) -> Result<ReconcileOutcome, OrchestratorError> {
        let service_name = self.config.resource_name(branch);

        match self.find_live_service(&service_name).await? {
            None => {
                info!(service = %service_name, cluster = %self.config.cluster, "Creating service");
                let spec = ServiceSpec::for_branch(&self.config, branch, task_definition);
                let service = self.orchestrator.create_service(&spec).await?;
                Ok(ReconcileOutcome::Created { service })
            }
            Some(existing) => {
                info!(
                    service = %service_name,
                    status = ?existing.status,
                    task_definition = %task_definition,
                    "Updating service"
                );
                let update = ServiceUpdate {
                    cluster: self.config.cluster.clone(),
                    service: service_name.clone(),
                    task_definition: task_definition.clone(),
                    desired_count: DESIRED_COUNT,
                };
                let service = self.orchestrator.update_service(&update).await?;

                let running = self
                    .orchestrator
                    .list_running_tasks(&self.config.cluster, &service_name, 1)
                    .await?;
                let task = running
                    .into_iter()
                    .next()
                    .ok_or_else(|| OrchestratorError::NoRunningTask { service: service_name.clone() })?;

                info!(service = %service_name, task = %task, "Stopping running task");
                let restarted = self.orchestrator.stop_task(&self.config.cluster, &task).await?;

                Ok(ReconcileOutcome::Updated { service, restarted })
            }
        }
    }

    /// The first described service, unless it is inactive.
    async fn find_live_service(
        &self,
        service_name: &str,
    ) -> Result<Option<ServiceDescription>, OrchestratorError> {
        let services = self
            .orchestrator
            .describe_services(&self.config.cluster, service_name)
            .await?;

        let live = services.into_iter().next().filter(|s| !s.status.is_inactive());
        debug!(service = service_name, found = live.is_some(), "Service lookup");
        Ok(live)
    }
}
