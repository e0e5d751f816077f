// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::service::{ServiceDescription, ServiceSpec, ServiceUpdate, StoppedTask, TaskArn};
use crate::domain::task_definition::{RegisteredTaskDefinition, TaskDefinitionSpec};

/// Errors raised by container orchestration calls.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} response is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[error("Invalid {operation} request: {message}")]
    InvalidRequest {
        operation: &'static str,
        message: String,
    },

    #[error("Service {service} has no running task to restart")]
    NoRunningTask { service: String },
}

/// Control-plane operations needed to deploy a branch.
///
/// Implemented by the ECS adapter in production and by recording fakes in
/// tests. Every call is a single remote request; none retry.
#[async_trait]
pub trait ContainerOrchestrator: Send + Sync {
    /// Register a new immutable task definition revision.
    async fn register_task_definition(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> Result<RegisteredTaskDefinition, OrchestratorError>;

    /// Describe services by name within a cluster, in the order the platform returns them.
    async fn describe_services(
        &self,
        cluster: &str,
        service_name: &str,
    ) -> Result<Vec<ServiceDescription>, OrchestratorError>;

    async fn create_service(&self, spec: &ServiceSpec) -> Result<ServiceDescription, OrchestratorError>;

    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceDescription, OrchestratorError>;

    /// List tasks of a service whose desired status is RUNNING.
    async fn list_running_tasks(
        &self,
        cluster: &str,
        service_name: &str,
        max_results: i32,
    ) -> Result<Vec<TaskArn>, OrchestratorError>;

    /// Force-stop a task; the service scheduler replaces it.
    async fn stop_task(&self, cluster: &str, task: &TaskArn) -> Result<StoppedTask, OrchestratorError>;
}
