// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use crate::domain::config::{DeployConfig, NetworkPlacement, DESIRED_COUNT};
use crate::domain::task_definition::{LaunchType, TaskDefinitionArn};

/// Runtime handle of a running task instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskArn(String);

impl TaskArn {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Active,
    Draining,
    /// Terminal state of a deleted service; such a service counts as absent.
    Inactive,
    Other(String),
}

impl ServiceStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "ACTIVE" => Self::Active,
            "DRAINING" => Self::Draining,
            "INACTIVE" => Self::Inactive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Inactive)
    }
}

/// What the platform reports about a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescription {
    pub service_name: String,
    pub service_arn: Option<String>,
    pub status: ServiceStatus,
    pub task_definition: Option<String>,
    pub desired_count: i32,
    pub running_count: i32,
}

/// Creation request for a branch service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub cluster: String,
    pub service_name: String,
    pub task_definition: TaskDefinitionArn,
    pub desired_count: i32,
    pub launch_type: LaunchType,
    pub network: NetworkPlacement,
}

impl ServiceSpec {
    pub fn for_branch(config: &DeployConfig, branch: &str, task_definition: &TaskDefinitionArn) -> Self {
        Self {
            cluster: config.cluster.clone(),
            service_name: config.resource_name(branch),
            task_definition: task_definition.clone(),
            desired_count: DESIRED_COUNT,
            launch_type: LaunchType::Fargate,
            network: config.network.clone(),
        }
    }
}

/// Points an existing service at a new task definition revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub cluster: String,
    pub service: String,
    pub task_definition: TaskDefinitionArn,
    pub desired_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoppedTask {
    pub task_arn: TaskArn,
    pub last_status: Option<String>,
    pub desired_status: Option<String>,
}

/// Result of reconciling a branch service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    Created {
        service: ServiceDescription,
    },
    Updated {
        service: ServiceDescription,
        restarted: StoppedTask,
    },
}

impl ReconcileOutcome {
    pub fn service(&self) -> &ServiceDescription {
        match self {
            Self::Created { service } | Self::Updated { service, .. } => service,
        }
    }
}
