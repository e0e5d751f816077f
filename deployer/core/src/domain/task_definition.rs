// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use crate::domain::config::{
    DeployConfig, CONTAINER_MEMORY_RESERVATION, CONTAINER_PORT, TASK_CPU, TASK_MEMORY,
};

/// Versioned identifier of a registered task definition revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDefinitionArn(String);

impl TaskDefinitionArn {
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskDefinitionArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Image tag for a build: `{branch}_{commit}`.
pub fn image_tag(branch: &str, commit: &str) -> String {
    format!("{}_{}", branch, commit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    Tcp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Each task gets its own elastic network interface.
    Awsvpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LaunchType {
    Fargate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub container_port: i32,
    pub host_port: i32,
    pub protocol: TransportProtocol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub cpu: i32,
    pub memory_reservation: i32,
    pub port_mappings: Vec<PortMapping>,
    pub essential: bool,
}

/// Declarative task definition submitted for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinitionSpec {
    pub family: String,
    pub container_definitions: Vec<ContainerSpec>,
    pub execution_role_arn: String,
    pub network_mode: NetworkMode,
    pub requires_compatibilities: Vec<LaunchType>,
    pub cpu: String,
    pub memory: String,
}

impl TaskDefinitionSpec {
    /// The single-webserver task for a branch build.
    pub fn for_branch(config: &DeployConfig, branch: &str, image_tag: &str) -> Self {
        let webserver = ContainerSpec {
            name: config.container_name(),
            image: config.image_reference(image_tag),
            cpu: 0,
            memory_reservation: CONTAINER_MEMORY_RESERVATION,
            port_mappings: vec![PortMapping {
                container_port: CONTAINER_PORT,
                host_port: CONTAINER_PORT,
                protocol: TransportProtocol::Tcp,
            }],
            essential: true,
        };

        Self {
            family: config.resource_name(branch),
            container_definitions: vec![webserver],
            execution_role_arn: config.execution_role_arn.clone(),
            network_mode: NetworkMode::Awsvpc,
            requires_compatibilities: vec![LaunchType::Fargate],
            cpu: TASK_CPU.to_string(),
            memory: TASK_MEMORY.to_string(),
        }
    }
}

/// A registered revision. The ARN is captured as soon as registration returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredTaskDefinition {
    pub family: String,
    pub revision: i32,
    pub arn: TaskDefinitionArn,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::NetworkPlacement;

    fn config() -> DeployConfig {
        DeployConfig {
            base_name: "docker_hello_world".to_string(),
            cluster: "hello_world".to_string(),
            execution_role_arn: "arn:aws:iam::1:role/exec".to_string(),
            image_repository: "repo/hello".to_string(),
            network: NetworkPlacement {
                subnets: vec!["subnet-a".to_string(), "subnet-b".to_string()],
                security_groups: vec!["sg-1".to_string()],
            },
        }
    }

    #[test]
    fn test_image_tag_joins_branch_and_commit() {
        assert_eq!(image_tag("main", "abc123"), "main_abc123");
    }

    #[test]
    fn test_spec_for_main_branch() {
        let spec = TaskDefinitionSpec::for_branch(&config(), "main", "main_abc123");

        assert_eq!(spec.family, "docker_hello_world_main");
        assert_eq!(spec.network_mode, NetworkMode::Awsvpc);
        assert_eq!(spec.requires_compatibilities, vec![LaunchType::Fargate]);
        assert_eq!(spec.cpu, "256");
        assert_eq!(spec.memory, "512");
        assert_eq!(spec.execution_role_arn, "arn:aws:iam::1:role/exec");

        let container = &spec.container_definitions[0];
        assert_eq!(spec.container_definitions.len(), 1);
        assert_eq!(container.name, "docker_hello_world_webserver");
        assert_eq!(container.image, "repo/hello:main_abc123");
        assert_eq!(container.memory_reservation, 512);
        assert!(container.essential);
        assert_eq!(
            container.port_mappings,
            vec![PortMapping { container_port: 80, host_port: 80, protocol: TransportProtocol::Tcp }]
        );
    }

    #[test]
    fn test_spec_serializes_with_platform_spellings() {
        let spec = TaskDefinitionSpec::for_branch(&config(), "dev", "dev_1");
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["network_mode"], "awsvpc");
        assert_eq!(json["requires_compatibilities"][0], "FARGATE");
        assert_eq!(json["container_definitions"][0]["port_mappings"][0]["protocol"], "tcp");
    }
}
