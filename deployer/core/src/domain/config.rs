// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Deployment Configuration
//
// Fixed application constants plus the identifiers injected through the
// function environment. Built once at process start and shared by reference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base application name, prefix of every derived resource name.
pub const BASE_NAME: &str = "docker_hello_world";

/// Cluster that hosts every branch service.
pub const CLUSTER_NAME: &str = "hello_world";

pub const CONTAINER_PORT: i32 = 80;
pub const TASK_CPU: &str = "256";
pub const TASK_MEMORY: &str = "512";
pub const CONTAINER_MEMORY_RESERVATION: i32 = 512;
pub const DESIRED_COUNT: i32 = 1;

pub const ENV_EXECUTION_ROLE_ARN: &str = "EXECUTION_ROLE_ARN";
pub const ENV_IMAGE_ARN: &str = "IMAGE_ARN";
pub const ENV_SUBNET_1_ID: &str = "SUBNET_1_ID";
pub const ENV_SUBNET_2_ID: &str = "SUBNET_2_ID";
pub const ENV_SERVICE_SECURITY_GROUP_ID: &str = "SERVICE_SECURITY_GROUP_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),
}

/// Where service tasks are placed inside the VPC. Tasks always get a public IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPlacement {
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub base_name: String,
    pub cluster: String,
    pub execution_role_arn: String,
    /// Container image repository, without tag.
    pub image_repository: String,
    pub network: NetworkPlacement,
}

impl DeployConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            base_name: BASE_NAME.to_string(),
            cluster: CLUSTER_NAME.to_string(),
            execution_role_arn: require(ENV_EXECUTION_ROLE_ARN)?,
            image_repository: require(ENV_IMAGE_ARN)?,
            network: NetworkPlacement {
                subnets: vec![require(ENV_SUBNET_1_ID)?, require(ENV_SUBNET_2_ID)?],
                security_groups: vec![require(ENV_SERVICE_SECURITY_GROUP_ID)?],
            },
        })
    }

    /// Family and service name for a branch: `{base}_{branch}`.
    pub fn resource_name(&self, branch: &str) -> String {
        format!("{}_{}", self.base_name, branch)
    }

    pub fn container_name(&self) -> String {
        format!("{}_webserver", self.base_name)
    }

    pub fn image_reference(&self, image_tag: &str) -> String {
        format!("{}:{}", self.image_repository, image_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_EXECUTION_ROLE_ARN, "arn:aws:iam::123456789012:role/ecsTaskExecutionRole".to_string()),
            (ENV_IMAGE_ARN, "123456789012.dkr.ecr.us-east-1.amazonaws.com/hello".to_string()),
            (ENV_SUBNET_1_ID, "subnet-aaa".to_string()),
            (ENV_SUBNET_2_ID, "subnet-bbb".to_string()),
            (ENV_SERVICE_SECURITY_GROUP_ID, "sg-123".to_string()),
        ])
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let env = full_env();
        let config = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.base_name, "docker_hello_world");
        assert_eq!(config.cluster, "hello_world");
        assert_eq!(config.network.subnets, vec!["subnet-aaa", "subnet-bbb"]);
        assert_eq!(config.network.security_groups, vec!["sg-123"]);
    }

    #[test]
    fn test_missing_variable_is_reported_by_name() {
        let mut env = full_env();
        env.remove(ENV_SUBNET_2_ID);
        let err = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUBNET_2_ID"));
    }

    #[test]
    fn test_empty_variable_counts_as_missing() {
        let mut env = full_env();
        env.insert(ENV_IMAGE_ARN, "  ".to_string());
        let err = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::Missing("IMAGE_ARN"));
    }

    #[test]
    fn test_derived_names() {
        let env = full_env();
        let config = DeployConfig::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.resource_name("main"), "docker_hello_world_main");
        assert_eq!(config.container_name(), "docker_hello_world_webserver");
        assert_eq!(
            config.image_reference("main_abc123"),
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/hello:main_abc123"
        );
    }
}
