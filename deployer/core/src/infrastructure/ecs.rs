// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! ECS control-plane adapter for [`ContainerOrchestrator`].
//!
//! Credentials and region come from the client's `SdkConfig`; retries are
//! whatever the SDK applies by default.

use async_trait::async_trait;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::operation::create_service::builders::CreateServiceFluentBuilder;
use aws_sdk_ecs::operation::list_tasks::builders::ListTasksFluentBuilder;
use aws_sdk_ecs::operation::register_task_definition::builders::RegisterTaskDefinitionFluentBuilder;
use aws_sdk_ecs::operation::register_task_definition::RegisterTaskDefinitionOutput;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, Compatibility, ContainerDefinition, DesiredStatus,
    NetworkConfiguration, Service,
};
use aws_sdk_ecs::Client;
use tracing::debug;

use crate::domain::config::NetworkPlacement;
use crate::domain::orchestrator::{ContainerOrchestrator, OrchestratorError};
use crate::domain::service::{
    ServiceDescription, ServiceSpec, ServiceStatus, ServiceUpdate, StoppedTask, TaskArn,
};
use crate::domain::task_definition::{
    ContainerSpec, LaunchType, NetworkMode, PortMapping, RegisteredTaskDefinition,
    TaskDefinitionArn, TaskDefinitionSpec, TransportProtocol,
};

const REGISTER_TASK_DEFINITION: &str = "RegisterTaskDefinition";
const CREATE_SERVICE: &str = "CreateService";

pub struct EcsOrchestrator {
    client: Client,
}

impl EcsOrchestrator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build from the default credential and region provider chain.
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config))
    }

    fn register_task_definition_request(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> RegisterTaskDefinitionFluentBuilder {
        self.client
            .register_task_definition()
            .family(&spec.family)
            .set_container_definitions(Some(
                spec.container_definitions.iter().map(container_definition).collect(),
            ))
            .execution_role_arn(&spec.execution_role_arn)
            .network_mode(network_mode(spec.network_mode))
            .set_requires_compatibilities(Some(
                spec.requires_compatibilities.iter().copied().map(compatibility).collect(),
            ))
            .cpu(&spec.cpu)
            .memory(&spec.memory)
    }

    fn create_service_request(
        &self,
        spec: &ServiceSpec,
    ) -> Result<CreateServiceFluentBuilder, OrchestratorError> {
        Ok(self
            .client
            .create_service()
            .cluster(&spec.cluster)
            .service_name(&spec.service_name)
            .task_definition(spec.task_definition.as_str())
            .desired_count(spec.desired_count)
            .launch_type(launch_type(spec.launch_type))
            .network_configuration(network_configuration(&spec.network)?))
    }

    fn list_running_tasks_request(
        &self,
        cluster: &str,
        service_name: &str,
        max_results: i32,
    ) -> ListTasksFluentBuilder {
        self.client
            .list_tasks()
            .cluster(cluster)
            .service_name(service_name)
            .desired_status(DesiredStatus::Running)
            .max_results(max_results)
    }
}

fn api_error<E: std::error::Error>(operation: &'static str, err: E) -> OrchestratorError {
    OrchestratorError::Api {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}

fn container_definition(container: &ContainerSpec) -> ContainerDefinition {
    let ports = container.port_mappings.iter().map(port_mapping).collect();

    ContainerDefinition::builder()
        .name(&container.name)
        .image(&container.image)
        .cpu(container.cpu)
        .memory_reservation(container.memory_reservation)
        .set_port_mappings(Some(ports))
        .essential(container.essential)
        .build()
}

fn port_mapping(mapping: &PortMapping) -> aws_sdk_ecs::types::PortMapping {
    let protocol = match mapping.protocol {
        TransportProtocol::Tcp => aws_sdk_ecs::types::TransportProtocol::Tcp,
    };

    aws_sdk_ecs::types::PortMapping::builder()
        .container_port(mapping.container_port)
        .host_port(mapping.host_port)
        .protocol(protocol)
        .build()
}

fn network_mode(mode: NetworkMode) -> aws_sdk_ecs::types::NetworkMode {
    match mode {
        NetworkMode::Awsvpc => aws_sdk_ecs::types::NetworkMode::Awsvpc,
    }
}

fn compatibility(launch_type: LaunchType) -> Compatibility {
    match launch_type {
        LaunchType::Fargate => Compatibility::Fargate,
    }
}

fn launch_type(launch_type: LaunchType) -> aws_sdk_ecs::types::LaunchType {
    match launch_type {
        LaunchType::Fargate => aws_sdk_ecs::types::LaunchType::Fargate,
    }
}

fn network_configuration(
    network: &NetworkPlacement,
) -> Result<NetworkConfiguration, OrchestratorError> {
    let awsvpc = AwsVpcConfiguration::builder()
        .set_subnets(Some(network.subnets.clone()))
        .set_security_groups(Some(network.security_groups.clone()))
        .assign_public_ip(AssignPublicIp::Enabled)
        .build()
        .map_err(|e| OrchestratorError::InvalidRequest {
            operation: CREATE_SERVICE,
            message: e.to_string(),
        })?;

    Ok(NetworkConfiguration::builder().awsvpc_configuration(awsvpc).build())
}

/// Pull the revision out of a registration response; the ARN must be present.
fn registered_task_definition(
    output: &RegisterTaskDefinitionOutput,
    spec: &TaskDefinitionSpec,
) -> Result<RegisteredTaskDefinition, OrchestratorError> {
    let definition = output.task_definition().ok_or(OrchestratorError::MissingField {
        operation: REGISTER_TASK_DEFINITION,
        field: "taskDefinition",
    })?;
    let arn = definition
        .task_definition_arn()
        .ok_or(OrchestratorError::MissingField {
            operation: REGISTER_TASK_DEFINITION,
            field: "taskDefinitionArn",
        })?;

    Ok(RegisteredTaskDefinition {
        family: definition.family().unwrap_or(spec.family.as_str()).to_string(),
        revision: definition.revision(),
        arn: TaskDefinitionArn::new(arn),
        status: definition.status().map(|s| s.as_str().to_string()),
    })
}

fn service_description(service: &Service) -> ServiceDescription {
    ServiceDescription {
        service_name: service.service_name().unwrap_or_default().to_string(),
        service_arn: service.service_arn().map(str::to_string),
        status: ServiceStatus::parse(service.status().unwrap_or_default()),
        task_definition: service.task_definition().map(str::to_string),
        desired_count: service.desired_count(),
        running_count: service.running_count(),
    }
}

#[async_trait]
impl ContainerOrchestrator for EcsOrchestrator {
    async fn register_task_definition(
        &self,
        spec: &TaskDefinitionSpec,
    ) -> Result<RegisteredTaskDefinition, OrchestratorError> {
        let output = self
            .register_task_definition_request(spec)
            .send()
            .await
            .map_err(|e| api_error(REGISTER_TASK_DEFINITION, e))?;

        registered_task_definition(&output, spec)
    }

    async fn describe_services(
        &self,
        cluster: &str,
        service_name: &str,
    ) -> Result<Vec<ServiceDescription>, OrchestratorError> {
        let output = self
            .client
            .describe_services()
            .cluster(cluster)
            .services(service_name)
            .send()
            .await
            .map_err(|e| api_error("DescribeServices", e))?;

        for failure in output.failures() {
            debug!(
                arn = failure.arn().unwrap_or_default(),
                reason = failure.reason().unwrap_or_default(),
                "DescribeServices failure entry"
            );
        }

        Ok(output.services().iter().map(service_description).collect())
    }

    async fn create_service(&self, spec: &ServiceSpec) -> Result<ServiceDescription, OrchestratorError> {
        let output = self
            .create_service_request(spec)?
            .send()
            .await
            .map_err(|e| api_error(CREATE_SERVICE, e))?;

        output
            .service()
            .map(service_description)
            .ok_or(OrchestratorError::MissingField { operation: CREATE_SERVICE, field: "service" })
    }

    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceDescription, OrchestratorError> {
        const OPERATION: &str = "UpdateService";

        let output = self
            .client
            .update_service()
            .cluster(&update.cluster)
            .service(&update.service)
            .task_definition(update.task_definition.as_str())
            .desired_count(update.desired_count)
            .send()
            .await
            .map_err(|e| api_error(OPERATION, e))?;

        output
            .service()
            .map(service_description)
            .ok_or(OrchestratorError::MissingField { operation: OPERATION, field: "service" })
    }

    async fn list_running_tasks(
        &self,
        cluster: &str,
        service_name: &str,
        max_results: i32,
    ) -> Result<Vec<TaskArn>, OrchestratorError> {
        let output = self
            .list_running_tasks_request(cluster, service_name, max_results)
            .send()
            .await
            .map_err(|e| api_error("ListTasks", e))?;

        Ok(output.task_arns().iter().map(TaskArn::new).collect())
    }

    async fn stop_task(&self, cluster: &str, task: &TaskArn) -> Result<StoppedTask, OrchestratorError> {
        let output = self
            .client
            .stop_task()
            .cluster(cluster)
            .task(task.as_str())
            .send()
            .await
            .map_err(|e| api_error("StopTask", e))?;

        let stopped = output.task();
        Ok(StoppedTask {
            task_arn: stopped
                .and_then(|t| t.task_arn())
                .map(TaskArn::new)
                .unwrap_or_else(|| task.clone()),
            last_status: stopped.and_then(|t| t.last_status()).map(str::to_string),
            desired_status: stopped.and_then(|t| t.desired_status()).map(str::to_string),
        })
    }
}
